//! Query analyzer: the entry point for "what is the token under the cursor".
//!
//! ## Usage
//!
//! ```
//! use fql::ide::{TokenClass, TokenOfInterest, analyze_query};
//!
//! let token = TokenOfInterest::new("status", 0, 5);
//! let found = analyze_query("status >= 500", &token);
//! assert_eq!(found.map(|t| t.classification), Some(TokenClass::Key));
//! ```
//!
//! The input is trimmed before parsing and every offset, both in the
//! token-of-interest and in the results, is relative to the trimmed text.

use rayon::prelude::*;
use smol_str::SmolStr;
use tracing::{debug, trace};

use crate::base::{LineIndex, Span};
use crate::parser::{Parse, ParseOptions, SyntaxError, parse_with};

use super::classify::{ClassifiedToken, classify_tokens};

/// The token a caller wants classified, in inclusive char offsets
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TokenOfInterest {
    pub text: SmolStr,
    pub start: usize,
    pub stop: usize,
}

impl TokenOfInterest {
    pub fn new(text: impl Into<SmolStr>, start: usize, stop: usize) -> Self {
        Self {
            text: text.into(),
            start,
            stop,
        }
    }

    fn matches(&self, token: &ClassifiedToken) -> bool {
        token.text == self.text && token.start_index == self.start && token.stop_index == self.stop
    }
}

/// Classify `token` within `input` using default options
pub fn analyze_query(input: &str, token: &TokenOfInterest) -> Option<ClassifiedToken> {
    analyze_query_with(input, token, &ParseOptions::default())
}

/// Classify `token` within `input`.
///
/// Returns `None` when the token is structural, lies in a region that
/// failed to parse, or does not occur at the given offsets.
pub fn analyze_query_with(
    input: &str,
    token: &TokenOfInterest,
    options: &ParseOptions,
) -> Option<ClassifiedToken> {
    QueryAnalysis::with_options(input, options).find(token).cloned()
}

/// Classify many independent requests in parallel
pub fn analyze_batch(
    requests: &[(&str, TokenOfInterest)],
    options: &ParseOptions,
) -> Vec<Option<ClassifiedToken>> {
    requests
        .par_iter()
        .map(|(input, token)| analyze_query_with(input, token, options))
        .collect()
}

/// Full analysis of one query: the parse, its errors and every classified token
#[derive(Debug, Clone)]
pub struct QueryAnalysis {
    text: String,
    parse: Parse,
    line_index: LineIndex,
    tokens: Vec<ClassifiedToken>,
}

impl QueryAnalysis {
    pub fn new(input: &str) -> Self {
        Self::with_options(input, &ParseOptions::default())
    }

    pub fn with_options(input: &str, options: &ParseOptions) -> Self {
        let text = input.trim();
        let parse = parse_with(text, options);
        let line_index = LineIndex::new(text);
        let tokens = classify_tokens(&parse.syntax(), &line_index);
        debug!(
            classified = tokens.len(),
            errors = parse.errors.len(),
            "analyzed query"
        );
        Self {
            text: text.to_string(),
            parse,
            line_index,
            tokens,
        }
    }

    /// The trimmed text all offsets refer to
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn parse(&self) -> &Parse {
        &self.parse
    }

    pub fn errors(&self) -> &[SyntaxError] {
        &self.parse.errors
    }

    /// Errors paired with their line/column span, for editor diagnostics
    pub fn diagnostics(&self) -> impl Iterator<Item = (Span, &SyntaxError)> + '_ {
        self.parse
            .errors
            .iter()
            .map(|e| (self.line_index.span(e.range), e))
    }

    pub fn line_index(&self) -> &LineIndex {
        &self.line_index
    }

    /// Classified tokens in source order
    pub fn tokens(&self) -> &[ClassifiedToken] {
        &self.tokens
    }

    /// First classified token equal to `token` in text and offsets
    pub fn find(&self, token: &TokenOfInterest) -> Option<&ClassifiedToken> {
        let found = self.tokens.iter().find(|t| token.matches(t));
        trace!(text = %token.text, start = token.start, stop = token.stop, found = found.is_some(), "token lookup");
        found
    }
}
