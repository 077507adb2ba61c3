//! Token classification, the listener behind the analyzer.
//!
//! Tokens in a `key` position are classified as [`TokenClass::Key`], tokens
//! in a `value` position as [`TokenClass::Value`], and operator tokens that
//! are direct children of a comparison as [`TokenClass::Operator`].
//!
//! `IN` / `NOT IN` sit inside their clause node rather than directly in the
//! comparison, so they are not classified. Keys and values used as function
//! parameters go through the same rules and are classified.

use smol_str::SmolStr;

use crate::base::LineIndex;
use crate::parser::{AstNode, Comparison, Key, SyntaxNode, SyntaxToken, Value};
use crate::syntax::{QueryListener, walk};

/// Semantic class of a token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TokenClass {
    Key,
    Value,
    Operator,
}

/// A token with its classification and inclusive char offsets
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClassifiedToken {
    pub text: SmolStr,
    pub start_index: usize,
    pub stop_index: usize,
    pub classification: TokenClass,
}

/// Classify every token of a parsed query, in source order
pub fn classify_tokens(root: &SyntaxNode, line_index: &LineIndex) -> Vec<ClassifiedToken> {
    let mut classifier = Classifier {
        line_index,
        tokens: Vec::new(),
    };
    walk(root, &mut classifier);
    // A comparison reports its operator on entry, before its key child
    classifier.tokens.sort_by_key(|t| t.start_index);
    classifier.tokens
}

struct Classifier<'a> {
    line_index: &'a LineIndex,
    tokens: Vec<ClassifiedToken>,
}

impl Classifier<'_> {
    fn push(&mut self, token: &SyntaxToken, classification: TokenClass) {
        let range = self.line_index.char_range(token.text_range());
        self.tokens.push(ClassifiedToken {
            text: SmolStr::new(token.text()),
            start_index: range.start,
            stop_index: range.end.saturating_sub(1).max(range.start),
            classification,
        });
    }
}

impl QueryListener for Classifier<'_> {
    fn enter_key(&mut self, key: &Key) {
        if let Some(token) = key.token() {
            self.push(&token, TokenClass::Key);
        }
    }

    fn enter_value(&mut self, value: &Value) {
        if let Some(token) = value.token() {
            self.push(&token, TokenClass::Value);
        }
    }

    fn enter_comparison(&mut self, comparison: &Comparison) {
        let operators = comparison
            .syntax()
            .children_with_tokens()
            .filter_map(|e| e.into_token())
            .filter(|t| t.kind().is_comparison_operator());
        for token in operators {
            self.push(&token, TokenClass::Operator);
        }
    }
}
