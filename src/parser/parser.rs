//! Recursive descent parser for filter queries
//!
//! Builds a rowan GreenNode tree from tokens.
//! Supports error recovery and produces a lossless CST.

use super::ast::{AstNode, Query};
use super::errors::{ErrorCode, QueryError, SyntaxError};
use super::grammar::{self, FilterQueryParser};
use super::lexer::{Lexer, Token};
use super::syntax_kind::SyntaxKind;
use rowan::{Checkpoint, GreenNode, GreenNodeBuilder, TextRange, TextSize};
use tracing::{debug, trace};

/// Default limit on nested parentheses
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Parser configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParseOptions {
    /// Maximum nesting of parenthesized groups before the parser gives up
    /// on a group and skips it as a single error
    pub max_depth: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ParseOptions {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

/// Parse result containing the green tree and any errors
#[derive(Debug, Clone)]
pub struct Parse {
    pub green: GreenNode,
    pub errors: Vec<SyntaxError>,
}

impl Parse {
    /// Get the root syntax node
    pub fn syntax(&self) -> super::SyntaxNode {
        super::SyntaxNode::new_root(self.green.clone())
    }

    /// Check if parsing succeeded without errors
    pub fn ok(&self) -> bool {
        self.errors.is_empty()
    }

    /// Typed root of the tree, `None` only for trees not built by [`parse`]
    pub fn tree(&self) -> Option<Query> {
        Query::cast(self.syntax())
    }

    /// Turn a parse with errors into a [`QueryError`]
    pub fn into_result(self) -> Result<Parse, QueryError> {
        if self.errors.is_empty() {
            Ok(self)
        } else {
            Err(QueryError::Syntax(self.errors))
        }
    }
}

/// Parse a filter query into a CST using default options
pub fn parse(input: &str) -> Parse {
    parse_with(input, &ParseOptions::default())
}

/// Parse a filter query into a CST
pub fn parse_with(input: &str, options: &ParseOptions) -> Parse {
    let tokens: Vec<_> = Lexer::new(input).collect();
    let mut parser = Parser::new(&tokens, *options);
    grammar::parse_query(&mut parser);
    let parse = parser.finish();
    debug!(
        len = input.len(),
        tokens = tokens.len(),
        errors = parse.errors.len(),
        "parsed filter query"
    );
    parse
}

/// The parser state
pub(crate) struct Parser<'a> {
    tokens: &'a [Token<'a>],
    pos: usize,
    builder: GreenNodeBuilder<'static>,
    errors: Vec<SyntaxError>,
    depth: usize,
    options: ParseOptions,
}

impl<'a> Parser<'a> {
    pub(crate) fn new(tokens: &'a [Token<'a>], options: ParseOptions) -> Self {
        Self {
            tokens,
            pos: 0,
            builder: GreenNodeBuilder::new(),
            errors: Vec::new(),
            depth: 0,
            options,
        }
    }

    pub(crate) fn finish(self) -> Parse {
        Parse {
            green: self.builder.finish(),
            errors: self.errors,
        }
    }

    // =========================================================================
    // Token inspection
    // =========================================================================

    fn current(&self) -> Option<&Token<'a>> {
        self.tokens.get(self.pos)
    }

    /// Index of the next non-trivia token at or after the cursor
    fn next_significant(&self) -> Option<usize> {
        (self.pos..self.tokens.len()).find(|&i| !self.tokens[i].kind.is_trivia())
    }

    /// End of the token stream as a text offset
    fn end_offset(&self) -> TextSize {
        self.tokens.last().map(Token::end).unwrap_or_default()
    }

    /// Range of the next significant token, or an empty range at end of input
    fn next_range(&self) -> TextRange {
        match self.next_significant() {
            Some(i) => {
                let t = &self.tokens[i];
                TextRange::at(t.offset, TextSize::of(t.text))
            }
            None => TextRange::empty(self.end_offset()),
        }
    }

    fn push_error(&mut self, error: SyntaxError) {
        trace!(code = %error.code, range = ?error.range, "{}", error.message);
        self.errors.push(error);
    }

    /// Consume every remaining significant token into one ERROR node.
    ///
    /// Used when a single rule is parsed in isolation and leaves input behind.
    pub(crate) fn error_trailing(&mut self) {
        if self.next_significant().is_none() {
            self.skip_trivia();
            return;
        }
        let start = self.next_range().start();
        let range = TextRange::new(start, self.end_offset());
        self.push_error(SyntaxError::new(
            "unexpected trailing input",
            range,
            ErrorCode::E0901,
        ));
        self.skip_trivia();
        self.builder.start_node(SyntaxKind::ERROR.into());
        while !self.at_eof() {
            self.bump();
        }
        self.builder.finish_node();
    }
}

impl FilterQueryParser for Parser<'_> {
    fn current_kind(&self) -> SyntaxKind {
        self.current().map(|t| t.kind).unwrap_or(SyntaxKind::EOF)
    }

    fn at(&self, kind: SyntaxKind) -> bool {
        self.current_kind() == kind
    }

    fn at_eof(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn peek_kind(&self, n: usize) -> SyntaxKind {
        self.tokens[self.pos.min(self.tokens.len())..]
            .iter()
            .filter(|t| !t.kind.is_trivia())
            .nth(n)
            .map(|t| t.kind)
            .unwrap_or(SyntaxKind::EOF)
    }

    fn get_pos(&self) -> usize {
        self.pos
    }

    fn bump(&mut self) {
        if let Some(token) = self.current() {
            self.builder.token(token.kind.into(), token.text);
            self.pos += 1;
        }
    }

    fn skip_trivia(&mut self) {
        while self.current().map(|t| t.kind.is_trivia()).unwrap_or(false) {
            self.bump();
        }
    }

    fn start_node(&mut self, kind: SyntaxKind) {
        self.builder.start_node(kind.into());
    }

    fn finish_node(&mut self) {
        self.builder.finish_node();
    }

    fn checkpoint(&mut self) -> Checkpoint {
        self.builder.checkpoint()
    }

    fn start_node_at(&mut self, checkpoint: Checkpoint, kind: SyntaxKind) {
        self.builder.start_node_at(checkpoint, kind.into());
    }

    fn error(&mut self, code: ErrorCode, message: String) {
        let range = self.next_range();
        self.push_error(SyntaxError::new(message, range, code));
    }

    fn error_token(&mut self, code: ErrorCode, message: String) {
        let range = self.next_range();
        let (code, message) = match self.next_significant().map(|i| &self.tokens[i]) {
            Some(t) if t.kind == SyntaxKind::ERROR && t.text.starts_with(['"', '\'']) => {
                (ErrorCode::E0102, format!("unterminated string literal {}", t.text))
            }
            _ => (code, message),
        };
        self.push_error(SyntaxError::new(message, range, code));

        self.skip_trivia();
        if !self.at_eof() {
            self.builder.start_node(SyntaxKind::ERROR.into());
            self.bump();
            self.builder.finish_node();
        }
    }

    fn error_unclosed(&mut self, close: SyntaxKind, opened_at: usize) {
        let (code, opener) = match close {
            SyntaxKind::R_BRACKET => (ErrorCode::E0202, "bracket"),
            _ => (ErrorCode::E0201, "parenthesis"),
        };
        let at = TextRange::empty(self.next_range().start());
        let mut builder = SyntaxError::builder(code)
            .message(format!("missing {} to close {}", close.display_name(), opener))
            .range(at)
            .hint(format!("add {} here", close.display_name()));
        if let Some(open) = self.tokens.get(opened_at) {
            builder = builder.related(
                format!("unclosed {} opened here", opener),
                TextRange::at(open.offset, TextSize::of(open.text)),
            );
        }
        self.push_error(builder.build());
    }

    fn enter_group(&mut self) -> bool {
        if self.depth >= self.options.max_depth {
            return false;
        }
        self.depth += 1;
        true
    }

    fn exit_group(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }
}
