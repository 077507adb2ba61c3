//! Semantic tokens, lexical highlighting for filter queries.
//!
//! Highlighting is driven by the token stream alone, so it stays stable
//! while the query is incomplete and does not parse.

use crate::base::{LineIndex, TextRange};
use crate::parser::{SyntaxKind, tokenize};

/// Token type for semantic highlighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TokenType {
    Key,
    Operator,
    Keyword,
    String,
    Number,
    Boolean,
    Function,
    Punctuation,
}

impl TokenType {
    /// Convert to LSP token type index.
    pub fn to_lsp_index(self) -> u32 {
        match self {
            TokenType::Key => 0,
            TokenType::Operator => 1,
            TokenType::Keyword => 2,
            TokenType::String => 3,
            TokenType::Number => 4,
            TokenType::Boolean => 5,
            TokenType::Function => 6,
            TokenType::Punctuation => 7,
        }
    }

    /// Highlight class of a token kind; `None` for trivia and errors
    pub fn from_kind(kind: SyntaxKind) -> Option<Self> {
        let ty = match kind {
            SyntaxKind::KEY => TokenType::Key,
            SyntaxKind::QUOTED_TEXT => TokenType::String,
            SyntaxKind::NUMBER => TokenType::Number,
            SyntaxKind::BOOL => TokenType::Boolean,
            SyntaxKind::NOT_KW | SyntaxKind::AND_KW | SyntaxKind::OR_KW => TokenType::Keyword,
            k if k.is_function_name() => TokenType::Function,
            k if k.is_comparison_operator() => TokenType::Operator,
            SyntaxKind::IN_KW | SyntaxKind::NOT_IN_KW => TokenType::Operator,
            k if k.is_punct() => TokenType::Punctuation,
            _ => return None,
        };
        Some(ty)
    }
}

/// A semantic token for syntax highlighting.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SemanticToken {
    /// Line number (0-indexed)
    pub line: u32,
    /// Column number (0-indexed, in characters)
    pub col: u32,
    /// Length of the token in characters
    pub length: u32,
    pub token_type: TokenType,
}

/// Get semantic tokens for a query, sorted by position.
pub fn semantic_tokens(query: &str) -> Vec<SemanticToken> {
    let index = LineIndex::new(query);
    tokenize(query)
        .into_iter()
        .filter_map(|token| {
            let token_type = TokenType::from_kind(token.kind)?;
            let chars = index.char_range(TextRange::new(token.offset, token.end()));
            let pos = index.line_col(token.offset);
            Some(SemanticToken {
                line: pos.line,
                col: pos.col,
                length: chars.len() as u32,
                token_type,
            })
        })
        .collect()
}
