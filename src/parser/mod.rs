//! Rowan-based parser for filter queries
//!
//! This module provides a lossless, error-tolerant parser using:
//! - **logos** for fast lexing
//! - **rowan** for the CST (Concrete Syntax Tree)
//!
//! ## Architecture
//!
//! ```text
//! Query Text
//!     ↓
//! Lexer (logos) → Tokens with SyntaxKind
//!     ↓
//! Parser → GreenNode tree (immutable, cheap to clone)
//!     ↓
//! SyntaxNode (rowan) → CST with parent pointers
//!     ↓
//! AST layer → Typed wrappers over SyntaxNode
//! ```
//!
//! Every input, however malformed, produces a tree whose text equals the
//! input. Malformed regions are wrapped in `ERROR` nodes and reported as
//! [`SyntaxError`]s.

#[allow(clippy::module_inception)]
mod parser;

pub mod ast;
pub mod errors;
pub mod grammar;
pub mod keywords;
mod lexer;
pub mod rule_parser;
mod syntax_kind;

pub use ast::*;
pub use errors::{ErrorCode, QueryError, RelatedInfo, SyntaxError};
pub use lexer::{Lexer, Token, tokenize};
pub use parser::{DEFAULT_MAX_DEPTH, Parse, ParseOptions, parse, parse_with};
pub use syntax_kind::{
    FilterQueryLanguage, SyntaxElement, SyntaxKind, SyntaxNode, SyntaxNodeChildren, SyntaxToken,
};

/// Re-export rowan types for convenience
pub use rowan::{GreenNode, TextRange, TextSize};
