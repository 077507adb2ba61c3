//! # fql-base
//!
//! Parser and analyzer for the filter query language: `key op value`
//! comparisons, `IN` lists, functions and full-text terms joined with
//! `AND`, `OR` and `NOT`.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! ide       → Analyzer, query pairs, cursor context, completion, highlighting
//!   ↓
//! syntax    → Tree walker/listener, lowering to FilterExpr
//!   ↓
//! parser    → Logos lexer, recursive-descent parser, typed AST
//!   ↓
//! base      → Primitives (LineIndex, TextRange, Span/Position)
//! ```

// ============================================================================
// MODULES (dependency order: base → parser → syntax → ide)
// ============================================================================

/// Foundation types: LineIndex, TextRange, Span/Position
pub mod base;

/// Parser: Logos lexer, recursive-descent parser, typed AST, rule entry points
pub mod parser;

/// Syntax: listener-based walker and lowering into an owned expression tree
pub mod syntax;

/// IDE features: token classification, completion, semantic tokens
pub mod ide;

// Re-export commonly needed items
pub use parser::keywords;
pub use parser::{Parse, ParseOptions, QueryError, SyntaxError, parse};

// Re-export foundation types
pub use base::{LineCol, LineIndex, Position, Span, TextRange, TextSize};

pub use ide::{ClassifiedToken, TokenClass, TokenOfInterest, analyze_query};
pub use syntax::FilterExpr;
