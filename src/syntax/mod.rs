//! Traversals over parsed filter queries
//!
//! - [`walk`] / [`QueryListener`]: side-effecting pre-order listener
//! - [`FilterExpr`] / [`lower`]: value-producing lowering into an owned tree

pub mod expr;
pub mod walk;

pub use expr::{
    CompareOp, FilterExpr, FunctionArg, FunctionName, Literal, Operand, decode_literal, lower,
    unquote,
};
pub use walk::{QueryListener, walk};

// Re-export Position and Span from base for convenience
pub use crate::base::{Position, Span};
