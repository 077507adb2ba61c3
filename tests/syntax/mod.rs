//! Syntax layer tests
//!
//! Tests for:
//! - The pre-order listener walk
//! - Lowering into FilterExpr

pub mod tests_lowering;
