//! Foundation types for the query toolchain.
//!
//! - [`TextRange`], [`TextSize`] - Byte positions in query text
//! - [`LineCol`], [`LineIndex`] - Byte to char and line/column conversion
//! - [`Position`], [`Span`] - Line/column positions for reporting
//!
//! This module has NO dependencies on other modules of the crate.

mod position;
mod span;

pub use position::{Position, Span};
pub use span::{LineCol, LineIndex, TextRange, TextSize};

// Re-export text-size types for convenience
pub use text_size;
