//! Parser error handling module
//!
//! - Categorized error codes for filtering and documentation
//! - Syntax errors with hints and related spans (e.g. "opened here" for
//!   unclosed parentheses)
//! - `QueryError` for callers that want a hard failure instead of recovery

mod codes;
mod error;

pub use codes::ErrorCode;
pub use error::{QueryError, RelatedInfo, SyntaxError, SyntaxErrorBuilder};
