//! IDE feature tests
//!
//! Tests for:
//! - Token classification through the analyzer
//! - Query pair extraction
//! - Cursor context
//! - Code completion
//! - Semantic tokens

pub mod tests_analyzer;
pub mod tests_completion;
pub mod tests_context;
pub mod tests_query_pairs;
pub mod tests_semantic_tokens;
