//! Shared helpers for integration tests

pub mod query_helpers;
pub mod tree_helpers;
