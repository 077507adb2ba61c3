//! Grammar module for filter query parsing
//!
//! The parsing functions are generic over the `FilterQueryParser` trait
//! so they can be driven by any parser implementation, including the
//! single-rule parser used for testing fragments.

pub mod filter_query;

pub use filter_query::{FilterQueryParser, parse_query};
