//! IDE features: high-level APIs for editors embedding the query language.
//!
//! ## Design Principles
//!
//! 1. **Pure functions**: Take a query in, return data out
//! 2. **No LSP types**: Uses our own types, converted at the LSP boundary
//!
//! ## Usage
//!
//! ```
//! use fql::ide::{completions, query_context_at_cursor};
//!
//! let context = query_context_at_cursor("status ", 7);
//! assert!(context.is_in_operator);
//! assert!(completions(&context).iter().any(|item| item.label == ">="));
//! ```

mod analysis;
mod classify;
mod completion;
mod context;
mod query_pairs;
mod semantic_tokens;

pub use analysis::{QueryAnalysis, TokenOfInterest, analyze_batch, analyze_query, analyze_query_with};
pub use classify::{ClassifiedToken, TokenClass, classify_tokens};
pub use completion::{CompletionItem, CompletionKind, completions};
pub use context::{QueryContext, query_context_at_cursor};
pub use query_pairs::{PairPosition, QueryPair, current_query_pair, extract_query_pairs, pairs_by_key};
pub use semantic_tokens::{SemanticToken, TokenType, semantic_tokens};
