//! Reserved words of the filter query language.
//!
//! The lexer recognizes these itself; this table exists for tooling that
//! needs to list or look up keywords (completion, highlighting, docs).

use std::sync::LazyLock;

use rustc_hash::FxHashMap;

use super::syntax_kind::SyntaxKind;

/// Comparison operator keywords, in the order they are offered to users.
pub const OPERATOR_KEYWORDS: &[&str] = &[
    "LIKE",
    "NOT LIKE",
    "ILIKE",
    "NOT ILIKE",
    "BETWEEN",
    "NOT BETWEEN",
    "EXISTS",
    "NOT EXISTS",
    "REGEXP",
    "NOT REGEXP",
    "CONTAINS",
    "NOT CONTAINS",
    "IN",
    "NOT IN",
];

/// Symbolic comparison operators.
pub const OPERATOR_SYMBOLS: &[&str] = &["=", "!=", "<>", "<", "<=", ">", ">="];

/// Logical connectives.
pub const CONJUNCTIONS: &[&str] = &["AND", "OR"];

/// Function names usable as `name(param, ...)`.
pub const FUNCTIONS: &[&str] = &["has", "hasAny", "hasAll", "hasNone"];

/// Boolean literals.
pub const BOOLEANS: &[&str] = &["true", "false"];

static KEYWORDS: LazyLock<FxHashMap<&'static str, SyntaxKind>> = LazyLock::new(|| {
    let mut map = FxHashMap::default();
    map.insert("and", SyntaxKind::AND_KW);
    map.insert("or", SyntaxKind::OR_KW);
    map.insert("not", SyntaxKind::NOT_KW);
    map.insert("like", SyntaxKind::LIKE_KW);
    map.insert("ilike", SyntaxKind::ILIKE_KW);
    map.insert("between", SyntaxKind::BETWEEN_KW);
    map.insert("exists", SyntaxKind::EXISTS_KW);
    map.insert("regexp", SyntaxKind::REGEXP_KW);
    map.insert("contains", SyntaxKind::CONTAINS_KW);
    map.insert("in", SyntaxKind::IN_KW);
    map.insert("has", SyntaxKind::HAS_KW);
    map.insert("hasany", SyntaxKind::HASANY_KW);
    map.insert("hasall", SyntaxKind::HASALL_KW);
    map.insert("hasnone", SyntaxKind::HASNONE_KW);
    map.insert("true", SyntaxKind::BOOL);
    map.insert("false", SyntaxKind::BOOL);
    map
});

/// Look up a single word, ignoring ASCII case.
pub fn lookup(word: &str) -> Option<SyntaxKind> {
    KEYWORDS.get(word.to_ascii_lowercase().as_str()).copied()
}

/// Check whether `word` is reserved and therefore can never lex as a key.
pub fn is_reserved(word: &str) -> bool {
    lookup(word).is_some()
}
