//! Key/operator/value triplets recovered from the token stream.
//!
//! Works on tokens rather than the tree so that half-typed queries, which
//! the parser turns into error nodes, still yield their pairs.

use indexmap::IndexMap;
use smol_str::SmolStr;

use crate::base::LineIndex;
use crate::parser::{SyntaxKind, Token, tokenize};

/// Inclusive char offsets of the parts of a pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PairPosition {
    pub key_start: usize,
    pub key_end: usize,
    pub operator_start: Option<usize>,
    pub operator_end: Option<usize>,
    pub value_start: Option<usize>,
    pub value_end: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QueryPair {
    pub key: SmolStr,
    pub operator: Option<SmolStr>,
    pub value: Option<SmolStr>,
    pub position: PairPosition,
    pub is_complete: bool,
}

impl QueryPair {
    /// Offset of the last char of the rightmost part present
    pub fn end(&self) -> usize {
        let p = &self.position;
        p.value_end.or(p.operator_end).unwrap_or(p.key_end)
    }
}

/// Tokens that can sit between a key and its value
pub(crate) fn is_pair_operator(kind: SyntaxKind) -> bool {
    kind.is_comparison_operator()
        || matches!(kind, SyntaxKind::IN_KW | SyntaxKind::NOT_IN_KW | SyntaxKind::NOT_KW)
}

/// Build a pair per key in `query`, in source order
pub fn extract_query_pairs(query: &str) -> Vec<QueryPair> {
    let index = LineIndex::new(query);
    let mut builder = PairBuilder::default();

    for token in tokenize(query).iter().filter(|t| !t.kind.is_trivia()) {
        let (start, end) = char_span(&index, token);
        match token.kind {
            SyntaxKind::KEY => builder.start(token.text, start, end),
            k if is_pair_operator(k) => builder.operator(k, token.text, start, end),
            k if k.is_literal() => builder.value(token.text, start, end),
            k if k.is_conjunction() => builder.flush(),
            _ => {}
        }
    }
    builder.flush();
    builder.pairs
}

/// The pair the cursor is at or just after.
///
/// Picks the rightmost pair ending at or before `cursor`; when none does and
/// the cursor is at or past the end of the query, the last pair.
pub fn current_query_pair(query: &str, cursor: usize) -> Option<QueryPair> {
    let pairs = extract_query_pairs(query);
    select_current_pair(&pairs, cursor, query.chars().count()).cloned()
}

pub(crate) fn select_current_pair(
    pairs: &[QueryPair],
    cursor: usize,
    query_len: usize,
) -> Option<&QueryPair> {
    let best = pairs
        .iter()
        .filter(|p| p.end() <= cursor)
        .max_by_key(|p| p.end());
    match best {
        Some(pair) => Some(pair),
        None if cursor > 0 && cursor >= query_len => pairs.last(),
        None => None,
    }
}

/// Group pairs by key, keeping the order in which keys first appear
pub fn pairs_by_key(pairs: &[QueryPair]) -> IndexMap<SmolStr, Vec<QueryPair>> {
    let mut grouped: IndexMap<SmolStr, Vec<QueryPair>> = IndexMap::new();
    for pair in pairs {
        grouped.entry(pair.key.clone()).or_default().push(pair.clone());
    }
    grouped
}

fn char_span(index: &LineIndex, token: &Token<'_>) -> (usize, usize) {
    let start = index.char_offset(token.offset);
    let end = index.char_offset(token.end()).saturating_sub(1).max(start);
    (start, end)
}

#[derive(Default)]
struct PairBuilder {
    pairs: Vec<QueryPair>,
    current: Option<QueryPair>,
    /// Operator of `current` takes no value (`EXISTS`)
    valueless: bool,
}

impl PairBuilder {
    fn start(&mut self, key: &str, start: usize, end: usize) {
        self.flush();
        self.current = Some(QueryPair {
            key: key.into(),
            operator: None,
            value: None,
            position: PairPosition {
                key_start: start,
                key_end: end,
                ..Default::default()
            },
            is_complete: false,
        });
    }

    fn operator(&mut self, kind: SyntaxKind, text: &str, start: usize, end: usize) {
        if let Some(pair) = self.current.as_mut().filter(|p| p.operator.is_none()) {
            self.valueless = matches!(kind, SyntaxKind::EXISTS_KW | SyntaxKind::NOT_EXISTS_KW);
            pair.operator = Some(text.into());
            pair.position.operator_start = Some(start);
            pair.position.operator_end = Some(end);
        }
    }

    fn value(&mut self, text: &str, start: usize, end: usize) {
        if let Some(pair) = self
            .current
            .as_mut()
            .filter(|p| p.operator.is_some() && p.value.is_none())
        {
            pair.value = Some(text.into());
            pair.position.value_start = Some(start);
            pair.position.value_end = Some(end);
        }
    }

    fn flush(&mut self) {
        if let Some(mut pair) = self.current.take() {
            pair.is_complete = pair.operator.is_some() && (pair.value.is_some() || self.valueless);
            self.pairs.push(pair);
        }
        self.valueless = false;
    }
}
