//! Cursor context: what the user is typing, or about to type.
//!
//! When the cursor touches a token the context comes from that token. When
//! it sits on whitespace after a token, the context moves one step along
//! key → operator → value → conjunction → key.

use smol_str::SmolStr;

use crate::base::LineIndex;
use crate::parser::{SyntaxKind, tokenize};

use super::query_pairs::{QueryPair, extract_query_pairs, is_pair_operator, select_current_pair};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QueryContext {
    /// Kind of the token the context was derived from
    #[cfg_attr(feature = "serde", serde(skip))]
    pub token_kind: Option<SyntaxKind>,
    pub text: SmolStr,
    pub start: usize,
    pub stop: usize,
    /// The cursor is on the token in `text` rather than past it
    pub on_token: bool,
    pub is_in_key: bool,
    pub is_in_operator: bool,
    pub is_in_value: bool,
    pub is_in_function: bool,
    pub is_in_conjunction: bool,
    pub is_in_parenthesis: bool,
    pub key_token: Option<SmolStr>,
    pub operator_token: Option<SmolStr>,
    pub value_token: Option<SmolStr>,
    pub query_pairs: Vec<QueryPair>,
    pub current_pair: Option<QueryPair>,
}

impl QueryContext {
    fn key_at(cursor: usize) -> Self {
        Self {
            start: cursor,
            stop: cursor,
            is_in_key: true,
            ..Default::default()
        }
    }
}

/// A non-trivia token with inclusive char offsets
struct Lexeme {
    kind: SyntaxKind,
    text: SmolStr,
    start: usize,
    stop: usize,
}

/// Determine the context at char offset `cursor` of `query`
pub fn query_context_at_cursor(query: &str, cursor: usize) -> QueryContext {
    let chars: Vec<char> = query.chars().collect();
    let cursor = cursor.min(chars.len());
    let lexemes = lexemes(query);

    let query_pairs = extract_query_pairs(query);
    let current_pair = select_current_pair(&query_pairs, cursor, chars.len()).cloned();

    if lexemes.is_empty() {
        return QueryContext {
            query_pairs,
            ..QueryContext::key_at(cursor)
        };
    }

    let at_space = chars.get(cursor).is_some_and(|c| c.is_whitespace());
    let after_space = cursor > 0 && chars[cursor - 1].is_whitespace();
    let last_before = lexemes.iter().rev().find(|l| l.stop < cursor);

    let mut context = match last_before {
        Some(prev) if at_space || after_space => {
            progress(prev, cursor, owning_pair(&query_pairs, prev.start))
        }
        _ => None,
    }
    .or_else(|| {
        lexemes
            .iter()
            .find(|l| l.start <= cursor && cursor <= l.stop + 1)
            .map(|l| on_token(l, owning_pair(&query_pairs, l.start)))
    })
    .unwrap_or_else(|| QueryContext::key_at(cursor));

    context.query_pairs = query_pairs;
    context.current_pair = current_pair;
    context
}

fn lexemes(query: &str) -> Vec<Lexeme> {
    let index = LineIndex::new(query);
    tokenize(query)
        .into_iter()
        .filter(|t| !t.kind.is_trivia())
        .map(|t| {
            let start = index.char_offset(t.offset);
            let stop = index.char_offset(t.end()).saturating_sub(1).max(start);
            Lexeme {
                kind: t.kind,
                text: t.text.into(),
                start,
                stop,
            }
        })
        .collect()
}

/// The pair whose key is the last one starting at or before `offset`
fn owning_pair(pairs: &[QueryPair], offset: usize) -> Option<&QueryPair> {
    pairs.iter().rev().find(|p| p.position.key_start <= offset)
}

/// Context after `prev` and some whitespace
fn progress(prev: &Lexeme, cursor: usize, pair: Option<&QueryPair>) -> Option<QueryContext> {
    let base = QueryContext {
        token_kind: Some(prev.kind),
        text: prev.text.clone(),
        start: cursor,
        stop: cursor,
        ..Default::default()
    };
    let pair_key = pair.map(|p| p.key.clone());

    let context = match prev.kind {
        SyntaxKind::KEY => QueryContext {
            is_in_operator: true,
            key_token: Some(prev.text.clone()),
            ..base
        },
        k if is_pair_operator(k) => QueryContext {
            is_in_value: true,
            operator_token: Some(prev.text.clone()),
            key_token: pair_key,
            ..base
        },
        k if k.is_literal() => QueryContext {
            is_in_conjunction: true,
            value_token: Some(prev.text.clone()),
            key_token: pair_key,
            operator_token: pair.and_then(|p| p.operator.clone()),
            ..base
        },
        k if k.is_conjunction() || k == SyntaxKind::L_PAREN => QueryContext {
            is_in_key: true,
            ..base
        },
        _ => return None,
    };
    Some(context)
}

/// Context of the token under the cursor
fn on_token(lexeme: &Lexeme, pair: Option<&QueryPair>) -> QueryContext {
    let kind = lexeme.kind;
    let is_in_key = kind == SyntaxKind::KEY;
    let is_in_operator = is_pair_operator(kind);
    let is_in_value = kind.is_literal();
    let text = lexeme.text.clone();

    let key_token = if is_in_key {
        Some(text.clone())
    } else if is_in_operator || is_in_value {
        pair.map(|p| p.key.clone())
    } else {
        None
    };
    let operator_token = if is_in_operator {
        Some(text.clone())
    } else if is_in_value {
        pair.and_then(|p| p.operator.clone())
    } else {
        None
    };

    QueryContext {
        token_kind: Some(kind),
        start: lexeme.start,
        stop: lexeme.stop,
        on_token: true,
        is_in_key,
        is_in_operator,
        is_in_value,
        is_in_function: kind.is_function_name(),
        is_in_conjunction: kind.is_conjunction(),
        is_in_parenthesis: kind.is_delimiter(),
        key_token,
        operator_token,
        value_token: is_in_value.then(|| text.clone()),
        text,
        ..Default::default()
    }
}
