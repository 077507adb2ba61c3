//! Completion tests driven through the cursor context.

use fql::ide::{CompletionKind, completions, query_context_at_cursor};
use fql::keywords::{OPERATOR_KEYWORDS, OPERATOR_SYMBOLS};

fn labels_at(query: &str, cursor: usize) -> Vec<String> {
    completions(&query_context_at_cursor(query, cursor))
        .into_iter()
        .map(|item| item.label.to_string())
        .collect()
}

#[test]
fn test_operator_completions_list_every_operator() {
    let labels = labels_at("latency ", 8);
    assert_eq!(labels.len(), OPERATOR_SYMBOLS.len() + OPERATOR_KEYWORDS.len());
    // Symbols sort ahead of keyword operators
    assert_eq!(labels[..OPERATOR_SYMBOLS.len()], *OPERATOR_SYMBOLS);
}

#[test]
fn test_keyword_operators_insert_trailing_space() {
    let items = completions(&query_context_at_cursor("a ", 2));
    let between = items.iter().find(|i| i.label == "BETWEEN").unwrap();
    assert_eq!(between.insert_text.as_deref(), Some("BETWEEN "));
    assert_eq!(between.kind, CompletionKind::Operator);
    assert_eq!(between.kind.to_lsp(), 24);
}

#[test]
fn test_after_value_offers_conjunctions() {
    assert_eq!(labels_at("a = 'x' ", 8), ["AND", "OR"]);
}

#[test]
fn test_after_conjunction_offers_not_and_functions() {
    assert_eq!(
        labels_at("a = 1 OR ", 9),
        ["NOT", "has", "hasAny", "hasAll", "hasNone"]
    );
}

#[test]
fn test_prefix_filters_case_insensitively() {
    assert_eq!(labels_at("a = 1 AND HASN", 14), ["hasNone"]);
    assert_eq!(labels_at("a = 1 AND no", 12), ["NOT"]);
}

#[test]
fn test_no_completions_in_value_position() {
    assert!(labels_at("a IN ", 5).is_empty());
}
