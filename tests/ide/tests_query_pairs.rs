//! Query pair extraction tests.

use rstest::rstest;
use fql::ide::{current_query_pair, extract_query_pairs, pairs_by_key};

#[test]
fn test_pairs_across_conjunctions() {
    let pairs = extract_query_pairs("a = 1 AND b IN (1, 2) OR c EXISTS");
    let summary: Vec<_> = pairs
        .iter()
        .map(|p| (p.key.as_str(), p.operator.as_deref(), p.value.as_deref(), p.is_complete))
        .collect();
    assert_eq!(
        summary,
        [
            ("a", Some("="), Some("1"), true),
            ("b", Some("IN"), Some("1"), true),
            ("c", Some("EXISTS"), None, true),
        ]
    );
}

#[rstest]
#[case("service", None, None)]
#[case("service =", Some("="), None)]
#[case("service NOT LIKE", Some("NOT LIKE"), None)]
fn test_incomplete_pairs(
    #[case] query: &str,
    #[case] operator: Option<&str>,
    #[case] value: Option<&str>,
) {
    let pairs = extract_query_pairs(query);
    assert_eq!(pairs.len(), 1);
    assert_eq!(pairs[0].operator.as_deref(), operator);
    assert_eq!(pairs[0].value.as_deref(), value);
    assert!(!pairs[0].is_complete);
}

#[test]
fn test_positions_are_inclusive_chars() {
    let pairs = extract_query_pairs("名 = 'x' AND key != 'ü'");
    // The non-ASCII key does not lex as a key, so only one pair is found
    assert_eq!(pairs.len(), 1);
    let position = pairs[0].position;
    assert_eq!((position.key_start, position.key_end), (12, 14));
    assert_eq!((position.operator_start, position.operator_end), (Some(16), Some(17)));
    assert_eq!((position.value_start, position.value_end), (Some(19), Some(21)));
}

#[test]
fn test_function_params_do_not_form_pairs_with_values() {
    let pairs = extract_query_pairs("has(tags, 'x')");
    assert_eq!(pairs.len(), 1);
    assert_eq!(pairs[0].key, "tags");
    assert!(pairs[0].operator.is_none());
}

#[rstest]
#[case(0, None)]
#[case(5, Some("a"))]
#[case(11, Some("a"))]
#[case(15, Some("b"))]
fn test_current_pair(#[case] cursor: usize, #[case] expected: Option<&str>) {
    let pair = current_query_pair("a = 1 AND b = 2", cursor);
    assert_eq!(pair.as_ref().map(|p| p.key.as_str()), expected);
}

#[test]
fn test_grouping_keeps_first_appearance_order() {
    let pairs = extract_query_pairs("env = 'a' OR svc = 'b' OR env = 'c'");
    let grouped = pairs_by_key(&pairs);
    let keys: Vec<_> = grouped.keys().map(|k| k.as_str()).collect();
    assert_eq!(keys, ["env", "svc"]);
    let values: Vec<_> = grouped["env"]
        .iter()
        .filter_map(|p| p.value.as_deref())
        .collect();
    assert_eq!(values, ["'a'", "'c'"]);
}
