//! Analyzer tests: classification of a token of interest.

use rstest::rstest;
use fql::ide::{QueryAnalysis, TokenClass, TokenOfInterest, analyze_batch, analyze_query};
use fql::parser::{ParseOptions, tokenize};

use crate::helpers::query_helpers::{class_of, classified};

#[rstest]
#[case("status = 200")]
#[case("a IN (1,2) AND NOT b EXISTS")]
#[case(r#"hasNone(tags, ["x"]) OR "text""#)]
#[case("  padded  =  'value'  ")]
fn test_tokens_reconstruct_input(#[case] input: &str) {
    let rebuilt: String = tokenize(input).iter().map(|t| t.text).collect();
    assert_eq!(rebuilt, input);
}

#[rstest]
#[case("key", 0, 2, Some(TokenClass::Key))]
#[case("=", 3, 3, Some(TokenClass::Operator))]
#[case(r#""value""#, 4, 10, Some(TokenClass::Value))]
fn test_simple_comparison(
    #[case] text: &str,
    #[case] start: usize,
    #[case] stop: usize,
    #[case] expected: Option<TokenClass>,
) {
    assert_eq!(class_of(r#"key="value""#, text, start, stop), expected);
}

#[rstest]
#[case("(", 0, 0, None)]
#[case(")", 6, 6, None)]
#[case("a", 1, 1, Some(TokenClass::Key))]
#[case(r#""b""#, 3, 5, Some(TokenClass::Value))]
fn test_structural_tokens_unclassified(
    #[case] text: &str,
    #[case] start: usize,
    #[case] stop: usize,
    #[case] expected: Option<TokenClass>,
) {
    assert_eq!(class_of(r#"(a="b")"#, text, start, stop), expected);
}

#[test]
fn test_idempotent() {
    let input = "service = 'api' AND latency > 100";
    let token = TokenOfInterest::new("latency", 20, 26);
    let first = analyze_query(input, &token);
    let second = analyze_query(input, &token);
    assert_eq!(first, second);
    assert_eq!(first.map(|t| t.classification), Some(TokenClass::Key));
}

#[rstest]
#[case("status", 0, 5, Some(TokenClass::Key))]
#[case("IN", 7, 8, None)]
#[case("200", 11, 13, Some(TokenClass::Value))]
#[case("404", 15, 17, Some(TokenClass::Value))]
fn test_in_clause(
    #[case] text: &str,
    #[case] start: usize,
    #[case] stop: usize,
    #[case] expected: Option<TokenClass>,
) {
    assert_eq!(class_of("status IN (200,404)", text, start, stop), expected);
}

#[rstest]
#[case("key", 0, 2)]
#[case("=", 3, 3)]
fn test_missing_value_classifies_nothing(
    #[case] text: &str,
    #[case] start: usize,
    #[case] stop: usize,
) {
    assert_eq!(class_of("key=", text, start, stop), None);
    assert!(classified("key=").is_empty());
}

#[test]
fn test_exists_has_no_value() {
    assert_eq!(
        classified("key EXISTS"),
        vec![
            ("key".to_string(), 0, 2, TokenClass::Key),
            ("EXISTS".to_string(), 4, 9, TokenClass::Operator),
        ]
    );
}

#[test]
fn test_complete_prefix_survives_broken_tail() {
    let input = r#"a="b" AND key="#;
    assert_eq!(class_of(input, "a", 0, 0), Some(TokenClass::Key));
    assert_eq!(class_of(input, "=", 1, 1), Some(TokenClass::Operator));
    assert_eq!(class_of(input, r#""b""#, 2, 4), Some(TokenClass::Value));
    assert_eq!(class_of(input, "key", 10, 12), None);
}

#[rstest]
#[case("tags", 4, 7, Some(TokenClass::Key))]
#[case(r#""x""#, 10, 12, Some(TokenClass::Value))]
#[case("has", 0, 2, None)]
fn test_function_params(
    #[case] text: &str,
    #[case] start: usize,
    #[case] stop: usize,
    #[case] expected: Option<TokenClass>,
) {
    assert_eq!(class_of(r#"has(tags, "x")"#, text, start, stop), expected);
}

#[test]
fn test_between_bounds_and_keyword_operator() {
    let input = "d BETWEEN 1 AND 5";
    assert_eq!(class_of(input, "BETWEEN", 2, 8), Some(TokenClass::Operator));
    assert_eq!(class_of(input, "5", 16, 16), Some(TokenClass::Value));
    assert_eq!(class_of(input, "AND", 12, 14), None);
}

#[test]
fn test_negated_operator_is_one_token() {
    assert_eq!(
        class_of("name not like '%x%'", "not like", 5, 12),
        Some(TokenClass::Operator)
    );
}

#[test]
fn test_offsets_relative_to_trimmed_input() {
    let input = "\n   a = 1   ";
    assert_eq!(class_of(input, "a", 0, 0), Some(TokenClass::Key));
    assert_eq!(class_of(input, "a", 4, 4), None);
    assert_eq!(QueryAnalysis::new(input).text(), "a = 1");
}

#[test]
fn test_offsets_count_chars() {
    let input = "msg = 'héllo' AND n = 1";
    assert_eq!(class_of(input, "n", 18, 18), Some(TokenClass::Key));
}

#[test]
fn test_analysis_exposes_errors() {
    let analysis = QueryAnalysis::new("a = (");
    assert!(!analysis.errors().is_empty());
    assert!(!analysis.parse().ok());
}

#[test]
fn test_batch() {
    let requests = vec![
        ("a = 1", TokenOfInterest::new("a", 0, 0)),
        ("a = 1", TokenOfInterest::new("1", 4, 4)),
        ("b IN [2]", TokenOfInterest::new("IN", 2, 3)),
    ];
    let results = analyze_batch(&requests, &ParseOptions::default());
    let classes: Vec<_> = results
        .into_iter()
        .map(|r| r.map(|t| t.classification))
        .collect();
    assert_eq!(classes, [Some(TokenClass::Key), Some(TokenClass::Value), None]);
}

#[cfg(feature = "serde")]
#[test]
fn test_classified_token_serializes() {
    let token = analyze_query("a = 1", &TokenOfInterest::new("a", 0, 0)).unwrap();
    let json = serde_json::to_value(&token).unwrap();
    assert_eq!(json["classification"], "Key");
    assert_eq!(json["start_index"], 0);
}
