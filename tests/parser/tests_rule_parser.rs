//! Rule-based parser tests
//!
//! Each grammar rule can be parsed on its own, which keeps fragment tests
//! free of the surrounding query.

use rstest::rstest;
use fql::parser::rule_parser::{Rule, parse_rule, parse_rule_named};
use fql::parser::{ErrorCode, QueryError};

/// Helper to assert that a rule parses successfully and consumes all input
fn assert_rule_parses(rule: Rule, input: &str, desc: &str) {
    let result = parse_rule(rule, input);
    assert!(
        result.is_ok(),
        "Failed to parse {} as {:?}: {:?}\nInput: {}",
        desc,
        rule,
        result.errors(),
        input
    );
    assert!(result.fully_consumed(), "{desc}: input left over");
    assert!(result.node().is_some(), "{desc}: no {} node", rule.name());
}

#[rstest]
#[case(Rule::Query, "a = 1 OR b = 2", "query")]
#[case(Rule::Expression, "'text'", "expression")]
#[case(Rule::OrExpression, "a = 1 OR b EXISTS", "or expression")]
#[case(Rule::AndExpression, "a = 1 b = 2", "implicit and")]
#[case(Rule::UnaryExpression, "NOT a EXISTS", "negation")]
#[case(Rule::Primary, "(a = 1)", "group")]
#[case(Rule::Comparison, "latency BETWEEN 10 AND 20", "between")]
#[case(Rule::Comparison, "name NOT LIKE '%x%'", "not like")]
#[case(Rule::InClause, "IN (1, 2)", "in with parens")]
#[case(Rule::NotInClause, "NOT IN ['a']", "not in with brackets")]
#[case(Rule::ValueList, "1, 'a', false", "mixed values")]
#[case(Rule::FullText, "\"free text\"", "full text")]
#[case(Rule::FunctionCall, "hasAll(tags, ['a', 'b'])", "function call")]
#[case(Rule::FunctionParamList, "a, 1, [2]", "param list")]
#[case(Rule::FunctionParam, "[1]", "array param")]
#[case(Rule::Array, "[1, 2]", "array")]
#[case(Rule::Value, "true", "bool value")]
#[case(Rule::Key, "service.name", "key")]
fn test_rule_parses(#[case] rule: Rule, #[case] input: &str, #[case] desc: &str) {
    assert_rule_parses(rule, input, desc);
}

#[rstest]
#[case(Rule::Value, "abc")]
#[case(Rule::Key, "'quoted'")]
#[case(Rule::Array, "(1)")]
#[case(Rule::InClause, "NOT IN (1)")]
#[case(Rule::FunctionCall, "count(x)")]
fn test_rule_rejects(#[case] rule: Rule, #[case] input: &str) {
    let result = parse_rule(rule, input);
    assert!(!result.is_ok(), "{input:?} should not parse as {rule:?}");
    assert!(result.into_node().is_err());
}

#[test]
fn test_trailing_input_is_reported() {
    let result = parse_rule(Rule::Key, "a b");
    assert!(!result.fully_consumed());
    assert_eq!(result.errors()[0].code, ErrorCode::E0901);
    assert_eq!(result.syntax().text().to_string(), "a b");
}

#[test]
fn test_rule_names_round_trip() {
    for rule in Rule::ALL {
        assert_eq!(rule.name().parse::<Rule>().unwrap(), *rule);
    }
}

#[test]
fn test_named_rules() {
    let result = parse_rule_named("Comparison", "a >= 3").unwrap();
    assert_eq!(result.rule, Rule::Comparison);
    assert!(result.is_ok());

    assert!(matches!(
        parse_rule_named("statement", "a = 1"),
        Err(QueryError::InvalidRule(_))
    ));
}
