//! Lowering tests: parsed queries to owned FilterExpr trees.

use rstest::rstest;
use fql::QueryError;
use fql::syntax::{CompareOp, FilterExpr, FunctionArg, FunctionName, Literal, Operand, unquote};

fn cmp(key: &str, op: CompareOp, operand: Operand) -> FilterExpr {
    FilterExpr::Comparison {
        key: key.into(),
        op,
        operand,
    }
}

fn num(n: f64) -> Operand {
    Operand::Single(Literal::Number(n))
}

fn text(s: &str) -> Literal {
    Literal::String(s.to_string())
}

#[test]
fn test_simple_comparison() {
    assert_eq!(
        FilterExpr::parse("status >= 500").unwrap(),
        cmp("status", CompareOp::Ge, num(500.0))
    );
}

#[test]
fn test_precedence() {
    assert_eq!(
        FilterExpr::parse(r#"a="1" OR b="2" AND c="3""#).unwrap(),
        FilterExpr::Or(vec![
            cmp("a", CompareOp::Eq, Operand::Single(text("1"))),
            FilterExpr::And(vec![
                cmp("b", CompareOp::Eq, Operand::Single(text("2"))),
                cmp("c", CompareOp::Eq, Operand::Single(text("3"))),
            ]),
        ])
    );
}

#[test]
fn test_group_and_negation() {
    assert_eq!(
        FilterExpr::parse("NOT (a = 1 OR b = 2) c EXISTS").unwrap(),
        FilterExpr::And(vec![
            FilterExpr::Not(Box::new(FilterExpr::Or(vec![
                cmp("a", CompareOp::Eq, num(1.0)),
                cmp("b", CompareOp::Eq, num(2.0)),
            ]))),
            cmp("c", CompareOp::Exists, Operand::None),
        ])
    );
}

#[rstest]
#[case("code IN (1, 2)", CompareOp::In, Operand::List(vec![Literal::Number(1.0), Literal::Number(2.0)]))]
#[case("env NOT IN ['a']", CompareOp::NotIn, Operand::List(vec![text("a")]))]
#[case("d NOT BETWEEN 1 AND 5", CompareOp::NotBetween, Operand::Range(Literal::Number(1.0), Literal::Number(5.0)))]
#[case("flag = TRUE", CompareOp::Eq, Operand::Single(Literal::Bool(true)))]
#[case("x not exists", CompareOp::NotExists, Operand::None)]
#[case("msg ILIKE '%TimeOut%'", CompareOp::ILike, Operand::Single(text("%TimeOut%")))]
#[case("v <> -2.5", CompareOp::NotEq, Operand::Single(Literal::Number(-2.5)))]
fn test_operands(#[case] input: &str, #[case] op: CompareOp, #[case] operand: Operand) {
    let key = input.split_whitespace().next().unwrap();
    assert_eq!(FilterExpr::parse(input).unwrap(), cmp(key, op, operand));
}

#[test]
fn test_function_and_full_text() {
    assert_eq!(
        FilterExpr::parse(r#"hasAny(tags, ["a", 'b']) 'disk full'"#).unwrap(),
        FilterExpr::And(vec![
            FilterExpr::Function {
                name: FunctionName::HasAny,
                params: vec![
                    FunctionArg::Key("tags".into()),
                    FunctionArg::Array(vec![text("a"), text("b")]),
                ],
            },
            FilterExpr::FullText("disk full".into()),
        ])
    );
}

#[test]
fn test_escapes_are_decoded() {
    assert_eq!(
        FilterExpr::parse(r"msg = 'it\'s'").unwrap(),
        cmp("msg", CompareOp::Eq, Operand::Single(text("it's")))
    );
    assert_eq!(unquote(r#""a\tb\\c""#), "a\tb\\c");
}

#[rstest]
#[case("")]
#[case("key=")]
#[case("(a = 1")]
#[case("a = 1 ~")]
fn test_syntax_errors_fail_lowering(#[case] input: &str) {
    match FilterExpr::parse(input) {
        Err(QueryError::Syntax(errors)) => assert!(!errors.is_empty()),
        other => panic!("expected syntax error for {input:?}, got {other:?}"),
    }
}
