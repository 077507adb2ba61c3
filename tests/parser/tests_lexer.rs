//! Lexer tests: token kinds, keyword case, negation merging, coverage.

use rstest::rstest;
use fql::parser::{SyntaxKind, tokenize};

use crate::helpers::query_helpers::token_kinds;

#[rstest]
#[case("=", SyntaxKind::EQUALS)]
#[case("==", SyntaxKind::EQUALS)]
#[case("!=", SyntaxKind::NOT_EQUALS)]
#[case("<>", SyntaxKind::NEQ)]
#[case("<", SyntaxKind::LT)]
#[case("<=", SyntaxKind::LE)]
#[case(">", SyntaxKind::GT)]
#[case(">=", SyntaxKind::GE)]
#[case("LIKE", SyntaxKind::LIKE_KW)]
#[case("ilike", SyntaxKind::ILIKE_KW)]
#[case("Between", SyntaxKind::BETWEEN_KW)]
#[case("EXISTS", SyntaxKind::EXISTS_KW)]
#[case("regexp", SyntaxKind::REGEXP_KW)]
#[case("CONTAINS", SyntaxKind::CONTAINS_KW)]
#[case("in", SyntaxKind::IN_KW)]
#[case("NOT", SyntaxKind::NOT_KW)]
#[case("and", SyntaxKind::AND_KW)]
#[case("Or", SyntaxKind::OR_KW)]
#[case("has", SyntaxKind::HAS_KW)]
#[case("hasAny", SyntaxKind::HASANY_KW)]
#[case("HASALL", SyntaxKind::HASALL_KW)]
#[case("hasNone", SyntaxKind::HASNONE_KW)]
#[case("true", SyntaxKind::BOOL)]
#[case("FALSE", SyntaxKind::BOOL)]
#[case("42", SyntaxKind::NUMBER)]
#[case("-1.5", SyntaxKind::NUMBER)]
#[case("1e3", SyntaxKind::NUMBER)]
#[case("'single'", SyntaxKind::QUOTED_TEXT)]
#[case(r#""double \" escaped""#, SyntaxKind::QUOTED_TEXT)]
#[case("service.name", SyntaxKind::KEY)]
#[case("k8s.pod-name", SyntaxKind::KEY)]
#[case("tags[*]", SyntaxKind::KEY)]
#[case("(", SyntaxKind::L_PAREN)]
#[case("]", SyntaxKind::R_BRACKET)]
#[case(",", SyntaxKind::COMMA)]
fn test_single_token(#[case] input: &str, #[case] expected: SyntaxKind) {
    let tokens = tokenize(input);
    assert_eq!(tokens.len(), 1, "expected one token for {input:?}, got {tokens:?}");
    assert_eq!(tokens[0].kind, expected);
    assert_eq!(tokens[0].text, input);
}

#[rstest]
#[case("NOT LIKE", SyntaxKind::NOT_LIKE_KW)]
#[case("not ilike", SyntaxKind::NOT_ILIKE_KW)]
#[case("NOT   BETWEEN", SyntaxKind::NOT_BETWEEN_KW)]
#[case("NOT EXISTS", SyntaxKind::NOT_EXISTS_KW)]
#[case("NOT\tREGEXP", SyntaxKind::NOT_REGEXP_KW)]
#[case("NOT CONTAINS", SyntaxKind::NOT_CONTAINS_KW)]
#[case("NOT IN", SyntaxKind::NOT_IN_KW)]
fn test_negated_operator_is_one_token(#[case] input: &str, #[case] expected: SyntaxKind) {
    let tokens = tokenize(input);
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, expected);
    assert_eq!(tokens[0].text, input);
}

#[test]
fn test_not_before_key_stays_separate() {
    assert_eq!(
        token_kinds("NOT service EXISTS"),
        vec![SyntaxKind::NOT_KW, SyntaxKind::KEY, SyntaxKind::EXISTS_KW]
    );
}

#[test]
fn test_not_before_function_stays_separate() {
    assert_eq!(
        token_kinds("NOT has(x)")[..2].to_vec(),
        vec![SyntaxKind::NOT_KW, SyntaxKind::HAS_KW]
    );
}

#[rstest]
#[case("notation")]
#[case("android")]
#[case("inbox")]
#[case("true_value")]
#[case("hashes")]
#[case("order")]
fn test_keyword_prefix_is_key(#[case] input: &str) {
    assert_eq!(token_kinds(input), vec![SyntaxKind::KEY]);
}

#[test]
fn test_offsets_are_bytes() {
    let tokens = tokenize("é = 1");
    let eq = tokens.iter().find(|t| t.kind == SyntaxKind::EQUALS).unwrap();
    assert_eq!(u32::from(eq.offset), 3);
}

#[test]
fn test_unmatched_input_is_error_token() {
    assert!(token_kinds("a = ~").contains(&SyntaxKind::ERROR));
    assert!(token_kinds("a = 'open").contains(&SyntaxKind::ERROR));
}

#[rstest]
#[case("status = 200")]
#[case("  a != 'x'   AND  b NOT   IN [1, 2]  ")]
#[case("hasAny(tags, ['a', \"b\"]) OR 'free text'")]
#[case("a = ~ ! 'unterminated")]
#[case("ü € 漢字 = 1")]
#[case("")]
fn test_tokens_cover_input(#[case] input: &str) {
    let rebuilt: String = tokenize(input).iter().map(|t| t.text).collect();
    assert_eq!(rebuilt, input);
}
