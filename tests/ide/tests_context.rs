//! Cursor context tests.

use rstest::rstest;
use fql::ide::{QueryContext, query_context_at_cursor};

#[derive(Debug, PartialEq)]
enum Slot {
    Key,
    Operator,
    Value,
    Conjunction,
    Function,
    Parenthesis,
}

fn slot(ctx: &QueryContext) -> Option<Slot> {
    match ctx {
        c if c.is_in_key => Some(Slot::Key),
        c if c.is_in_operator => Some(Slot::Operator),
        c if c.is_in_value => Some(Slot::Value),
        c if c.is_in_conjunction => Some(Slot::Conjunction),
        c if c.is_in_function => Some(Slot::Function),
        c if c.is_in_parenthesis => Some(Slot::Parenthesis),
        _ => None,
    }
}

#[rstest]
#[case("", 0, Slot::Key)]
#[case("serv", 4, Slot::Key)]
#[case("service ", 8, Slot::Operator)]
#[case("service =", 9, Slot::Operator)]
#[case("service = ", 10, Slot::Value)]
#[case("service = 'api' ", 16, Slot::Conjunction)]
#[case("service = 'api' AND", 19, Slot::Conjunction)]
#[case("service = 'api' AND ", 20, Slot::Key)]
#[case("(", 1, Slot::Parenthesis)]
#[case("( ", 2, Slot::Key)]
#[case("hasAll", 3, Slot::Function)]
#[case("code NOT IN ", 12, Slot::Value)]
fn test_slot_at_cursor(#[case] query: &str, #[case] cursor: usize, #[case] expected: Slot) {
    let ctx = query_context_at_cursor(query, cursor);
    assert_eq!(slot(&ctx), Some(expected), "{query:?} at {cursor}: {ctx:?}");
}

#[test]
fn test_value_context_names_its_key_and_operator() {
    let ctx = query_context_at_cursor("a = 1 AND latency >= ", 21);
    assert!(ctx.is_in_value);
    assert_eq!(ctx.key_token.as_deref(), Some("latency"));
    assert_eq!(ctx.operator_token.as_deref(), Some(">="));
    assert_eq!(ctx.query_pairs.len(), 2);
}

#[test]
fn test_conjunction_context_carries_the_finished_pair() {
    let ctx = query_context_at_cursor("env = 'prod' ", 13);
    assert!(ctx.is_in_conjunction);
    assert_eq!(ctx.key_token.as_deref(), Some("env"));
    assert_eq!(ctx.value_token.as_deref(), Some("'prod'"));
    assert!(ctx.current_pair.unwrap().is_complete);
}

#[test]
fn test_token_bounds_when_on_token() {
    let ctx = query_context_at_cursor("a = 1 AND status", 12);
    assert!(ctx.on_token);
    assert_eq!(ctx.text, "status");
    assert_eq!((ctx.start, ctx.stop), (10, 15));
}

#[test]
fn test_cursor_past_end_is_clamped() {
    let ctx = query_context_at_cursor("a = ", 100);
    assert!(ctx.is_in_value);
}
