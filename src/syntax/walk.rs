//! Listener pattern for filter query tree traversal.
//!
//! [`walk`] performs a pre-order traversal and dispatches on the node kind,
//! calling `enter_*` before a node's children and `exit_*` after them.
//! Subtrees that failed to parse are reported through
//! [`QueryListener::visit_error`] and never descended into.

use rowan::WalkEvent;

use crate::parser::{
    AndExpr, Array, AstNode, Comparison, Expression, FullText, FunctionCall, FunctionParam,
    InClause, Key, NotInClause, OrExpr, Primary, Query, SyntaxKind, SyntaxNode, UnaryExpr, Value,
    ValueList,
};

/// Listener trait for filter query trees.
///
/// Implement this trait to define custom behavior when walking a parsed
/// query. Default implementations are no-ops.
pub trait QueryListener {
    fn enter_query(&mut self, _query: &Query) {}
    fn exit_query(&mut self, _query: &Query) {}
    fn enter_expression(&mut self, _expr: &Expression) {}
    fn enter_or_expr(&mut self, _expr: &OrExpr) {}
    fn exit_or_expr(&mut self, _expr: &OrExpr) {}
    fn enter_and_expr(&mut self, _expr: &AndExpr) {}
    fn exit_and_expr(&mut self, _expr: &AndExpr) {}
    fn enter_unary_expr(&mut self, _expr: &UnaryExpr) {}
    fn enter_primary(&mut self, _primary: &Primary) {}
    fn enter_comparison(&mut self, _comparison: &Comparison) {}
    fn exit_comparison(&mut self, _comparison: &Comparison) {}
    fn enter_in_clause(&mut self, _clause: &InClause) {}
    fn enter_not_in_clause(&mut self, _clause: &NotInClause) {}
    fn enter_value_list(&mut self, _list: &ValueList) {}
    fn enter_full_text(&mut self, _text: &FullText) {}
    fn enter_function_call(&mut self, _call: &FunctionCall) {}
    fn exit_function_call(&mut self, _call: &FunctionCall) {}
    fn enter_function_param(&mut self, _param: &FunctionParam) {}
    fn enter_array(&mut self, _array: &Array) {}
    fn enter_value(&mut self, _value: &Value) {}
    fn enter_key(&mut self, _key: &Key) {}
    /// Called for each `ERROR` node; its children are skipped
    fn visit_error(&mut self, _node: &SyntaxNode) {}
}

/// Walk `root` and everything below it in pre-order
pub fn walk<L: QueryListener + ?Sized>(root: &SyntaxNode, listener: &mut L) {
    let mut events = root.preorder();
    while let Some(event) = events.next() {
        match event {
            WalkEvent::Enter(node) if node.kind() == SyntaxKind::ERROR => {
                listener.visit_error(&node);
                events.skip_subtree();
            }
            WalkEvent::Enter(node) => enter(listener, node),
            WalkEvent::Leave(node) => exit(listener, node),
        }
    }
}

/// Match on the node kind, cast to the typed wrapper and call the listener
macro_rules! dispatch {
    ($l:ident, $node:ident, { $($kind:ident => $ty:ident :: $method:ident),* $(,)? }) => {
        match $node.kind() {
            $(SyntaxKind::$kind => {
                if let Some(n) = $ty::cast($node) {
                    $l.$method(&n);
                }
            })*
            _ => {}
        }
    };
}

fn enter<L: QueryListener + ?Sized>(l: &mut L, node: SyntaxNode) {
    dispatch!(l, node, {
        QUERY => Query::enter_query,
        EXPRESSION => Expression::enter_expression,
        OR_EXPR => OrExpr::enter_or_expr,
        AND_EXPR => AndExpr::enter_and_expr,
        UNARY_EXPR => UnaryExpr::enter_unary_expr,
        PRIMARY => Primary::enter_primary,
        COMPARISON => Comparison::enter_comparison,
        IN_CLAUSE => InClause::enter_in_clause,
        NOT_IN_CLAUSE => NotInClause::enter_not_in_clause,
        VALUE_LIST => ValueList::enter_value_list,
        FULL_TEXT => FullText::enter_full_text,
        FUNCTION_CALL => FunctionCall::enter_function_call,
        FUNCTION_PARAM => FunctionParam::enter_function_param,
        ARRAY => Array::enter_array,
        VALUE => Value::enter_value,
        KEY_NODE => Key::enter_key,
    });
}

fn exit<L: QueryListener + ?Sized>(l: &mut L, node: SyntaxNode) {
    dispatch!(l, node, {
        QUERY => Query::exit_query,
        OR_EXPR => OrExpr::exit_or_expr,
        AND_EXPR => AndExpr::exit_and_expr,
        COMPARISON => Comparison::exit_comparison,
        FUNCTION_CALL => FunctionCall::exit_function_call,
    });
}
