//! Typed AST wrappers over the untyped rowan CST.
//!
//! Each struct wraps a SyntaxNode and provides methods to access children.
//! Accessors return `Option` because trees produced during error recovery
//! may be missing any child.

use super::syntax_kind::SyntaxKind;
use super::{SyntaxNode, SyntaxToken};

/// Trait for AST nodes that wrap a SyntaxNode
pub trait AstNode: Sized {
    fn can_cast(kind: SyntaxKind) -> bool;
    fn cast(node: SyntaxNode) -> Option<Self>;
    fn syntax(&self) -> &SyntaxNode;
}

// ============================================================================
// Helper macros
// ============================================================================

macro_rules! ast_node {
    ($name:ident, $kind:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(SyntaxNode);

        impl AstNode for $name {
            fn can_cast(kind: SyntaxKind) -> bool {
                kind == SyntaxKind::$kind
            }

            fn cast(node: SyntaxNode) -> Option<Self> {
                if Self::can_cast(node.kind()) {
                    Some(Self(node))
                } else {
                    None
                }
            }

            fn syntax(&self) -> &SyntaxNode {
                &self.0
            }
        }
    };
}

fn tokens(node: &SyntaxNode) -> impl Iterator<Item = SyntaxToken> + '_ {
    node.children_with_tokens().filter_map(|e| e.into_token())
}

fn first_token(node: &SyntaxNode, pred: impl Fn(SyntaxKind) -> bool) -> Option<SyntaxToken> {
    tokens(node).find(|t| pred(t.kind()))
}

// ============================================================================
// Root and connectives
// ============================================================================

ast_node!(Query, QUERY);

impl Query {
    /// Top-level expressions in source order
    pub fn expressions(&self) -> impl Iterator<Item = Expression> + '_ {
        self.0.children().filter_map(Expression::cast)
    }

    /// Explicit `AND` / `OR` tokens between top-level expressions
    pub fn conjunctions(&self) -> impl Iterator<Item = SyntaxToken> + '_ {
        tokens(&self.0).filter(|t| t.kind().is_conjunction())
    }
}

ast_node!(Expression, EXPRESSION);

impl Expression {
    pub fn or_expr(&self) -> Option<OrExpr> {
        self.0.children().find_map(OrExpr::cast)
    }
}

ast_node!(OrExpr, OR_EXPR);

impl OrExpr {
    pub fn operands(&self) -> impl Iterator<Item = AndExpr> + '_ {
        self.0.children().filter_map(AndExpr::cast)
    }
}

ast_node!(AndExpr, AND_EXPR);

impl AndExpr {
    pub fn operands(&self) -> impl Iterator<Item = UnaryExpr> + '_ {
        self.0.children().filter_map(UnaryExpr::cast)
    }
}

ast_node!(UnaryExpr, UNARY_EXPR);

impl UnaryExpr {
    /// Check for a leading `NOT`
    pub fn is_negated(&self) -> bool {
        first_token(&self.0, |k| k == SyntaxKind::NOT_KW).is_some()
    }

    pub fn primary(&self) -> Option<Primary> {
        self.0.children().find_map(Primary::cast)
    }
}

// ============================================================================
// Primary
// ============================================================================

ast_node!(Primary, PRIMARY);

/// The alternatives a primary can hold
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PrimaryKind {
    Group(OrExpr),
    Comparison(Comparison),
    FunctionCall(FunctionCall),
    FullText(FullText),
}

impl Primary {
    /// The parsed alternative; `None` when the content failed to parse
    pub fn kind(&self) -> Option<PrimaryKind> {
        self.0.children().find_map(|child| match child.kind() {
            SyntaxKind::OR_EXPR => Some(PrimaryKind::Group(OrExpr(child))),
            SyntaxKind::COMPARISON => Some(PrimaryKind::Comparison(Comparison(child))),
            SyntaxKind::FUNCTION_CALL => Some(PrimaryKind::FunctionCall(FunctionCall(child))),
            SyntaxKind::FULL_TEXT => Some(PrimaryKind::FullText(FullText(child))),
            _ => None,
        })
    }

    /// Check if this is a parenthesized group
    pub fn is_group(&self) -> bool {
        first_token(&self.0, |k| k == SyntaxKind::L_PAREN).is_some()
    }
}

// ============================================================================
// Comparison
// ============================================================================

ast_node!(Comparison, COMPARISON);

impl Comparison {
    pub fn key(&self) -> Option<Key> {
        self.0.children().find_map(Key::cast)
    }

    /// The operator token, absent for `IN` / `NOT IN` comparisons
    pub fn operator(&self) -> Option<SyntaxToken> {
        first_token(&self.0, SyntaxKind::is_comparison_operator)
    }

    /// Operand values: one for simple operators, two for ranges
    pub fn values(&self) -> impl Iterator<Item = Value> + '_ {
        self.0.children().filter_map(Value::cast)
    }

    pub fn in_clause(&self) -> Option<InClause> {
        self.0.children().find_map(InClause::cast)
    }

    pub fn not_in_clause(&self) -> Option<NotInClause> {
        self.0.children().find_map(NotInClause::cast)
    }
}

ast_node!(InClause, IN_CLAUSE);

impl InClause {
    pub fn value_list(&self) -> Option<ValueList> {
        self.0.children().find_map(ValueList::cast)
    }
}

ast_node!(NotInClause, NOT_IN_CLAUSE);

impl NotInClause {
    pub fn value_list(&self) -> Option<ValueList> {
        self.0.children().find_map(ValueList::cast)
    }
}

ast_node!(ValueList, VALUE_LIST);

impl ValueList {
    pub fn values(&self) -> impl Iterator<Item = Value> + '_ {
        self.0.children().filter_map(Value::cast)
    }
}

// ============================================================================
// Full text and functions
// ============================================================================

ast_node!(FullText, FULL_TEXT);

impl FullText {
    pub fn token(&self) -> Option<SyntaxToken> {
        first_token(&self.0, |k| k == SyntaxKind::QUOTED_TEXT)
    }
}

ast_node!(FunctionCall, FUNCTION_CALL);

impl FunctionCall {
    /// The function name token (`has`, `hasAny`, ...)
    pub fn name(&self) -> Option<SyntaxToken> {
        first_token(&self.0, SyntaxKind::is_function_name)
    }

    pub fn param_list(&self) -> Option<FunctionParamList> {
        self.0.children().find_map(FunctionParamList::cast)
    }

    pub fn params(&self) -> impl Iterator<Item = FunctionParam> {
        self.param_list()
            .into_iter()
            .flat_map(|list| list.params().collect::<Vec<_>>())
    }
}

ast_node!(FunctionParamList, FUNCTION_PARAM_LIST);

impl FunctionParamList {
    pub fn params(&self) -> impl Iterator<Item = FunctionParam> + '_ {
        self.0.children().filter_map(FunctionParam::cast)
    }
}

ast_node!(FunctionParam, FUNCTION_PARAM);

impl FunctionParam {
    pub fn key(&self) -> Option<Key> {
        self.0.children().find_map(Key::cast)
    }

    pub fn value(&self) -> Option<Value> {
        self.0.children().find_map(Value::cast)
    }

    pub fn array(&self) -> Option<Array> {
        self.0.children().find_map(Array::cast)
    }
}

ast_node!(Array, ARRAY);

impl Array {
    pub fn value_list(&self) -> Option<ValueList> {
        self.0.children().find_map(ValueList::cast)
    }
}

// ============================================================================
// Leaves
// ============================================================================

ast_node!(Value, VALUE);

impl Value {
    /// The literal token: quoted text, number or boolean
    pub fn token(&self) -> Option<SyntaxToken> {
        first_token(&self.0, SyntaxKind::is_literal)
    }
}

ast_node!(Key, KEY_NODE);

impl Key {
    pub fn token(&self) -> Option<SyntaxToken> {
        first_token(&self.0, |k| k == SyntaxKind::KEY)
    }

    /// The key text, e.g. `service.name`
    pub fn name(&self) -> Option<String> {
        self.token().map(|t| t.text().to_string())
    }
}
