//! Lowering of a parsed query into an owned expression tree.
//!
//! [`FilterExpr`] is the return-value-producing counterpart to the
//! listener: it drops trivia and punctuation, decodes literals and
//! flattens single-operand AND/OR levels. Lowering only accepts trees
//! without syntax errors.

use rowan::TextRange;
use smol_str::SmolStr;

use crate::parser::{
    self, AndExpr, AstNode, Comparison, ErrorCode, Expression, FunctionCall, FunctionParam,
    OrExpr, PrimaryKind, Query, QueryError, SyntaxError, SyntaxKind, SyntaxNode, SyntaxToken,
    UnaryExpr, Value, ValueList,
};

/// A decoded literal value
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Literal {
    String(String),
    Number(f64),
    Bool(bool),
}

/// Comparison operators, with `IN` / `NOT IN` folded in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CompareOp {
    Eq,
    NotEq,
    Lt,
    Le,
    Gt,
    Ge,
    Like,
    NotLike,
    ILike,
    NotILike,
    Between,
    NotBetween,
    Exists,
    NotExists,
    Regexp,
    NotRegexp,
    Contains,
    NotContains,
    In,
    NotIn,
}

impl CompareOp {
    pub fn from_kind(kind: SyntaxKind) -> Option<Self> {
        Some(match kind {
            SyntaxKind::EQUALS => Self::Eq,
            SyntaxKind::NOT_EQUALS | SyntaxKind::NEQ => Self::NotEq,
            SyntaxKind::LT => Self::Lt,
            SyntaxKind::LE => Self::Le,
            SyntaxKind::GT => Self::Gt,
            SyntaxKind::GE => Self::Ge,
            SyntaxKind::LIKE_KW => Self::Like,
            SyntaxKind::NOT_LIKE_KW => Self::NotLike,
            SyntaxKind::ILIKE_KW => Self::ILike,
            SyntaxKind::NOT_ILIKE_KW => Self::NotILike,
            SyntaxKind::BETWEEN_KW => Self::Between,
            SyntaxKind::NOT_BETWEEN_KW => Self::NotBetween,
            SyntaxKind::EXISTS_KW => Self::Exists,
            SyntaxKind::NOT_EXISTS_KW => Self::NotExists,
            SyntaxKind::REGEXP_KW => Self::Regexp,
            SyntaxKind::NOT_REGEXP_KW => Self::NotRegexp,
            SyntaxKind::CONTAINS_KW => Self::Contains,
            SyntaxKind::NOT_CONTAINS_KW => Self::NotContains,
            SyntaxKind::IN_KW => Self::In,
            SyntaxKind::NOT_IN_KW => Self::NotIn,
            _ => return None,
        })
    }
}

/// Right-hand side of a comparison
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Operand {
    /// `EXISTS` / `NOT EXISTS`
    None,
    Single(Literal),
    Range(Literal, Literal),
    List(Vec<Literal>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FunctionName {
    Has,
    HasAny,
    HasAll,
    HasNone,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FunctionArg {
    Key(SmolStr),
    Value(Literal),
    Array(Vec<Literal>),
}

/// Owned, decoded form of a filter query
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FilterExpr {
    And(Vec<FilterExpr>),
    Or(Vec<FilterExpr>),
    Not(Box<FilterExpr>),
    Comparison {
        key: SmolStr,
        op: CompareOp,
        operand: Operand,
    },
    FullText(String),
    Function {
        name: FunctionName,
        params: Vec<FunctionArg>,
    },
}

impl FilterExpr {
    /// Parse and lower in one step
    pub fn parse(input: &str) -> Result<FilterExpr, QueryError> {
        let parse = parser::parse(input).into_result()?;
        let query = parse
            .tree()
            .ok_or_else(|| incomplete(&parse.syntax(), "query"))?;
        lower(&query)
    }
}

/// Lower an error-free query tree.
///
/// Top-level expressions follow the same precedence as a parenthesized
/// group: juxtaposition and `AND` bind tighter than `OR`.
pub fn lower(query: &Query) -> Result<FilterExpr, QueryError> {
    let mut alternatives: Vec<Vec<FilterExpr>> = vec![Vec::new()];
    for element in query.syntax().children_with_tokens() {
        match element {
            rowan::NodeOrToken::Token(t) if t.kind() == SyntaxKind::OR_KW => {
                alternatives.push(Vec::new());
            }
            rowan::NodeOrToken::Node(node) => {
                if let Some(expr) = Expression::cast(node.clone()) {
                    let lowered = lower_expression(&expr)?;
                    if let Some(group) = alternatives.last_mut() {
                        group.push(lowered);
                    }
                } else if node.kind() == SyntaxKind::ERROR {
                    return Err(incomplete(&node, "query"));
                }
            }
            _ => {}
        }
    }

    let mut ors = alternatives
        .into_iter()
        .map(|group| collapse(group, FilterExpr::And))
        .collect::<Result<Vec<_>, _>>()?;
    if ors.len() == 1 {
        return Ok(ors.remove(0));
    }
    Ok(FilterExpr::Or(ors))
}

/// Wrap several operands, or return a single one as-is
fn collapse(
    mut items: Vec<FilterExpr>,
    wrap: fn(Vec<FilterExpr>) -> FilterExpr,
) -> Result<FilterExpr, QueryError> {
    match items.len() {
        0 => Err(QueryError::Syntax(vec![SyntaxError::new(
            "empty expression",
            TextRange::empty(0.into()),
            ErrorCode::E0401,
        )])),
        1 => Ok(items.remove(0)),
        _ => Ok(wrap(items)),
    }
}

fn lower_expression(expr: &Expression) -> Result<FilterExpr, QueryError> {
    let or = expr
        .or_expr()
        .ok_or_else(|| incomplete(expr.syntax(), "expression"))?;
    lower_or(&or)
}

fn lower_or(or: &OrExpr) -> Result<FilterExpr, QueryError> {
    let operands = or.operands().map(|a| lower_and(&a)).collect::<Result<_, _>>()?;
    collapse(operands, FilterExpr::Or)
}

fn lower_and(and: &AndExpr) -> Result<FilterExpr, QueryError> {
    let operands = and.operands().map(|u| lower_unary(&u)).collect::<Result<_, _>>()?;
    collapse(operands, FilterExpr::And)
}

fn lower_unary(unary: &UnaryExpr) -> Result<FilterExpr, QueryError> {
    let kind = unary
        .primary()
        .and_then(|p| p.kind())
        .ok_or_else(|| incomplete(unary.syntax(), "expression"))?;

    let inner = match kind {
        PrimaryKind::Group(or) => lower_or(&or)?,
        PrimaryKind::Comparison(cmp) => lower_comparison(&cmp)?,
        PrimaryKind::FunctionCall(call) => lower_function(&call)?,
        PrimaryKind::FullText(text) => {
            let token = text
                .token()
                .ok_or_else(|| incomplete(text.syntax(), "full text"))?;
            FilterExpr::FullText(unquote(token.text()))
        }
    };

    if unary.is_negated() {
        Ok(FilterExpr::Not(Box::new(inner)))
    } else {
        Ok(inner)
    }
}

fn lower_comparison(cmp: &Comparison) -> Result<FilterExpr, QueryError> {
    let key = cmp
        .key()
        .and_then(|k| k.token())
        .map(|t| SmolStr::new(t.text()))
        .ok_or_else(|| incomplete(cmp.syntax(), "comparison"))?;

    let (op, operand) = if let Some(clause) = cmp.in_clause() {
        (CompareOp::In, Operand::List(lower_list(clause.value_list(), clause.syntax())?))
    } else if let Some(clause) = cmp.not_in_clause() {
        (CompareOp::NotIn, Operand::List(lower_list(clause.value_list(), clause.syntax())?))
    } else {
        let op = cmp
            .operator()
            .and_then(|t| CompareOp::from_kind(t.kind()))
            .ok_or_else(|| incomplete(cmp.syntax(), "comparison"))?;
        let values = cmp.values().map(|v| lower_value(&v)).collect::<Result<Vec<_>, _>>()?;
        let operand = match (op, <[Literal; 2]>::try_from(values)) {
            (CompareOp::Exists | CompareOp::NotExists, _) => Operand::None,
            (CompareOp::Between | CompareOp::NotBetween, Ok([lo, hi])) => Operand::Range(lo, hi),
            (CompareOp::Between | CompareOp::NotBetween, Err(_)) => {
                return Err(incomplete(cmp.syntax(), "range"));
            }
            (_, Err(mut single)) if single.len() == 1 => Operand::Single(single.remove(0)),
            _ => return Err(incomplete(cmp.syntax(), "comparison")),
        };
        (op, operand)
    };

    Ok(FilterExpr::Comparison { key, op, operand })
}

fn lower_function(call: &FunctionCall) -> Result<FilterExpr, QueryError> {
    let name = match call.name().map(|t| t.kind()) {
        Some(SyntaxKind::HAS_KW) => FunctionName::Has,
        Some(SyntaxKind::HASANY_KW) => FunctionName::HasAny,
        Some(SyntaxKind::HASALL_KW) => FunctionName::HasAll,
        Some(SyntaxKind::HASNONE_KW) => FunctionName::HasNone,
        _ => return Err(incomplete(call.syntax(), "function call")),
    };
    let params = call.params().map(|p| lower_param(&p)).collect::<Result<_, _>>()?;
    Ok(FilterExpr::Function { name, params })
}

fn lower_param(param: &FunctionParam) -> Result<FunctionArg, QueryError> {
    if let Some(token) = param.key().and_then(|k| k.token()) {
        return Ok(FunctionArg::Key(SmolStr::new(token.text())));
    }
    if let Some(value) = param.value() {
        return lower_value(&value).map(FunctionArg::Value);
    }
    if let Some(array) = param.array() {
        return lower_list(array.value_list(), array.syntax()).map(FunctionArg::Array);
    }
    Err(incomplete(param.syntax(), "function parameter"))
}

fn lower_list(list: Option<ValueList>, parent: &SyntaxNode) -> Result<Vec<Literal>, QueryError> {
    list.ok_or_else(|| incomplete(parent, "value list"))?
        .values()
        .map(|v| lower_value(&v))
        .collect()
}

fn lower_value(value: &Value) -> Result<Literal, QueryError> {
    let token = value
        .token()
        .ok_or_else(|| incomplete(value.syntax(), "value"))?;
    decode_literal(&token)
}

/// Decode a literal token into its value
pub fn decode_literal(token: &SyntaxToken) -> Result<Literal, QueryError> {
    let text = token.text();
    match token.kind() {
        SyntaxKind::QUOTED_TEXT => Ok(Literal::String(unquote(text))),
        SyntaxKind::NUMBER => text
            .parse::<f64>()
            .map(Literal::Number)
            .map_err(|_| QueryError::InvalidNumber(text.to_string())),
        SyntaxKind::BOOL => Ok(Literal::Bool(text.eq_ignore_ascii_case("true"))),
        _ => Err(incomplete_token(token, "value")),
    }
}

/// Strip the surrounding quotes and resolve backslash escapes.
///
/// `\n`, `\t` and `\r` become control characters; any other escaped
/// character stands for itself.
pub fn unquote(text: &str) -> String {
    let inner = match text.chars().next() {
        Some(q @ ('"' | '\'')) if text.len() >= 2 && text.ends_with(q) => &text[1..text.len() - 1],
        _ => text,
    };

    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

fn incomplete(node: &SyntaxNode, what: &str) -> QueryError {
    QueryError::Syntax(vec![SyntaxError::new(
        format!("incomplete {what}"),
        node.text_range(),
        ErrorCode::E0901,
    )])
}

fn incomplete_token(token: &SyntaxToken, what: &str) -> QueryError {
    QueryError::Syntax(vec![SyntaxError::new(
        format!("incomplete {what}"),
        token.text_range(),
        ErrorCode::E0901,
    )])
}
