//! Rule-based parser for testing individual grammar rules
//!
//! Parses a single grammar construct without requiring a full query
//! around it. Useful for testing specific rules in isolation.
//!
//! # Example
//!
//! ```
//! use fql::parser::rule_parser::{Rule, parse_rule};
//!
//! let result = parse_rule(Rule::Comparison, "latency BETWEEN 10 AND 20");
//! assert!(result.is_ok());
//! ```

use std::str::FromStr;

use super::errors::{ErrorCode, QueryError, SyntaxError};
use super::grammar::{FilterQueryParser, filter_query as g};
use super::lexer::Lexer;
use super::parser::{Parse, ParseOptions, Parser};
use super::syntax_kind::SyntaxKind;
use super::SyntaxNode;

/// Grammar rules that can be parsed individually
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    Query,
    Expression,
    OrExpression,
    AndExpression,
    UnaryExpression,
    Primary,
    Comparison,
    InClause,
    NotInClause,
    ValueList,
    FullText,
    FunctionCall,
    FunctionParamList,
    FunctionParam,
    Array,
    Value,
    Key,
}

impl Rule {
    pub const ALL: &'static [Rule] = &[
        Rule::Query,
        Rule::Expression,
        Rule::OrExpression,
        Rule::AndExpression,
        Rule::UnaryExpression,
        Rule::Primary,
        Rule::Comparison,
        Rule::InClause,
        Rule::NotInClause,
        Rule::ValueList,
        Rule::FullText,
        Rule::FunctionCall,
        Rule::FunctionParamList,
        Rule::FunctionParam,
        Rule::Array,
        Rule::Value,
        Rule::Key,
    ];

    /// Rule name as written in the grammar
    pub fn name(self) -> &'static str {
        match self {
            Rule::Query => "query",
            Rule::Expression => "expression",
            Rule::OrExpression => "orExpression",
            Rule::AndExpression => "andExpression",
            Rule::UnaryExpression => "unaryExpression",
            Rule::Primary => "primary",
            Rule::Comparison => "comparison",
            Rule::InClause => "inClause",
            Rule::NotInClause => "notInClause",
            Rule::ValueList => "valueList",
            Rule::FullText => "fullText",
            Rule::FunctionCall => "functionCall",
            Rule::FunctionParamList => "functionParamList",
            Rule::FunctionParam => "functionParam",
            Rule::Array => "array",
            Rule::Value => "value",
            Rule::Key => "key",
        }
    }

    /// Node kind produced by this rule on success
    pub fn node_kind(self) -> SyntaxKind {
        match self {
            Rule::Query => SyntaxKind::QUERY,
            Rule::Expression => SyntaxKind::EXPRESSION,
            Rule::OrExpression => SyntaxKind::OR_EXPR,
            Rule::AndExpression => SyntaxKind::AND_EXPR,
            Rule::UnaryExpression => SyntaxKind::UNARY_EXPR,
            Rule::Primary => SyntaxKind::PRIMARY,
            Rule::Comparison => SyntaxKind::COMPARISON,
            Rule::InClause => SyntaxKind::IN_CLAUSE,
            Rule::NotInClause => SyntaxKind::NOT_IN_CLAUSE,
            Rule::ValueList => SyntaxKind::VALUE_LIST,
            Rule::FullText => SyntaxKind::FULL_TEXT,
            Rule::FunctionCall => SyntaxKind::FUNCTION_CALL,
            Rule::FunctionParamList => SyntaxKind::FUNCTION_PARAM_LIST,
            Rule::FunctionParam => SyntaxKind::FUNCTION_PARAM,
            Rule::Array => SyntaxKind::ARRAY,
            Rule::Value => SyntaxKind::VALUE,
            Rule::Key => SyntaxKind::KEY_NODE,
        }
    }

    /// Token that must start the rule, for rules that would otherwise
    /// consume an arbitrary first token
    fn required_start(self, kind: SyntaxKind) -> bool {
        match self {
            Rule::Comparison | Rule::Key => kind == SyntaxKind::KEY,
            Rule::InClause => kind == SyntaxKind::IN_KW,
            Rule::NotInClause => kind == SyntaxKind::NOT_IN_KW,
            Rule::FullText => kind == SyntaxKind::QUOTED_TEXT,
            Rule::FunctionCall => kind.is_function_name(),
            Rule::Array => kind == SyntaxKind::L_BRACKET,
            _ => true,
        }
    }
}

impl FromStr for Rule {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Rule::ALL
            .iter()
            .copied()
            .find(|rule| rule.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| QueryError::InvalidRule(format!("unknown rule '{s}'")))
    }
}

/// Result of parsing a single rule
#[derive(Debug, Clone)]
pub struct RuleParseResult {
    pub parse: Parse,
    pub rule: Rule,
    pub input: String,
}

impl RuleParseResult {
    /// Check if parsing succeeded without errors
    pub fn is_ok(&self) -> bool {
        self.parse.ok()
    }

    /// Get parse errors
    pub fn errors(&self) -> &[SyntaxError] {
        &self.parse.errors
    }

    /// Get the syntax tree root
    pub fn syntax(&self) -> SyntaxNode {
        self.parse.syntax()
    }

    /// The node built for the requested rule, if it parsed
    pub fn node(&self) -> Option<SyntaxNode> {
        let kind = self.rule.node_kind();
        self.syntax().descendants().find(|n| n.kind() == kind)
    }

    /// Check if the rule consumed all input
    pub fn fully_consumed(&self) -> bool {
        !self
            .errors()
            .iter()
            .any(|e| e.code == ErrorCode::E0901 && e.message == "unexpected trailing input")
    }

    /// Strict form: the rule's node, or every error that was reported
    pub fn into_node(self) -> Result<SyntaxNode, QueryError> {
        if !self.parse.ok() {
            return Err(QueryError::Syntax(self.parse.errors));
        }
        self.node().ok_or_else(|| {
            QueryError::InvalidRule(format!("'{}' is not a {}", self.input, self.rule.name()))
        })
    }
}

/// Parse input as a specific grammar rule
pub fn parse_rule(rule: Rule, input: &str) -> RuleParseResult {
    let tokens: Vec<_> = Lexer::new(input).collect();
    let mut parser = Parser::new(&tokens, ParseOptions::default());

    if rule == Rule::Query {
        g::parse_query(&mut parser);
    } else {
        parser.start_node(SyntaxKind::QUERY);
        parser.skip_trivia();
        let start = parser.current_kind();
        if rule.required_start(start) {
            run_rule(&mut parser, rule);
        } else {
            parser.error(
                ErrorCode::E0401,
                format!("expected {}, found {}", rule.name(), start.display_name()),
            );
        }
        parser.error_trailing();
        parser.finish_node();
    }

    RuleParseResult {
        parse: parser.finish(),
        rule,
        input: input.to_string(),
    }
}

/// Parse a rule given by name, e.g. `"comparison"`
pub fn parse_rule_named(name: &str, input: &str) -> Result<RuleParseResult, QueryError> {
    Ok(parse_rule(name.parse()?, input))
}

fn run_rule<P: FilterQueryParser>(p: &mut P, rule: Rule) {
    match rule {
        Rule::Query => g::parse_query(p),
        Rule::Expression => g::parse_expression(p),
        Rule::OrExpression => g::parse_or_expression(p),
        Rule::AndExpression => g::parse_and_expression(p),
        Rule::UnaryExpression => g::parse_unary_expression(p),
        Rule::Primary => g::parse_primary(p),
        Rule::Comparison => g::parse_comparison(p),
        Rule::InClause => {
            g::parse_in_clause(p, SyntaxKind::IN_CLAUSE);
        }
        Rule::NotInClause => {
            g::parse_in_clause(p, SyntaxKind::NOT_IN_CLAUSE);
        }
        Rule::ValueList => {
            g::parse_value_list(p);
        }
        Rule::FullText => g::parse_full_text(p),
        Rule::FunctionCall => g::parse_function_call(p),
        Rule::FunctionParamList => {
            g::parse_function_param_list(p);
        }
        Rule::FunctionParam => {
            g::parse_function_param(p);
        }
        Rule::Array => {
            g::parse_array(p);
        }
        Rule::Value => {
            g::parse_value(p);
        }
        Rule::Key => g::parse_key(p),
    }
}
