//! Filter query grammar
//!
//! Recursive-descent implementation of the filter query grammar:
//!
//! ```text
//! query          := expression ((AND|OR) expression | expression)* EOF
//! expression     := orExpression
//! orExpression   := andExpression (OR andExpression)*
//! andExpression  := unaryExpression ((AND unaryExpression) | unaryExpression)*
//! unaryExpression:= NOT? primary
//! primary        := LPAREN orExpression RPAREN | comparison | functionCall | fullText
//! comparison     := key <operator> value | key (BETWEEN|NOT_BETWEEN) value AND value
//!                 | key inClause | key notInClause | key (EXISTS|NOT_EXISTS)
//! inClause       := IN (LPAREN valueList RPAREN | LBRACK valueList RBRACK)
//! notInClause    := NOT_IN (LPAREN valueList RPAREN | LBRACK valueList RBRACK)
//! valueList      := value (COMMA value)*
//! fullText       := QUOTED_TEXT
//! functionCall   := (HAS|HASANY|HASALL|HASNONE) LPAREN functionParamList RPAREN
//! functionParamList := functionParam (COMMA functionParam)*
//! functionParam  := key | value | array
//! array          := LBRACK valueList RBRACK
//! value          := QUOTED_TEXT | NUMBER | BOOL
//! key            := KEY
//! ```
//!
//! Rule functions that can fail return `false`; the caller decides whether
//! the enclosing node becomes its rule kind or an `ERROR` node.

use rowan::Checkpoint;

use crate::parser::errors::ErrorCode;
use crate::parser::syntax_kind::SyntaxKind;

/// Trait for grammar parsing operations
///
/// This trait defines the interface between the grammar functions and the
/// main parser, which provides token access, tree building and recovery.
pub trait FilterQueryParser {
    // Token inspection
    fn current_kind(&self) -> SyntaxKind;
    fn at(&self, kind: SyntaxKind) -> bool;
    fn at_eof(&self) -> bool;

    /// Peek at the kind of the nth token ahead (skipping trivia)
    fn peek_kind(&self, n: usize) -> SyntaxKind;

    // Position tracking
    fn get_pos(&self) -> usize;

    // Token consumption
    fn bump(&mut self);

    // Trivia handling
    fn skip_trivia(&mut self);

    // Node building
    fn start_node(&mut self, kind: SyntaxKind);
    fn finish_node(&mut self);
    fn checkpoint(&mut self) -> Checkpoint;
    fn start_node_at(&mut self, checkpoint: Checkpoint, kind: SyntaxKind);

    // Error handling
    /// Record an error at the next non-trivia token without consuming it
    fn error(&mut self, code: ErrorCode, message: String);
    /// Record an error and wrap the next non-trivia token in an ERROR node
    fn error_token(&mut self, code: ErrorCode, message: String);
    /// Record a missing closing delimiter, pointing back at its opener
    fn error_unclosed(&mut self, close: SyntaxKind, opened_at: usize);

    // Nesting
    /// Enter a parenthesized group; returns false once the depth limit is hit
    fn enter_group(&mut self) -> bool;
    fn exit_group(&mut self);
}

/// Kind of the next non-trivia token
fn peek<P: FilterQueryParser>(p: &P) -> SyntaxKind {
    p.peek_kind(0)
}

/// Skip trivia and consume the next token
fn bump_next<P: FilterQueryParser>(p: &mut P) {
    p.skip_trivia();
    p.bump();
}

/// query := expression ((AND|OR) expression | expression)* EOF
pub fn parse_query<P: FilterQueryParser>(p: &mut P) {
    p.start_node(SyntaxKind::QUERY);
    p.skip_trivia();

    if p.at_eof() {
        p.error(ErrorCode::E0401, "expected expression, found end of input".into());
    } else {
        parse_expression(p);
    }

    loop {
        let next = peek(p);
        if next == SyntaxKind::EOF {
            break;
        }
        if next.is_conjunction() {
            bump_next(p);
            p.skip_trivia();
            parse_expression(p);
        } else if next.starts_unary() {
            p.skip_trivia();
            parse_expression(p);
        } else {
            unexpected_at_top_level(p, next);
        }
    }

    // Trailing trivia belongs to the root
    p.skip_trivia();
    p.finish_node();
}

/// Report a token that cannot start or continue an expression and drop it
fn unexpected_at_top_level<P: FilterQueryParser>(p: &mut P, kind: SyntaxKind) {
    match kind {
        SyntaxKind::ERROR => p.error_token(ErrorCode::E0101, "unexpected character".into()),
        SyntaxKind::R_PAREN | SyntaxKind::R_BRACKET => p.error_token(
            ErrorCode::E0203,
            format!("unexpected closing {}", kind.display_name()),
        ),
        _ => p.error_token(
            ErrorCode::E0901,
            format!("unexpected {}", kind.display_name()),
        ),
    }
}

/// expression := orExpression
pub fn parse_expression<P: FilterQueryParser>(p: &mut P) {
    p.start_node(SyntaxKind::EXPRESSION);
    parse_or_expression(p);
    p.finish_node();
}

/// orExpression := andExpression (OR andExpression)*
pub fn parse_or_expression<P: FilterQueryParser>(p: &mut P) {
    p.start_node(SyntaxKind::OR_EXPR);
    parse_and_expression(p);

    while peek(p) == SyntaxKind::OR_KW {
        bump_next(p);
        p.skip_trivia();
        parse_and_expression(p);
    }

    p.finish_node();
}

/// andExpression := unaryExpression ((AND unaryExpression) | unaryExpression)*
///
/// Juxtaposed expressions without a connective are an implicit AND.
pub fn parse_and_expression<P: FilterQueryParser>(p: &mut P) {
    p.start_node(SyntaxKind::AND_EXPR);
    parse_unary_expression(p);

    loop {
        let next = peek(p);
        if next == SyntaxKind::AND_KW {
            bump_next(p);
            p.skip_trivia();
            parse_unary_expression(p);
        } else if next.starts_unary() {
            p.skip_trivia();
            parse_unary_expression(p);
        } else {
            break;
        }
    }

    p.finish_node();
}

/// unaryExpression := NOT? primary
pub fn parse_unary_expression<P: FilterQueryParser>(p: &mut P) {
    p.start_node(SyntaxKind::UNARY_EXPR);

    if p.at(SyntaxKind::NOT_KW) {
        p.bump();
        p.skip_trivia();
    }
    parse_primary(p);

    p.finish_node();
}

/// primary := LPAREN orExpression RPAREN | comparison | functionCall | fullText
///
/// Does not consume anything when the next token cannot start a primary.
pub fn parse_primary<P: FilterQueryParser>(p: &mut P) {
    let kind = p.current_kind();
    match kind {
        SyntaxKind::L_PAREN => {
            p.start_node(SyntaxKind::PRIMARY);
            parse_group(p);
            p.finish_node();
        }
        SyntaxKind::KEY => {
            p.start_node(SyntaxKind::PRIMARY);
            parse_comparison(p);
            p.finish_node();
        }
        SyntaxKind::QUOTED_TEXT => {
            p.start_node(SyntaxKind::PRIMARY);
            parse_full_text(p);
            p.finish_node();
        }
        k if k.is_function_name() => {
            p.start_node(SyntaxKind::PRIMARY);
            parse_function_call(p);
            p.finish_node();
        }
        SyntaxKind::EOF => {
            p.error(ErrorCode::E0401, "expected expression, found end of input".into());
        }
        other => {
            p.error(
                ErrorCode::E0401,
                format!("expected expression, found {}", other.display_name()),
            );
        }
    }
}

/// LPAREN orExpression RPAREN
fn parse_group<P: FilterQueryParser>(p: &mut P) {
    let opened_at = p.get_pos();
    p.bump(); // (

    if !p.enter_group() {
        skip_balanced_group(p);
        return;
    }

    p.skip_trivia();
    parse_or_expression(p);
    expect_closing(p, SyntaxKind::R_PAREN, opened_at);
    p.exit_group();
}

/// Consume everything up to and including the `)` matching an already
/// consumed `(`, wrapping it in a single ERROR node.
fn skip_balanced_group<P: FilterQueryParser>(p: &mut P) {
    p.error(ErrorCode::E0205, "expression nested too deeply".into());
    p.start_node(SyntaxKind::ERROR);
    let mut depth = 1usize;
    while !p.at_eof() {
        match p.current_kind() {
            SyntaxKind::L_PAREN => depth += 1,
            SyntaxKind::R_PAREN => depth -= 1,
            _ => {}
        }
        p.bump();
        if depth == 0 {
            break;
        }
    }
    p.finish_node();
}

/// Expect a closing delimiter.
///
/// Recovers by deleting a single extraneous token in front of it, or by
/// assuming it was present when it is missing altogether.
fn expect_closing<P: FilterQueryParser>(p: &mut P, close: SyntaxKind, opened_at: usize) {
    if peek(p) == close {
        bump_next(p);
    } else if p.peek_kind(1) == close && peek(p) != SyntaxKind::EOF {
        p.error_token(
            ErrorCode::E0204,
            format!("extraneous {} before {}", peek(p).display_name(), close.display_name()),
        );
        bump_next(p);
    } else {
        p.error_unclosed(close, opened_at);
    }
}

/// comparison := key <operator> value | ...
///
/// A comparison that cannot be completed becomes an ERROR node so that its
/// key is never reported as a finished key.
pub fn parse_comparison<P: FilterQueryParser>(p: &mut P) {
    let checkpoint = p.checkpoint();
    parse_key(p);
    let complete = parse_comparison_tail(p);
    let kind = if complete {
        SyntaxKind::COMPARISON
    } else {
        SyntaxKind::ERROR
    };
    p.start_node_at(checkpoint, kind);
    p.finish_node();
}

fn parse_comparison_tail<P: FilterQueryParser>(p: &mut P) -> bool {
    let op = peek(p);
    match op {
        k if k.takes_single_value() => {
            bump_next(p);
            parse_value(p)
        }
        SyntaxKind::BETWEEN_KW | SyntaxKind::NOT_BETWEEN_KW => {
            bump_next(p);
            if !parse_value(p) {
                return false;
            }
            if peek(p) != SyntaxKind::AND_KW {
                p.error(
                    ErrorCode::E0303,
                    format!("expected AND after {} lower bound", op.display_name()),
                );
                return false;
            }
            bump_next(p);
            parse_value(p)
        }
        SyntaxKind::EXISTS_KW | SyntaxKind::NOT_EXISTS_KW => {
            bump_next(p);
            true
        }
        SyntaxKind::IN_KW => {
            p.skip_trivia();
            parse_in_clause(p, SyntaxKind::IN_CLAUSE)
        }
        SyntaxKind::NOT_IN_KW => {
            p.skip_trivia();
            parse_in_clause(p, SyntaxKind::NOT_IN_CLAUSE)
        }
        _ => {
            let after = p.peek_kind(1);
            if op != SyntaxKind::EOF
                && (after.is_comparison_operator()
                    || matches!(after, SyntaxKind::IN_KW | SyntaxKind::NOT_IN_KW))
            {
                p.error_token(
                    ErrorCode::E0204,
                    format!("extraneous {} before operator", op.display_name()),
                );
                return parse_comparison_tail(p);
            }
            p.error(
                ErrorCode::E0301,
                format!("expected comparison operator, found {}", op.display_name()),
            );
            false
        }
    }
}

/// inClause / notInClause := (IN|NOT_IN) (LPAREN valueList RPAREN | LBRACK valueList RBRACK)
pub fn parse_in_clause<P: FilterQueryParser>(p: &mut P, kind: SyntaxKind) -> bool {
    p.start_node(kind);
    p.bump(); // IN / NOT IN

    let close = match peek(p) {
        SyntaxKind::L_PAREN => SyntaxKind::R_PAREN,
        SyntaxKind::L_BRACKET => SyntaxKind::R_BRACKET,
        other => {
            p.error(
                ErrorCode::E0304,
                format!("expected '(' or '[' after IN, found {}", other.display_name()),
            );
            p.finish_node();
            return false;
        }
    };
    p.skip_trivia();
    let opened_at = p.get_pos();
    p.bump();

    let complete = parse_value_list(p);
    finish_delimited(p, close, opened_at, complete);

    p.finish_node();
    complete
}

/// Close a delimited list. A list that already failed swallows its closer
/// quietly so the error is not reported twice.
fn finish_delimited<P: FilterQueryParser>(
    p: &mut P,
    close: SyntaxKind,
    opened_at: usize,
    complete: bool,
) {
    if complete {
        expect_closing(p, close, opened_at);
    } else if peek(p) == close {
        bump_next(p);
    }
}

/// valueList := value (COMMA value)*
pub fn parse_value_list<P: FilterQueryParser>(p: &mut P) -> bool {
    p.skip_trivia();
    p.start_node(SyntaxKind::VALUE_LIST);

    let mut complete = parse_value(p);
    while complete && peek(p) == SyntaxKind::COMMA {
        bump_next(p);
        complete = parse_value(p);
    }

    p.finish_node();
    complete
}

/// fullText := QUOTED_TEXT
pub fn parse_full_text<P: FilterQueryParser>(p: &mut P) {
    p.start_node(SyntaxKind::FULL_TEXT);
    p.bump();
    p.finish_node();
}

/// functionCall := (HAS|HASANY|HASALL|HASNONE) LPAREN functionParamList RPAREN
pub fn parse_function_call<P: FilterQueryParser>(p: &mut P) {
    let checkpoint = p.checkpoint();
    p.bump(); // function name

    let complete = if peek(p) == SyntaxKind::L_PAREN {
        p.skip_trivia();
        let opened_at = p.get_pos();
        p.bump();
        let complete = parse_function_param_list(p);
        finish_delimited(p, SyntaxKind::R_PAREN, opened_at, complete);
        complete
    } else {
        p.error(
            ErrorCode::E0402,
            format!("expected '(' after function name, found {}", peek(p).display_name()),
        );
        false
    };

    let kind = if complete {
        SyntaxKind::FUNCTION_CALL
    } else {
        SyntaxKind::ERROR
    };
    p.start_node_at(checkpoint, kind);
    p.finish_node();
}

/// functionParamList := functionParam (COMMA functionParam)*
pub fn parse_function_param_list<P: FilterQueryParser>(p: &mut P) -> bool {
    p.skip_trivia();
    p.start_node(SyntaxKind::FUNCTION_PARAM_LIST);

    let mut complete = parse_function_param(p);
    while complete && peek(p) == SyntaxKind::COMMA {
        bump_next(p);
        complete = parse_function_param(p);
    }

    p.finish_node();
    complete
}

/// functionParam := key | value | array
pub fn parse_function_param<P: FilterQueryParser>(p: &mut P) -> bool {
    let next = peek(p);
    if next != SyntaxKind::KEY && !next.is_literal() && next != SyntaxKind::L_BRACKET {
        p.error(
            ErrorCode::E0403,
            format!("expected key, value or array, found {}", next.display_name()),
        );
        return false;
    }

    p.skip_trivia();
    p.start_node(SyntaxKind::FUNCTION_PARAM);
    let complete = match next {
        SyntaxKind::KEY => {
            parse_key(p);
            true
        }
        SyntaxKind::L_BRACKET => parse_array(p),
        _ => parse_value(p),
    };
    p.finish_node();
    complete
}

/// array := LBRACK valueList RBRACK
pub fn parse_array<P: FilterQueryParser>(p: &mut P) -> bool {
    p.start_node(SyntaxKind::ARRAY);
    let opened_at = p.get_pos();
    p.bump(); // [

    let complete = parse_value_list(p);
    finish_delimited(p, SyntaxKind::R_BRACKET, opened_at, complete);

    p.finish_node();
    complete
}

/// value := QUOTED_TEXT | NUMBER | BOOL
///
/// Deletes a single extraneous token when a literal follows it.
pub fn parse_value<P: FilterQueryParser>(p: &mut P) -> bool {
    let next = peek(p);
    if !next.is_literal() {
        if next != SyntaxKind::EOF && p.peek_kind(1).is_literal() {
            p.error_token(
                ErrorCode::E0204,
                format!("extraneous {} before value", next.display_name()),
            );
        } else {
            p.error(
                ErrorCode::E0302,
                format!("expected value, found {}", next.display_name()),
            );
            return false;
        }
    }

    p.skip_trivia();
    p.start_node(SyntaxKind::VALUE);
    p.bump();
    p.finish_node();
    true
}

/// key := KEY
pub fn parse_key<P: FilterQueryParser>(p: &mut P) {
    p.start_node(SyntaxKind::KEY_NODE);
    p.bump();
    p.finish_node();
}
