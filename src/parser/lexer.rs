//! Logos-based lexer for filter queries
//!
//! Fast tokenization using the logos crate. Negated operators such as
//! `NOT LIKE` are produced as single tokens spanning the inner whitespace.

use super::syntax_kind::SyntaxKind;
use logos::Logos;
use rowan::TextSize;

/// A token with its kind, text, and position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: SyntaxKind,
    pub text: &'a str,
    pub offset: TextSize,
}

impl Token<'_> {
    /// Byte offset one past the last byte of this token
    pub fn end(&self) -> TextSize {
        self.offset + TextSize::of(self.text)
    }
}

/// Lexer wrapping the logos-generated tokenizer
pub struct Lexer<'a> {
    inner: logos::Lexer<'a, LogosToken>,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            inner: LogosToken::lexer(input),
        }
    }

    /// Try to extend a `NOT` at `start` into a negated operator.
    ///
    /// Looks past the whitespace that follows `NOT`; when the next lexeme is
    /// a negatable keyword the inner lexer is advanced past it and the
    /// combined kind is returned.
    fn merge_negation(&mut self) -> Option<SyntaxKind> {
        let mut lookahead = self.inner.clone();
        match lookahead.next()? {
            Ok(LogosToken::Whitespace) => {}
            _ => return None,
        }
        let merged = match lookahead.next()? {
            Ok(LogosToken::LikeKw) => SyntaxKind::NOT_LIKE_KW,
            Ok(LogosToken::IlikeKw) => SyntaxKind::NOT_ILIKE_KW,
            Ok(LogosToken::BetweenKw) => SyntaxKind::NOT_BETWEEN_KW,
            Ok(LogosToken::ExistsKw) => SyntaxKind::NOT_EXISTS_KW,
            Ok(LogosToken::RegexpKw) => SyntaxKind::NOT_REGEXP_KW,
            Ok(LogosToken::ContainsKw) => SyntaxKind::NOT_CONTAINS_KW,
            Ok(LogosToken::InKw) => SyntaxKind::NOT_IN_KW,
            _ => return None,
        };
        self.inner = lookahead;
        Some(merged)
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let logos_token = self.inner.next()?;
        let start = self.inner.span().start;

        let kind = match logos_token {
            Ok(LogosToken::NotKw) => self.merge_negation().unwrap_or(SyntaxKind::NOT_KW),
            Ok(t) => t.into(),
            Err(()) => SyntaxKind::ERROR,
        };

        let end = self.inner.span().end;
        let text = &self.inner.source()[start..end];
        let offset = TextSize::new(start as u32);

        Some(Token { kind, text, offset })
    }
}

/// Tokenize an entire string into a Vec
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    Lexer::new(input).collect()
}

/// Logos token enum - maps to SyntaxKind
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
pub enum LogosToken {
    // =========================================================================
    // TRIVIA
    // =========================================================================
    #[regex(r"[ \t\r\n\f]+")]
    Whitespace,

    // =========================================================================
    // LITERALS
    // =========================================================================
    #[regex(r"[a-zA-Z_$@#][a-zA-Z0-9_$@#:/-]*(\.[a-zA-Z0-9_$@#:/-]+|\[\]|\[\*\])*")]
    Key,

    #[regex(r"[+-]?([0-9]+(\.[0-9]*)?|\.[0-9]+)([eE][+-]?[0-9]+)?")]
    Number,

    #[regex(r#""([^"\\]|\\.)*""#)]
    #[regex(r#"'([^'\\]|\\.)*'"#)]
    QuotedText,

    #[token("true", ignore(ascii_case))]
    #[token("false", ignore(ascii_case))]
    Bool,

    // =========================================================================
    // MULTI-CHARACTER PUNCTUATION (must come before single-char)
    // =========================================================================
    #[token("==")]
    #[token("=")]
    Equals,

    #[token("!=")]
    NotEquals,

    #[token("<>")]
    Neq,

    #[token("<=")]
    Le,

    #[token(">=")]
    Ge,

    // =========================================================================
    // SINGLE-CHARACTER PUNCTUATION
    // =========================================================================
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token(",")]
    Comma,

    // =========================================================================
    // KEYWORDS (case-insensitive, longest match wins in logos)
    // =========================================================================
    #[token("and", ignore(ascii_case))]
    AndKw,
    #[token("between", ignore(ascii_case))]
    BetweenKw,
    #[token("contains", ignore(ascii_case))]
    ContainsKw,
    #[token("exists", ignore(ascii_case))]
    ExistsKw,
    #[token("has", ignore(ascii_case))]
    HasKw,
    #[token("hasall", ignore(ascii_case))]
    HasallKw,
    #[token("hasany", ignore(ascii_case))]
    HasanyKw,
    #[token("hasnone", ignore(ascii_case))]
    HasnoneKw,
    #[token("ilike", ignore(ascii_case))]
    IlikeKw,
    #[token("in", ignore(ascii_case))]
    InKw,
    #[token("like", ignore(ascii_case))]
    LikeKw,
    #[token("not", ignore(ascii_case))]
    NotKw,
    #[token("or", ignore(ascii_case))]
    OrKw,
    #[token("regexp", ignore(ascii_case))]
    RegexpKw,
}

impl From<LogosToken> for SyntaxKind {
    fn from(token: LogosToken) -> Self {
        use LogosToken::*;
        match token {
            Whitespace => SyntaxKind::WHITESPACE,
            Key => SyntaxKind::KEY,
            Number => SyntaxKind::NUMBER,
            QuotedText => SyntaxKind::QUOTED_TEXT,
            Bool => SyntaxKind::BOOL,
            Equals => SyntaxKind::EQUALS,
            NotEquals => SyntaxKind::NOT_EQUALS,
            Neq => SyntaxKind::NEQ,
            Le => SyntaxKind::LE,
            Ge => SyntaxKind::GE,
            Lt => SyntaxKind::LT,
            Gt => SyntaxKind::GT,
            LParen => SyntaxKind::L_PAREN,
            RParen => SyntaxKind::R_PAREN,
            LBracket => SyntaxKind::L_BRACKET,
            RBracket => SyntaxKind::R_BRACKET,
            Comma => SyntaxKind::COMMA,
            AndKw => SyntaxKind::AND_KW,
            BetweenKw => SyntaxKind::BETWEEN_KW,
            ContainsKw => SyntaxKind::CONTAINS_KW,
            ExistsKw => SyntaxKind::EXISTS_KW,
            HasKw => SyntaxKind::HAS_KW,
            HasallKw => SyntaxKind::HASALL_KW,
            HasanyKw => SyntaxKind::HASANY_KW,
            HasnoneKw => SyntaxKind::HASNONE_KW,
            IlikeKw => SyntaxKind::ILIKE_KW,
            InKw => SyntaxKind::IN_KW,
            LikeKw => SyntaxKind::LIKE_KW,
            NotKw => SyntaxKind::NOT_KW,
            OrKw => SyntaxKind::OR_KW,
            RegexpKw => SyntaxKind::REGEXP_KW,
        }
    }
}
