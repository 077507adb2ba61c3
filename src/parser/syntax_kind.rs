//! Syntax kinds for the Rowan-based CST
//!
//! This enum defines all possible token and node kinds in a filter query
//! syntax tree. Node kinds mirror the grammar rules one to one.

/// All syntax kinds (tokens and nodes) of the filter query language
///
/// Tokens are leaf nodes (keys, literals, operators, punctuation).
/// Nodes are composite (expressions, comparisons, value lists).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
#[allow(non_camel_case_types)]
pub enum SyntaxKind {
    // =========================================================================
    // TRIVIA
    // =========================================================================
    WHITESPACE = 0,

    // =========================================================================
    // LITERALS
    // =========================================================================
    KEY,         // service.name
    NUMBER,      // 42, -1.5, 1e3
    QUOTED_TEXT, // "hello" or 'hello'
    BOOL,        // true / false

    // =========================================================================
    // PUNCTUATION
    // =========================================================================
    L_PAREN,   // (
    R_PAREN,   // )
    L_BRACKET, // [
    R_BRACKET, // ]
    COMMA,     // ,

    // =========================================================================
    // COMPARISON OPERATORS
    // =========================================================================
    EQUALS,     // = or ==
    NOT_EQUALS, // !=
    NEQ,        // <>
    LT,         // <
    LE,         // <=
    GT,         // >
    GE,         // >=
    LIKE_KW,
    NOT_LIKE_KW,
    ILIKE_KW,
    NOT_ILIKE_KW,
    BETWEEN_KW,
    NOT_BETWEEN_KW,
    EXISTS_KW,
    NOT_EXISTS_KW,
    REGEXP_KW,
    NOT_REGEXP_KW,
    CONTAINS_KW,
    NOT_CONTAINS_KW,

    // =========================================================================
    // SET MEMBERSHIP
    // =========================================================================
    IN_KW,
    NOT_IN_KW,

    // =========================================================================
    // LOGICAL CONNECTIVES
    // =========================================================================
    NOT_KW,
    AND_KW,
    OR_KW,

    // =========================================================================
    // FUNCTION NAMES
    // =========================================================================
    HAS_KW,
    HASANY_KW,
    HASALL_KW,
    HASNONE_KW,

    /// End of input; only produced by parser lookahead, never stored in a tree
    EOF,

    // =========================================================================
    // NODES
    // =========================================================================
    QUERY,
    EXPRESSION,
    OR_EXPR,
    AND_EXPR,
    UNARY_EXPR,
    PRIMARY,
    COMPARISON,
    IN_CLAUSE,
    NOT_IN_CLAUSE,
    VALUE_LIST,
    FULL_TEXT,
    FUNCTION_CALL,
    FUNCTION_PARAM_LIST,
    FUNCTION_PARAM,
    ARRAY,
    VALUE,
    KEY_NODE,

    // Special
    ERROR,

    #[doc(hidden)]
    __LAST,
}

impl SyntaxKind {
    /// Check if this is a trivia token
    pub fn is_trivia(self) -> bool {
        matches!(self, Self::WHITESPACE)
    }

    /// Check if this is a reserved word (operator keyword, connective or function name)
    pub fn is_keyword(self) -> bool {
        (self as u16) >= (Self::LIKE_KW as u16) && (self as u16) <= (Self::HASNONE_KW as u16)
    }

    /// Check if this is a punctuation token
    pub fn is_punct(self) -> bool {
        (self as u16) >= (Self::L_PAREN as u16) && (self as u16) <= (Self::COMMA as u16)
    }

    /// Check if this is a literal usable in a `value` position
    pub fn is_literal(self) -> bool {
        matches!(self, Self::QUOTED_TEXT | Self::NUMBER | Self::BOOL)
    }

    /// Operators that may appear as a direct child of a comparison.
    ///
    /// `IN` / `NOT IN` are deliberately absent: they belong to the
    /// in-clause rules, not to the comparison itself.
    pub fn is_comparison_operator(self) -> bool {
        (self as u16) >= (Self::EQUALS as u16) && (self as u16) <= (Self::NOT_CONTAINS_KW as u16)
    }

    /// Comparison operators that take a single value operand
    pub fn takes_single_value(self) -> bool {
        self.is_comparison_operator()
            && !matches!(
                self,
                Self::BETWEEN_KW | Self::NOT_BETWEEN_KW | Self::EXISTS_KW | Self::NOT_EXISTS_KW
            )
    }

    /// `HAS`, `HASANY`, `HASALL`, `HASNONE`
    pub fn is_function_name(self) -> bool {
        matches!(
            self,
            Self::HAS_KW | Self::HASANY_KW | Self::HASALL_KW | Self::HASNONE_KW
        )
    }

    /// `AND` / `OR`
    pub fn is_conjunction(self) -> bool {
        matches!(self, Self::AND_KW | Self::OR_KW)
    }

    /// Parentheses and brackets
    pub fn is_delimiter(self) -> bool {
        matches!(
            self,
            Self::L_PAREN | Self::R_PAREN | Self::L_BRACKET | Self::R_BRACKET
        )
    }

    /// Check if this kind is a composite node rather than a token
    pub fn is_node(self) -> bool {
        (self as u16) >= (Self::QUERY as u16) && (self as u16) <= (Self::ERROR as u16)
    }

    /// Tokens that can begin a `primary`
    pub fn starts_primary(self) -> bool {
        matches!(self, Self::L_PAREN | Self::KEY | Self::QUOTED_TEXT) || self.is_function_name()
    }

    /// Tokens that can begin a `unaryExpression`
    pub fn starts_unary(self) -> bool {
        self == Self::NOT_KW || self.starts_primary()
    }

    /// Human readable name used in diagnostics
    pub fn display_name(self) -> &'static str {
        match self {
            Self::WHITESPACE => "whitespace",
            Self::KEY => "key",
            Self::NUMBER => "number",
            Self::QUOTED_TEXT => "quoted text",
            Self::BOOL => "boolean",
            Self::L_PAREN => "'('",
            Self::R_PAREN => "')'",
            Self::L_BRACKET => "'['",
            Self::R_BRACKET => "']'",
            Self::COMMA => "','",
            Self::EQUALS => "'='",
            Self::NOT_EQUALS => "'!='",
            Self::NEQ => "'<>'",
            Self::LT => "'<'",
            Self::LE => "'<='",
            Self::GT => "'>'",
            Self::GE => "'>='",
            Self::LIKE_KW => "LIKE",
            Self::NOT_LIKE_KW => "NOT LIKE",
            Self::ILIKE_KW => "ILIKE",
            Self::NOT_ILIKE_KW => "NOT ILIKE",
            Self::BETWEEN_KW => "BETWEEN",
            Self::NOT_BETWEEN_KW => "NOT BETWEEN",
            Self::EXISTS_KW => "EXISTS",
            Self::NOT_EXISTS_KW => "NOT EXISTS",
            Self::REGEXP_KW => "REGEXP",
            Self::NOT_REGEXP_KW => "NOT REGEXP",
            Self::CONTAINS_KW => "CONTAINS",
            Self::NOT_CONTAINS_KW => "NOT CONTAINS",
            Self::IN_KW => "IN",
            Self::NOT_IN_KW => "NOT IN",
            Self::NOT_KW => "NOT",
            Self::AND_KW => "AND",
            Self::OR_KW => "OR",
            Self::HAS_KW => "HAS",
            Self::HASANY_KW => "HASANY",
            Self::HASALL_KW => "HASALL",
            Self::HASNONE_KW => "HASNONE",
            Self::EOF => "end of input",
            Self::QUERY => "query",
            Self::EXPRESSION => "expression",
            Self::OR_EXPR => "or expression",
            Self::AND_EXPR => "and expression",
            Self::UNARY_EXPR => "unary expression",
            Self::PRIMARY => "primary",
            Self::COMPARISON => "comparison",
            Self::IN_CLAUSE => "in clause",
            Self::NOT_IN_CLAUSE => "not in clause",
            Self::VALUE_LIST => "value list",
            Self::FULL_TEXT => "full text",
            Self::FUNCTION_CALL => "function call",
            Self::FUNCTION_PARAM_LIST => "function parameter list",
            Self::FUNCTION_PARAM => "function parameter",
            Self::ARRAY => "array",
            Self::VALUE => "value",
            Self::KEY_NODE => "key",
            Self::ERROR | Self::__LAST => "error",
        }
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

impl From<rowan::SyntaxKind> for SyntaxKind {
    fn from(raw: rowan::SyntaxKind) -> Self {
        assert!(raw.0 < SyntaxKind::__LAST as u16);
        // Safety: we control all syntax kinds and check bounds above
        unsafe { std::mem::transmute::<u16, SyntaxKind>(raw.0) }
    }
}

/// Language definition for Rowan
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FilterQueryLanguage {}

impl rowan::Language for FilterQueryLanguage {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        raw.into()
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

/// Type aliases for convenience
pub type SyntaxNode = rowan::SyntaxNode<FilterQueryLanguage>;
pub type SyntaxToken = rowan::SyntaxToken<FilterQueryLanguage>;
pub type SyntaxElement = rowan::SyntaxElement<FilterQueryLanguage>;
pub type SyntaxNodeChildren = rowan::SyntaxNodeChildren<FilterQueryLanguage>;
