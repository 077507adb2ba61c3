//! Error code definitions for parser diagnostics
//!
//! Error codes follow a naming convention: E{category}{number}
//! - E01xx: Lexical errors (invalid characters, unterminated strings)
//! - E02xx: Structural errors (parentheses, brackets, nesting)
//! - E03xx: Comparison errors (operators, values, IN lists)
//! - E04xx: Expression errors (missing operands, function calls)
//! - E09xx: Generic/fallback errors

use std::fmt;

/// Error codes for parser diagnostics
///
/// Each error code represents a specific category of parse error,
/// enabling filtering and editor integration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // E01xx: Lexical errors
    // =========================================================================
    /// Character sequence that matches no token
    E0101,
    /// Quoted text without its closing quote
    E0102,

    // =========================================================================
    // E02xx: Structural errors
    // =========================================================================
    /// Unclosed parenthesis `(`
    E0201,
    /// Unclosed bracket `[`
    E0202,
    /// Closing delimiter without an opener
    E0203,
    /// Extraneous token removed during recovery
    E0204,
    /// Parentheses nested beyond the configured depth
    E0205,

    // =========================================================================
    // E03xx: Comparison errors
    // =========================================================================
    /// Key not followed by a comparison operator
    E0301,
    /// Operator not followed by a value
    E0302,
    /// `BETWEEN x` not followed by `AND y`
    E0303,
    /// `IN` / `NOT IN` not followed by `(` or `[`
    E0304,

    // =========================================================================
    // E04xx: Expression errors
    // =========================================================================
    /// Expression expected but not found
    E0401,
    /// Function name not followed by `(`
    E0402,
    /// Invalid function parameter
    E0403,

    // =========================================================================
    // E09xx: Generic/fallback errors
    // =========================================================================
    /// Unexpected token
    E0901,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::E0101 => "E0101",
            Self::E0102 => "E0102",
            Self::E0201 => "E0201",
            Self::E0202 => "E0202",
            Self::E0203 => "E0203",
            Self::E0204 => "E0204",
            Self::E0205 => "E0205",
            Self::E0301 => "E0301",
            Self::E0302 => "E0302",
            Self::E0303 => "E0303",
            Self::E0304 => "E0304",
            Self::E0401 => "E0401",
            Self::E0402 => "E0402",
            Self::E0403 => "E0403",
            Self::E0901 => "E0901",
        }
    }

    /// Get a short description of the error category
    pub fn category_description(&self) -> &'static str {
        match self {
            Self::E0101 | Self::E0102 => "lexical error",
            Self::E0201 | Self::E0202 | Self::E0203 | Self::E0204 | Self::E0205 => {
                "structural error"
            }
            Self::E0301 | Self::E0302 | Self::E0303 | Self::E0304 => "comparison error",
            Self::E0401 | Self::E0402 | Self::E0403 => "expression error",
            Self::E0901 => "syntax error",
        }
    }

    /// Get the default message template for this error code
    pub fn default_message(&self) -> &'static str {
        match self {
            Self::E0101 => "invalid character",
            Self::E0102 => "unterminated string literal",
            Self::E0201 => "unclosed parenthesis",
            Self::E0202 => "unclosed bracket",
            Self::E0203 => "unexpected closing delimiter",
            Self::E0204 => "extraneous input",
            Self::E0205 => "expression nested too deeply",
            Self::E0301 => "expected comparison operator",
            Self::E0302 => "expected value",
            Self::E0303 => "expected AND in range",
            Self::E0304 => "expected '(' or '[' after IN",
            Self::E0401 => "expected expression",
            Self::E0402 => "expected '(' after function name",
            Self::E0403 => "expected function parameter",
            Self::E0901 => "unexpected token",
        }
    }

    /// Check if this is a structural error (delimiters)
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            Self::E0201 | Self::E0202 | Self::E0203 | Self::E0204 | Self::E0205
        )
    }

    /// Errors after which the enclosing rule still completes normally
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::E0201 | Self::E0202 | Self::E0204)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
