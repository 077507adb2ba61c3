//! Helpers for running the analyzer and lexer on query strings.

use fql::ide::{QueryAnalysis, TokenClass, TokenOfInterest, analyze_query};
use fql::parser::{SyntaxKind, tokenize};

/// Classify a single token of interest given by text and inclusive offsets.
pub fn class_of(input: &str, text: &str, start: usize, stop: usize) -> Option<TokenClass> {
    analyze_query(input, &TokenOfInterest::new(text, start, stop)).map(|t| t.classification)
}

/// Every classified token of `input` as `(text, start, stop, class)`.
pub fn classified(input: &str) -> Vec<(String, usize, usize, TokenClass)> {
    QueryAnalysis::new(input)
        .tokens()
        .iter()
        .map(|t| (t.text.to_string(), t.start_index, t.stop_index, t.classification))
        .collect()
}

/// Kinds of the non-trivia tokens of `input`.
pub fn token_kinds(input: &str) -> Vec<SyntaxKind> {
    tokenize(input)
        .into_iter()
        .filter(|t| !t.kind.is_trivia())
        .map(|t| t.kind)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_of_key() {
        assert_eq!(class_of("a = 1", "a", 0, 0), Some(TokenClass::Key));
    }

    #[test]
    fn test_token_kinds_skips_whitespace() {
        assert_eq!(
            token_kinds(" a  = 1 "),
            vec![SyntaxKind::KEY, SyntaxKind::EQUALS, SyntaxKind::NUMBER]
        );
    }
}
