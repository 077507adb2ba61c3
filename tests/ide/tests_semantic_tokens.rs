//! Semantic token tests.

use fql::ide::{SemanticToken, TokenType, semantic_tokens};

fn tok(line: u32, col: u32, length: u32, token_type: TokenType) -> SemanticToken {
    SemanticToken {
        line,
        col,
        length,
        token_type,
    }
}

#[test]
fn test_full_query() {
    assert_eq!(
        semantic_tokens("svc = 'api' AND code NOT IN (500)"),
        vec![
            tok(0, 0, 3, TokenType::Key),
            tok(0, 4, 1, TokenType::Operator),
            tok(0, 6, 5, TokenType::String),
            tok(0, 12, 3, TokenType::Keyword),
            tok(0, 16, 4, TokenType::Key),
            tok(0, 21, 6, TokenType::Operator),
            tok(0, 28, 1, TokenType::Punctuation),
            tok(0, 29, 3, TokenType::Number),
            tok(0, 32, 1, TokenType::Punctuation),
        ]
    );
}

#[test]
fn test_incomplete_query_still_highlights() {
    let types: Vec<_> = semantic_tokens("hasAny(tags, [")
        .into_iter()
        .map(|t| t.token_type)
        .collect();
    assert_eq!(
        types,
        [
            TokenType::Function,
            TokenType::Punctuation,
            TokenType::Key,
            TokenType::Punctuation,
            TokenType::Punctuation,
        ]
    );
}

#[test]
fn test_lsp_indices_are_distinct() {
    let all = [
        TokenType::Key,
        TokenType::Operator,
        TokenType::Keyword,
        TokenType::String,
        TokenType::Number,
        TokenType::Boolean,
        TokenType::Function,
        TokenType::Punctuation,
    ];
    let mut indices: Vec<_> = all.iter().map(|t| t.to_lsp_index()).collect();
    indices.sort_unstable();
    indices.dedup();
    assert_eq!(indices.len(), all.len());
}

#[test]
fn test_multiline_columns_restart() {
    let tokens = semantic_tokens("a = 1\n  OR b = true");
    let or = tokens.iter().find(|t| t.token_type == TokenType::Keyword).unwrap();
    assert_eq!((or.line, or.col), (1, 2));
    assert_eq!(tokens.last().unwrap().token_type, TokenType::Boolean);
}
