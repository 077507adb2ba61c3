//! Helpers for inspecting parse trees.

use fql::parser::{ErrorCode, Parse, SyntaxKind, SyntaxNode, parse};

/// Assert that `input` parses without errors and return the parse.
pub fn parse_ok(input: &str) -> Parse {
    let parse = parse(input);
    assert!(
        parse.ok(),
        "Expected no errors for {:?}, got:\n{}",
        input,
        parse
            .errors
            .iter()
            .map(|e| format!("  {}", e.format()))
            .collect::<Vec<_>>()
            .join("\n")
    );
    parse
}

/// Error codes reported for `input`, in order.
pub fn error_codes(input: &str) -> Vec<ErrorCode> {
    parse(input).errors.iter().map(|e| e.code).collect()
}

/// Assert the tree of `input` reproduces it byte for byte.
pub fn assert_lossless(input: &str) {
    let parse = parse(input);
    assert_eq!(parse.syntax().text().to_string(), input, "tree text differs");
}

/// Count nodes of `kind` below `node`, `node` included.
pub fn count_nodes(node: &SyntaxNode, kind: SyntaxKind) -> usize {
    node.descendants().filter(|n| n.kind() == kind).count()
}
