//! Shared helpers for parser integration tests.
#![allow(dead_code)]

pub use xmlui_syntax::parser::{parse, Parse};
pub use xmlui_syntax::syntax::{Node, SyntaxKind};

/// Formats a parse result as an indented tree plus its diagnostics.
pub fn snapshot_parse(source: &str) -> String {
    let parsed = parse(source);
    let mut output = parsed.root().debug_dump(source);
    if !parsed.diagnostics().is_empty() {
        output.push_str("---\n");
        for diag in parsed.diagnostics() {
            output.push_str(&format!("{diag}\n"));
        }
    }
    output
}

/// Concatenates the leaf-token texts of the tree, trivia included, in
/// document order.
pub fn reconstruct(node: &Node, source: &str, out: &mut String) {
    if let Some(trivia) = node.trivia_before() {
        for trivia_node in trivia {
            reconstruct(trivia_node, source, out);
        }
    }
    match node.children() {
        Some(children) => {
            for child in children {
                reconstruct(child, source, out);
            }
        }
        None => out.push_str(node.text(source)),
    }
}

/// Parses `source` and asserts that the tree reconstructs it byte for
/// byte.
pub fn assert_lossless(source: &str) -> Parse {
    let parsed = parse(source);
    let mut rebuilt = String::new();
    reconstruct(parsed.root(), source, &mut rebuilt);
    assert_eq!(rebuilt, source, "leaf spans must reconstruct the source");
    parsed
}

/// The diagnostic codes of a parse, in discovery order.
pub fn diagnostic_codes(parsed: &Parse) -> Vec<&'static str> {
    parsed
        .diagnostics()
        .iter()
        .map(|diag| diag.code.as_str())
        .collect()
}
