//! Error recovery: malformed markup still yields a usable tree, with
//! diagnostics in discovery order.

mod common;
use common::*;

use expect_test::expect;

#[test]
fn test_missing_tag_name() {
    let parsed = assert_lossless("< >");
    assert_eq!(diagnostic_codes(&parsed), vec!["U004", "U005"]);
    expect![[r#"
        ContentList@0..3
          Element@0..3
            OpenTagStart@0..1 "<"
            Whitespace@1..2 " "
            TagEnd@2..3 ">"
          Eof@3..3 ""
        ---
        [U004] A tag name expected.
        [U005] A '</' token expected.
    "#]]
    .assert_eq(&snapshot_parse("< >"));
}

#[test]
fn test_stray_close_tag() {
    let parsed = assert_lossless("</a>");
    assert_eq!(diagnostic_codes(&parsed), vec!["U017"]);
    expect![[r#"
        ContentList@0..4
          Error@0..4
            CloseTagStart@0..2 "</"
            Ident@2..3 "a"
            TagEnd@3..4 ">"
          Eof@4..4 ""
        ---
        [U017] Read '</', but there's no opening tag to close.
    "#]]
    .assert_eq(&snapshot_parse("</a>"));
}

#[test]
fn test_tag_name_mismatch() {
    let parsed = assert_lossless("<a></b>");
    assert_eq!(diagnostic_codes(&parsed), vec!["U007"]);
    expect![[r#"
        ContentList@0..7
          Element@0..7
            OpenTagStart@0..1 "<"
            TagName@1..2
              Ident@1..2 "a"
            TagEnd@2..3 ">"
            CloseTagStart@3..5 "</"
            TagName@5..6
              Ident@5..6 "b"
            TagEnd@6..7 ">"
          Eof@7..7 ""
        ---
        [U007] Opening and closing tag names should match. Opening tag has a name 'a', but the closing tag name is 'b'.
    "#]]
    .assert_eq(&snapshot_parse("<a></b>"));
}

#[test]
fn test_missing_attr_value() {
    let parsed = assert_lossless("<a b=>");
    assert_eq!(diagnostic_codes(&parsed), vec!["U011", "U015"]);
}

#[test]
fn test_unterminated_attr_string() {
    let parsed = assert_lossless("<a b=\"unterminated");
    assert_eq!(diagnostic_codes(&parsed), vec!["W002", "U011", "U006"]);
    // The truncated string literal is wrapped in an error node, and the
    // rest of the input is re-scanned as ordinary tokens.
    assert!(parsed
        .diagnostics()
        .iter()
        .any(|d| d.message == "Unterminated string literal."));
}

#[test]
fn test_invalid_char_inside_tag() {
    let parsed = assert_lossless("<a \u{1F4A5}=\"1\"/>");
    assert_eq!(diagnostic_codes(&parsed), vec!["W001", "U009"]);
    assert_eq!(
        parsed.diagnostics()[0].message,
        "Invalid character '\u{1F4A5}'."
    );
}

#[test]
fn test_invalid_char_in_content_merges_silently() {
    let parsed = assert_lossless("<a>&broken text</a>");
    assert!(parsed.diagnostics().is_empty());
}

#[test]
fn test_namespace_without_tag_name() {
    let parsed = assert_lossless("<ns:>");
    let codes = diagnostic_codes(&parsed);
    assert_eq!(codes, vec!["U014", "U015"]);
    assert_eq!(
        parsed.diagnostics()[0].message,
        "A tag name expected after namespace 'ns'."
    );
}

#[test]
fn test_namespace_without_attr_name() {
    let parsed = assert_lossless("<a ns:=\"1\"/>");
    let codes = diagnostic_codes(&parsed);
    assert_eq!(codes[0], "U016");
    assert_eq!(
        parsed.diagnostics()[0].message,
        "An attribute name expected after namespace 'ns'."
    );
}

#[test]
fn test_unclosed_nested_tag() {
    let parsed = assert_lossless("<a><b></a>");
    // The inner element consumes `</a>` and reports the mismatch; the
    // outer element is then left unclosed.
    assert_eq!(diagnostic_codes(&parsed), vec!["U007", "U015"]);
}

#[test]
fn test_unterminated_comment() {
    let parsed = assert_lossless("<!-- never closed");
    assert_eq!(diagnostic_codes(&parsed)[0], "W007");
}

#[test]
fn test_unterminated_script_shorter_than_prefix() {
    // The bad-prefix length for scripts overshoots this input's length.
    let parsed = assert_lossless("<script>");
    assert_eq!(diagnostic_codes(&parsed), vec!["W009"]);
}

#[test]
fn test_diagnostics_carry_context_windows() {
    let source = "<App>\n  <Button>\n</App>\n";
    let parsed = assert_lossless(source);
    let diag = parsed
        .diagnostics()
        .iter()
        .find(|d| d.code.as_str() == "U007")
        .unwrap();
    // One surrounding line on each side of the mismatching closing name;
    // the document end caps the window.
    assert_eq!(&source[diag.context_range], "  <Button>\n</App>\n");
}

#[test]
fn test_error_severity_vs_warning() {
    let parsed = parse("<a>&amp;</a>");
    assert!(parsed.ok());

    let parsed = parse("<!-- unterminated");
    // Lexical problems are warnings; the parse still counts as ok.
    assert!(parsed.errors().next().is_none());
    assert!(!parsed.diagnostics().is_empty());
}
