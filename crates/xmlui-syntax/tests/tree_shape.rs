//! Tree shapes for well-formed documents.

mod common;
use common::*;

use expect_test::expect;

#[test]
fn test_self_closing_element() {
    assert_lossless("<a/>");
    expect![[r#"
        ContentList@0..4
          Element@0..4
            OpenTagStart@0..1 "<"
            TagName@1..2
              Ident@1..2 "a"
            SelfClose@2..4 "/>"
          Eof@4..4 ""
    "#]]
    .assert_eq(&snapshot_parse("<a/>"));
}

#[test]
fn test_attribute_with_surrounding_whitespace() {
    assert_lossless("<a b=\"c\" />");
    expect![[r#"
        ContentList@0..11
          Element@0..11
            OpenTagStart@0..1 "<"
            TagName@1..2
              Ident@1..2 "a"
            AttributeList@3..8
              Attribute@3..8
                AttributeKey@3..4
                  Whitespace@2..3 " "
                  Ident@3..4 "b"
                Equal@4..5 "="
                StringLiteral@5..8 "\"c\""
            Whitespace@8..9 " "
            SelfClose@9..11 "/>"
          Eof@11..11 ""
    "#]]
    .assert_eq(&snapshot_parse("<a b=\"c\" />"));
}

#[test]
fn test_string_literal_content() {
    assert_lossless("<a>\"hi\"</a>");
    expect![[r#"
        ContentList@0..11
          Element@0..11
            OpenTagStart@0..1 "<"
            TagName@1..2
              Ident@1..2 "a"
            TagEnd@2..3 ">"
            ContentList@3..7
              StringLiteral@3..7 "\"hi\""
            CloseTagStart@7..9 "</"
            TagName@9..10
              Ident@9..10 "a"
            TagEnd@10..11 ">"
          Eof@11..11 ""
    "#]]
    .assert_eq(&snapshot_parse("<a>\"hi\"</a>"));
}

#[test]
fn test_namespaced_names() {
    let source = "<ns:a ns:b=\"1\"></ns:a>";
    let parsed = assert_lossless(source);
    assert!(parsed.ok());
    let element = &parsed.root().children().unwrap()[0];
    let tag_name = &element.children().unwrap()[1];
    assert_eq!(tag_name.kind(), SyntaxKind::TagName);
    assert_eq!(tag_name.text(source), "ns:a");
    let kinds: Vec<_> = tag_name.children().unwrap().iter().map(Node::kind).collect();
    assert_eq!(
        kinds,
        vec![SyntaxKind::Ident, SyntaxKind::Colon, SyntaxKind::Ident]
    );
}

#[test]
fn test_offsets_are_consistent() {
    let source = "  <a>  text  </a>  ";
    let parsed = assert_lossless(source);
    let element = &parsed.root().children().unwrap()[0];
    // `start` includes the leading whitespace, `pos` does not.
    assert_eq!(element.start(), 0.into());
    assert_eq!(element.pos(), 2.into());
    assert_eq!(element.end(), 17.into());
    assert_eq!(element.full_text(source), "  <a>  text  </a>");
    assert_eq!(element.text(source), "<a>  text  </a>");
}
