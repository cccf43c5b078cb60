//! Content-token merging: free text inside element content collapses into
//! single spans, with comments and adjacent string literals handled
//! specially.

mod common;
use common::*;

fn content_children<'a>(parsed: &'a Parse, source: &str) -> &'a [Node] {
    let element = &parsed.root().children().unwrap()[0];
    assert_eq!(element.kind(), SyntaxKind::Element, "in {source:?}");
    element
        .children()
        .unwrap()
        .iter()
        .find(|c| c.kind() == SyntaxKind::ContentList)
        .unwrap_or_else(|| panic!("no content list in {source:?}"))
        .children()
        .unwrap()
}

#[test]
fn test_mixed_tokens_merge_into_one_text() {
    let source = "<a>words, digits 42 = punct!</a>";
    let parsed = assert_lossless(source);
    let content = content_children(&parsed, source);
    assert_eq!(content.len(), 1);
    assert_eq!(content[0].kind(), SyntaxKind::Text);
    assert_eq!(content[0].text(source), "words, digits 42 = punct!");
}

#[test]
fn test_leading_comment_stays_trivia() {
    let source = "<a><!--c-->text</a>";
    let parsed = assert_lossless(source);
    let content = content_children(&parsed, source);
    assert_eq!(content.len(), 1);
    let text = &content[0];
    assert_eq!(text.text(source), "text");
    let trivia = text.trivia_before().unwrap();
    assert_eq!(trivia.len(), 1);
    assert_eq!(trivia[0].kind(), SyntaxKind::Comment);
}

#[test]
fn test_second_comment_group_splits_text() {
    let source = "<a>x <!--c1--> <!--c2--> y</a>";
    let parsed = assert_lossless(source);
    let content = content_children(&parsed, source);
    let texts: Vec<_> = content.iter().map(|n| n.text(source)).collect();
    assert_eq!(texts, vec!["x ", " ", " y"]);
    // Each comment rides as trivia on the following text span.
    assert!(content[1].trivia_before().is_some());
    assert!(content[2].trivia_before().is_some());
}

#[test]
fn test_comment_only_content_is_no_content() {
    let source = "<a><!--c--></a>";
    let parsed = assert_lossless(source);
    let element = &parsed.root().children().unwrap()[0];
    let kinds: Vec<_> = element.children().unwrap().iter().map(Node::kind).collect();
    assert_eq!(
        kinds,
        vec![
            SyntaxKind::OpenTagStart,
            SyntaxKind::TagName,
            SyntaxKind::TagEnd,
            SyntaxKind::CloseTagStart,
            SyntaxKind::TagName,
            SyntaxKind::TagEnd,
        ]
    );
    // The comment rides as trivia on the closing delimiter.
    let close = &element.children().unwrap()[3];
    assert_eq!(close.trivia_nodes().map(<[Node]>::len), Some(1));
}

#[test]
fn test_string_literal_kept_at_markup_boundary() {
    for source in ["<a>\"hi\"</a>", "<a>'hi'</a>", "<a>`hi`</a>"] {
        let parsed = assert_lossless(source);
        let content = content_children(&parsed, source);
        assert_eq!(content.len(), 1, "in {source:?}");
        assert_eq!(content[0].kind(), SyntaxKind::StringLiteral);
    }
}

#[test]
fn test_string_literal_followed_by_text_merges() {
    let source = "<a>\"hi\" and more</a>";
    let parsed = assert_lossless(source);
    let content = content_children(&parsed, source);
    assert_eq!(content.len(), 1);
    assert_eq!(content[0].kind(), SyntaxKind::Text);
    assert_eq!(content[0].text(source), "\"hi\" and more");
}

#[test]
fn test_entities_merge_into_text() {
    let source = "<a>&amp;b &lt;tag&gt;</a>";
    let parsed = assert_lossless(source);
    assert!(parsed.diagnostics().is_empty());
    let content = content_children(&parsed, source);
    assert_eq!(content.len(), 1);
    assert_eq!(content[0].text(source), "&amp;b &lt;tag&gt;");
}

#[test]
fn test_top_level_string_before_element_is_error() {
    let source = "\"s\"<a/>";
    let parsed = assert_lossless(source);
    assert_eq!(diagnostic_codes(&parsed), vec!["U003"]);
    let kinds: Vec<_> = parsed.root().children().unwrap().iter().map(Node::kind).collect();
    assert_eq!(
        kinds,
        vec![SyntaxKind::Error, SyntaxKind::Element, SyntaxKind::Eof]
    );
}

#[test]
fn test_top_level_lone_string_merges_to_text() {
    // With nothing after it, a quoted run is just text.
    let parsed = assert_lossless("\"s\"");
    assert!(parsed.ok());
    assert_eq!(parsed.root().children().unwrap()[0].kind(), SyntaxKind::Text);
}

#[test]
fn test_cdata_and_script_pass_through() {
    let source = "<a><![CDATA[x < y]]><script>if (a < b) {}</script></a>";
    let parsed = assert_lossless(source);
    let content = content_children(&parsed, source);
    let kinds: Vec<_> = content.iter().map(Node::kind).collect();
    assert_eq!(kinds, vec![SyntaxKind::CData, SyntaxKind::Script]);
}
