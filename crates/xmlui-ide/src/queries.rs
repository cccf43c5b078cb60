//! Read-only queries over a parsed document.
//!
//! All lookups are plain depth-first walks over the concrete syntax tree.
//! `Error` nodes never match anything structurally; the walks descend
//! through them so partially broken documents still answer queries for
//! their intact parts.

use indexmap::IndexMap;
use smol_str::SmolStr;
use text_size::TextRange;

use xmlui_syntax::syntax::{Node, SyntaxKind};

use crate::document::Document;

/// One element matched by a query.
#[derive(Debug)]
pub struct ElementHit<'a> {
    /// The matched `Element` node.
    pub node: &'a Node,
    /// The element's tag name (namespace prefix included, if any).
    pub tag_name: SmolStr,
    /// The element's attributes, in source order, values unquoted.
    pub attributes: IndexMap<SmolStr, String>,
    /// The element's span, leading trivia included.
    pub range: TextRange,
    /// One-based line where the element's own content starts.
    pub start_line: u32,
    /// One-based line of the element's last byte.
    pub end_line: u32,
}

/// One event-handler attribute matched by a query.
#[derive(Debug)]
pub struct HandlerHit<'a> {
    /// The matched `Attribute` node.
    pub node: &'a Node,
    /// The attribute key, as written.
    pub key: SmolStr,
    /// The attribute value, unquoted; empty when the value is missing.
    pub value: String,
    /// The attribute's span, leading trivia included.
    pub range: TextRange,
    /// One-based line of the attribute.
    pub line: u32,
}

/// Finds the first element whose `id` attribute equals `id`.
#[must_use]
pub fn find_by_id<'a>(doc: &'a Document, id: &str) -> Option<ElementHit<'a>> {
    find_by_attribute(doc, "id", id)
}

/// Finds the first element with an attribute `name` whose value equals
/// `value`.
#[must_use]
pub fn find_by_attribute<'a>(doc: &'a Document, name: &str, value: &str) -> Option<ElementHit<'a>> {
    let mut found = None;
    walk(doc.root(), &mut |node| {
        if found.is_none() && node.kind() == SyntaxKind::Element {
            let attrs = attributes_of(doc, node);
            if attrs.get(name).is_some_and(|v| v == value) {
                found = Some(element_hit(doc, node, attrs));
            }
        }
    });
    found
}

/// Finds every element with the given tag name, in document order.
#[must_use]
pub fn find_by_tag_name<'a>(doc: &'a Document, tag_name: &str) -> Vec<ElementHit<'a>> {
    let mut hits = Vec::new();
    walk(doc.root(), &mut |node| {
        if node.kind() == SyntaxKind::Element && tag_name_of(doc, node).as_deref() == Some(tag_name)
        {
            let attrs = attributes_of(doc, node);
            hits.push(element_hit(doc, node, attrs));
        }
    });
    hits
}

/// Finds every event-handler attribute in the document.
///
/// With `event` given, matches `on<event>` case-insensitively; without it,
/// matches any `on`-prefixed key whose third character is uppercase.
#[must_use]
pub fn find_handlers<'a>(doc: &'a Document, event: Option<&str>) -> Vec<HandlerHit<'a>> {
    let mut hits = Vec::new();
    walk(doc.root(), &mut |node| {
        if node.kind() != SyntaxKind::Element {
            return;
        }
        for attr in attribute_nodes(node) {
            let Some(key) = attr_key(doc, attr) else {
                continue;
            };
            let matches = match event {
                Some(event) => key.eq_ignore_ascii_case(&format!("on{event}")),
                None => {
                    key.starts_with("on")
                        && key.as_bytes().get(2).is_some_and(u8::is_ascii_uppercase)
                }
            };
            if matches {
                hits.push(handler_hit(doc, attr, key));
            }
        }
    });
    hits
}

/// Finds the `on<event>` handler on the element with the given `id`, if
/// both exist. Key comparison is case-insensitive.
#[must_use]
pub fn find_handler<'a>(
    doc: &'a Document,
    element_id: &str,
    event: &str,
) -> Option<HandlerHit<'a>> {
    let element = find_by_id(doc, element_id)?;
    let target = format!("on{event}");
    for attr in attribute_nodes(element.node) {
        if let Some(key) = attr_key(doc, attr) {
            if key.eq_ignore_ascii_case(&target) {
                return Some(handler_hit(doc, attr, key));
            }
        }
    }
    None
}

/// The tag name of an element, as written (namespace prefix included).
#[must_use]
pub fn tag_name_of(doc: &Document, element: &Node) -> Option<SmolStr> {
    element
        .children()?
        .iter()
        .find(|child| child.kind() == SyntaxKind::TagName)
        .map(|name| SmolStr::new(doc.text(name)))
}

/// All attributes of an element, in source order, values unquoted.
/// Attributes without a key (error recovery leftovers) are skipped.
#[must_use]
pub fn attributes_of(doc: &Document, element: &Node) -> IndexMap<SmolStr, String> {
    let mut attrs = IndexMap::new();
    for attr in attribute_nodes(element) {
        if let Some(key) = attr_key(doc, attr) {
            attrs.insert(key, attr_value(doc, attr).unwrap_or_default());
        }
    }
    attrs
}

fn walk<'a>(node: &'a Node, visit: &mut impl FnMut(&'a Node)) {
    visit(node);
    for child in node.children().unwrap_or(&[]) {
        walk(child, visit);
    }
}

fn attribute_nodes(element: &Node) -> impl Iterator<Item = &Node> {
    element
        .children()
        .unwrap_or(&[])
        .iter()
        .find(|child| child.kind() == SyntaxKind::AttributeList)
        .and_then(Node::children)
        .unwrap_or(&[])
        .iter()
        .filter(|child| child.kind() == SyntaxKind::Attribute)
}

fn attr_key(doc: &Document, attr: &Node) -> Option<SmolStr> {
    attr.children()?
        .iter()
        .find(|child| child.kind() == SyntaxKind::AttributeKey)
        .map(|key| SmolStr::new(doc.text(key)))
}

fn attr_value(doc: &Document, attr: &Node) -> Option<String> {
    attr.children()?
        .iter()
        .find(|child| child.kind() == SyntaxKind::StringLiteral)
        .map(|value| strip_quotes(doc.text(value)).to_string())
}

/// Removes one pair of matching surrounding quotes; anything else is
/// returned as-is.
fn strip_quotes(raw: &str) -> &str {
    raw.strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .or_else(|| {
            raw.strip_prefix('\'')
                .and_then(|rest| rest.strip_suffix('\''))
        })
        .unwrap_or(raw)
}

fn element_hit<'a>(
    doc: &Document,
    node: &'a Node,
    attributes: IndexMap<SmolStr, String>,
) -> ElementHit<'a> {
    ElementHit {
        node,
        tag_name: tag_name_of(doc, node).unwrap_or_default(),
        attributes,
        range: node.range(),
        start_line: doc.line_of(node.pos()),
        end_line: doc.line_of(node.end()),
    }
}

fn handler_hit<'a>(doc: &Document, attr: &'a Node, key: SmolStr) -> HandlerHit<'a> {
    HandlerHit {
        node: attr,
        key,
        value: attr_value(doc, attr).unwrap_or_default(),
        range: attr.range(),
        line: doc.line_of(attr.pos()),
    }
}
