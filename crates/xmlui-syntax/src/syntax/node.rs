//! The CST node representation.
//!
//! Every element of the tree, whether a single token or a composite
//! construct, is a [`Node`]. Nodes are immutable once built and own their
//! children outright; parent context only ever lives on the call stack of a
//! traversal.

use text_size::{TextRange, TextSize};

use super::SyntaxKind;

/// One node of the concrete syntax tree.
///
/// A node tracks three offsets:
///
/// - `start`: first byte including leading trivia
/// - `pos`: first byte of the node's own content, excluding leading trivia
/// - `end`: one past the last byte
///
/// For a token without trivia, `start == pos`. For a composite node, `pos`
/// and `start` come from its first child and `end` from its last child.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub(crate) kind: SyntaxKind,
    pub(crate) pos: TextSize,
    pub(crate) end: TextSize,
    pub(crate) start: TextSize,
    pub(crate) trivia_before: Option<Vec<Node>>,
    pub(crate) children: Option<Vec<Node>>,
}

impl Node {
    /// Creates a leaf token node, deriving `start` from the leading trivia.
    #[must_use]
    pub fn token(
        kind: SyntaxKind,
        pos: TextSize,
        end: TextSize,
        trivia_before: Option<Vec<Node>>,
    ) -> Self {
        let start = trivia_before
            .as_ref()
            .and_then(|trivia| trivia.first())
            .map_or(pos, |first| first.start);
        Self {
            kind,
            pos,
            end,
            start,
            trivia_before,
            children: None,
        }
    }

    /// Creates a composite node from its children.
    ///
    /// # Panics
    ///
    /// Panics if `children` is empty; an in-progress node that ends up with
    /// no children must be abandoned, not completed.
    #[must_use]
    pub fn composite(kind: SyntaxKind, children: Vec<Node>) -> Self {
        let first = children.first().expect("composite node with no children");
        let last = children.last().expect("composite node with no children");
        let (pos, start) = (first.pos, first.start);
        let end = last.end;
        Self {
            kind,
            pos,
            end,
            start,
            trivia_before: None,
            children: Some(children),
        }
    }

    /// The kind of this node.
    #[must_use]
    pub fn kind(&self) -> SyntaxKind {
        self.kind
    }

    /// Offset of the first byte of this node's own content, excluding trivia.
    #[must_use]
    pub fn pos(&self) -> TextSize {
        self.pos
    }

    /// Offset one past this node's last byte.
    #[must_use]
    pub fn end(&self) -> TextSize {
        self.end
    }

    /// Offset of the first byte including leading trivia.
    #[must_use]
    pub fn start(&self) -> TextSize {
        self.start
    }

    /// The trivia-inclusive span, `start..end`.
    #[must_use]
    pub fn range(&self) -> TextRange {
        TextRange::new(self.start, self.end)
    }

    /// The trivia-exclusive span, `pos..end`.
    #[must_use]
    pub fn content_range(&self) -> TextRange {
        TextRange::new(self.pos, self.end)
    }

    /// Leading trivia not already claimed by a preceding sibling.
    #[must_use]
    pub fn trivia_before(&self) -> Option<&[Node]> {
        self.trivia_before.as_deref()
    }

    /// Ordered children; `None` on leaf tokens.
    #[must_use]
    pub fn children(&self) -> Option<&[Node]> {
        self.children.as_deref()
    }

    /// The node's text without leading trivia.
    ///
    /// # Panics
    ///
    /// Panics if `source` is not the text this node was parsed from.
    #[must_use]
    pub fn text<'s>(&self, source: &'s str) -> &'s str {
        &source[usize::from(self.pos)..usize::from(self.end)]
    }

    /// The node's text as written, including leading trivia.
    ///
    /// # Panics
    ///
    /// Panics if `source` is not the text this node was parsed from.
    #[must_use]
    pub fn full_text<'s>(&self, source: &'s str) -> &'s str {
        &source[usize::from(self.start)..usize::from(self.end)]
    }

    /// Returns `true` for [`SyntaxKind::Element`] nodes.
    #[must_use]
    pub fn is_element(&self) -> bool {
        self.kind == SyntaxKind::Element
    }

    /// Returns `true` for [`SyntaxKind::Attribute`] nodes.
    #[must_use]
    pub fn is_attribute(&self) -> bool {
        self.kind == SyntaxKind::Attribute
    }

    /// Returns `true` for elements and the raw CDATA/script blocks.
    #[must_use]
    pub fn is_tag_like(&self) -> bool {
        matches!(
            self.kind,
            SyntaxKind::Element | SyntaxKind::CData | SyntaxKind::Script
        )
    }

    /// Returns `true` for [`SyntaxKind::TagName`] nodes.
    #[must_use]
    pub fn is_tag_name(&self) -> bool {
        self.kind == SyntaxKind::TagName
    }

    /// The trivia nodes covering `start..pos`, if any.
    ///
    /// For a composite node this descends into the first child, which is
    /// where the parser attaches leading trivia.
    #[must_use]
    pub fn trivia_nodes(&self) -> Option<&[Node]> {
        if self.pos == self.start {
            None
        } else if let Some(trivia) = &self.trivia_before {
            Some(trivia)
        } else {
            self.children.as_ref()?.first()?.trivia_nodes()
        }
    }

    /// Finds the token containing `offset`, as a root-to-leaf chain.
    ///
    /// When `offset` falls into the trivia gap between two tokens, both the
    /// token before and the token at the offset are reported, along with the
    /// number of ancestors the two chains share.
    #[must_use]
    pub fn find_token_at_offset(&self, offset: TextSize) -> Option<OffsetLookup<'_>> {
        if self.start > offset || offset > self.end {
            return None;
        }

        let mut chain: Vec<&Node> = vec![self];
        let mut node = self;
        while let Some(children) = node.children() {
            let Some(idx) = children.iter().position(|n| {
                n.start <= offset
                    && (offset < n.end || (n.kind == SyntaxKind::Eof && n.start <= n.end))
            }) else {
                break;
            };

            let at_pos = &children[idx];
            if idx > 0 && offset <= at_pos.pos {
                let shared_parents = chain.len();
                let mut chain_before_pos = chain.clone();
                chain_before_pos.extend(children[idx - 1].last_token_chain());
                chain.extend(at_pos.first_token_chain());
                return Some(OffsetLookup {
                    chain_at_pos: chain,
                    chain_before_pos: Some(chain_before_pos),
                    shared_parents: Some(shared_parents),
                });
            }

            node = at_pos;
            chain.push(node);
        }

        Some(OffsetLookup {
            chain_at_pos: chain,
            chain_before_pos: None,
            shared_parents: None,
        })
    }

    /// The chain from this node down to its first token.
    #[must_use]
    pub fn first_token_chain(&self) -> Vec<&Node> {
        let mut chain = vec![self];
        let mut node = self;
        while let Some(first) = node.children().and_then(<[Node]>::first) {
            chain.push(first);
            node = first;
        }
        chain
    }

    /// Renders the subtree as an indented listing of kinds, spans, and
    /// token texts. Intended for tests and debugging.
    #[must_use]
    pub fn debug_dump(&self, source: &str) -> String {
        let mut out = String::new();
        self.dump_into(&mut out, source, 0);
        out
    }

    fn dump_into(&self, out: &mut String, source: &str, depth: usize) {
        use std::fmt::Write;

        if let Some(trivia) = self.trivia_before() {
            for trivia_node in trivia {
                trivia_node.dump_into(out, source, depth);
            }
        }
        let indent = "  ".repeat(depth);
        if let Some(children) = self.children() {
            let _ = writeln!(out, "{indent}{:?}@{:?}", self.kind, self.content_range());
            for child in children {
                child.dump_into(out, source, depth + 1);
            }
        } else {
            let _ = writeln!(
                out,
                "{indent}{:?}@{:?} {:?}",
                self.kind,
                self.content_range(),
                self.text(source)
            );
        }
    }

    /// The chain from this node down to its last token.
    #[must_use]
    pub fn last_token_chain(&self) -> Vec<&Node> {
        let mut chain = vec![self];
        let mut node = self;
        while let Some(last) = node.children().and_then(<[Node]>::last) {
            chain.push(last);
            node = last;
        }
        chain
    }
}

/// Result of [`Node::find_token_at_offset`].
#[derive(Debug)]
pub struct OffsetLookup<'a> {
    /// Root-to-leaf chain for the node at the offset.
    pub chain_at_pos: Vec<&'a Node>,
    /// Root-to-leaf chain for the token just before the offset, when the
    /// offset falls between two tokens.
    pub chain_before_pos: Option<Vec<&'a Node>>,
    /// How many leading ancestors the two chains share.
    pub shared_parents: Option<usize>,
}

/// Structural tag-name equality, ignoring `Error` children on either side.
///
/// A tag name that itself contains a recovered error already has a
/// diagnostic; comparing only the intact parts avoids piling a spurious
/// mismatch on top of it.
#[must_use]
pub fn tag_name_nodes_match(name1: &Node, name2: &Node, source: &str) -> bool {
    let intact = |name: &'_ Node| -> Vec<TextRange> {
        name.children()
            .unwrap_or(&[])
            .iter()
            .filter(|child| child.kind != SyntaxKind::Error)
            .map(Node::content_range)
            .collect()
    };

    let children1 = intact(name1);
    let children2 = intact(name2);
    children1.len() == children2.len()
        && children1
            .iter()
            .zip(&children2)
            .all(|(r1, r2)| source[*r1] == source[*r2])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(kind: SyntaxKind, pos: u32, end: u32) -> Node {
        Node::token(kind, pos.into(), end.into(), None)
    }

    #[test]
    fn test_token_start_from_trivia() {
        let ws = token(SyntaxKind::Whitespace, 0, 2);
        let ident = Node::token(SyntaxKind::Ident, 2.into(), 5.into(), Some(vec![ws]));
        assert_eq!(ident.start(), 0.into());
        assert_eq!(ident.pos(), 2.into());
        assert_eq!(ident.end(), 5.into());
        assert!(ident.trivia_nodes().is_some());
    }

    #[test]
    fn test_composite_offsets_from_children() {
        let ws = token(SyntaxKind::Whitespace, 0, 1);
        let open = Node::token(SyntaxKind::OpenTagStart, 1.into(), 2.into(), Some(vec![ws]));
        let name = token(SyntaxKind::Ident, 2, 3);
        let close = token(SyntaxKind::SelfClose, 3, 5);
        let element = Node::composite(SyntaxKind::Element, vec![open, name, close]);

        assert_eq!(element.start(), 0.into());
        assert_eq!(element.pos(), 1.into());
        assert_eq!(element.end(), 5.into());
        // Trivia lives on the first child.
        assert_eq!(element.trivia_nodes().map(<[Node]>::len), Some(1));
    }

    #[test]
    fn test_find_token_at_offset() {
        let open = token(SyntaxKind::OpenTagStart, 0, 1);
        let name = token(SyntaxKind::Ident, 1, 4);
        let close = token(SyntaxKind::SelfClose, 4, 6);
        let element = Node::composite(SyntaxKind::Element, vec![open, name, close]);

        let lookup = element.find_token_at_offset(2.into()).unwrap();
        let leaf = lookup.chain_at_pos.last().unwrap();
        assert_eq!(leaf.kind(), SyntaxKind::Ident);
        assert!(lookup.chain_before_pos.is_none());

        assert!(element.find_token_at_offset(7.into()).is_none());
    }

    #[test]
    fn test_find_token_in_trivia_gap() {
        let ident = token(SyntaxKind::Ident, 0, 1);
        let ws = token(SyntaxKind::Whitespace, 1, 3);
        let next = Node::token(SyntaxKind::Ident, 3.into(), 4.into(), Some(vec![ws]));
        let list = Node::composite(SyntaxKind::ContentList, vec![ident, next]);

        let lookup = list.find_token_at_offset(2.into()).unwrap();
        assert_eq!(lookup.shared_parents, Some(1));
        let before = lookup.chain_before_pos.unwrap();
        assert_eq!(before.last().unwrap().kind(), SyntaxKind::Ident);
        assert_eq!(before.last().unwrap().end(), 1.into());
    }

    #[test]
    fn test_tag_name_match_ignores_error_children() {
        let source = "a:ba:b";
        let name1 = Node::composite(
            SyntaxKind::TagName,
            vec![
                token(SyntaxKind::Ident, 0, 1),
                token(SyntaxKind::Colon, 1, 2),
                token(SyntaxKind::Ident, 2, 3),
            ],
        );
        let err = Node::composite(SyntaxKind::Error, vec![token(SyntaxKind::Unknown, 6, 6)]);
        let name2 = Node::composite(
            SyntaxKind::TagName,
            vec![
                token(SyntaxKind::Ident, 3, 4),
                token(SyntaxKind::Colon, 4, 5),
                token(SyntaxKind::Ident, 5, 6),
                err,
            ],
        );
        assert!(tag_name_nodes_match(&name1, &name2, source));
    }
}
