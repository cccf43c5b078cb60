//! Syntax tree types for XMLUI markup.
//!
//! This module defines the `SyntaxKind` enum covering both raw tokens and
//! composite nodes, and the owned-children [`Node`] type that forms the
//! lossless concrete syntax tree.

mod node;

pub use node::{tag_name_nodes_match, Node, OffsetLookup};

/// All syntax node and token kinds in XMLUI markup.
///
/// The enum covers token kinds (produced by the scanner) followed by
/// composite node kinds (produced by the parser). Consumers are expected to
/// match exhaustively; there is no catch-all kind beyond [`Unknown`], which
/// the scanner uses for invalid characters.
///
/// [`Unknown`]: SyntaxKind::Unknown
// Token variants mirror the scanner's lexical rules; documenting each would be noisy.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
pub enum SyntaxKind {
    // =========================================================================
    // TOKEN KINDS (produced by the scanner)
    // =========================================================================
    Unknown,
    Comment,
    Newline,
    Whitespace,
    Ident,
    /// `<`
    OpenTagStart,
    /// `</`
    CloseTagStart,
    /// `>`
    TagEnd,
    /// `/>`
    SelfClose,
    Colon,
    Equal,
    StringLiteral,
    /// A whole `<![CDATA[ ... ]]>` section, scanned as one raw token.
    CData,
    /// A whole `<script> ... </script>` block, scanned as one raw token.
    Script,
    /// A merged run of free text inside element content.
    Text,
    /// `&amp;`
    AmpEntity,
    /// `&lt;`
    LtEntity,
    /// `&gt;`
    GtEntity,
    /// `&quot;`
    QuotEntity,
    /// `&apos;`
    AposEntity,
    /// Zero-width end-of-input token.
    Eof,

    // =========================================================================
    // COMPOSITE NODE KINDS (produced by the parser)
    // =========================================================================
    /// An element: open delimiter, tag name, attributes, and either a
    /// self-close or content plus a closing tag.
    Element,

    /// One attribute: key, optional `=` and string value.
    Attribute,

    /// An attribute key: identifier with optional namespace prefix.
    AttributeKey,

    /// The attributes of one element; omitted entirely when empty.
    AttributeList,

    /// Element (or file-level) content; omitted when empty except at the root.
    ContentList,

    /// A tag name: identifier with optional namespace prefix.
    TagName,

    /// Tokens skipped during error recovery; never empty.
    Error,
}

impl SyntaxKind {
    /// Returns `true` if this is a trivia kind (comment, newline, whitespace).
    #[must_use]
    pub fn is_trivia(self) -> bool {
        matches!(self, Self::Comment | Self::Newline | Self::Whitespace)
    }

    /// Returns `true` if this is a token kind (not a composite node).
    #[must_use]
    pub fn is_token(self) -> bool {
        (self as u16) <= (Self::Eof as u16)
    }

    /// Returns `true` if this is a composite node kind.
    #[must_use]
    pub fn is_node(self) -> bool {
        !self.is_token()
    }
}
