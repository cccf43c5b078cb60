//! A parsed XMLUI document.

use text_size::TextSize;

use xmlui_syntax::cursor::DocumentCursor;
use xmlui_syntax::diagnostics::Diagnostic;
use xmlui_syntax::parser::{parse, Parse};
use xmlui_syntax::syntax::Node;

/// One source file together with its parse result.
///
/// The document owns the source text; the line index is rebuilt per query
/// via [`cursor`](Document::cursor), which keeps the type free of
/// self-references.
pub struct Document {
    source: String,
    file_name: String,
    parse: Parse,
}

impl Document {
    /// Parses `source` under the default file name `source.xmlui`.
    #[must_use]
    pub fn parse(source: impl Into<String>) -> Self {
        Self::parse_named(source, "source.xmlui")
    }

    /// Parses `source` under an explicit file name.
    #[must_use]
    pub fn parse_named(source: impl Into<String>, file_name: impl Into<String>) -> Self {
        let source = source.into();
        let parse = parse(&source);
        Self {
            source,
            file_name: file_name.into(),
            parse,
        }
    }

    /// The source text.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The file name given at construction.
    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// The root of the concrete syntax tree.
    #[must_use]
    pub fn root(&self) -> &Node {
        self.parse.root()
    }

    /// The diagnostics recorded while parsing, in discovery order.
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        self.parse.diagnostics()
    }

    /// `true` when the document parsed without syntax errors.
    #[must_use]
    pub fn ok(&self) -> bool {
        self.parse.ok()
    }

    /// The source text of a node, without leading trivia.
    #[must_use]
    pub fn text(&self, node: &Node) -> &str {
        node.text(&self.source)
    }

    /// A fresh line index over the source.
    #[must_use]
    pub fn cursor(&self) -> DocumentCursor<'_> {
        DocumentCursor::new(&self.source)
    }

    /// The one-based line number of an offset.
    #[must_use]
    pub fn line_of(&self, offset: TextSize) -> u32 {
        self.cursor().position_at(offset).line + 1
    }
}
