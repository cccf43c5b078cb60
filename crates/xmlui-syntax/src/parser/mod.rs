//! The XMLUI parser.
//!
//! [`parse`] is the single entry point: it is total, never fails, and
//! returns a lossless concrete syntax tree plus the diagnostics discovered
//! along the way. The grammar lives in [`grammar`], the token plumbing and
//! recovery machinery in [`parser`].

mod grammar;
#[allow(clippy::module_inception)]
mod parser;

use crate::diagnostics::{Diagnostic, Severity};
use crate::syntax::{Node, SyntaxKind};

/// The result of parsing: a root [`SyntaxKind::ContentList`] node covering
/// the entire input (the end-of-input token included), and the diagnostics
/// in discovery order.
#[derive(Debug, Clone)]
pub struct Parse {
    root: Node,
    diagnostics: Vec<Diagnostic>,
}

impl Parse {
    /// The root node of the tree.
    #[must_use]
    pub fn root(&self) -> &Node {
        &self.root
    }

    /// All diagnostics, in discovery order.
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// The error-severity diagnostics only.
    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity() == Severity::Error)
    }

    /// `true` when parsing produced no error-severity diagnostics.
    /// Warnings (recoverable lexical problems) do not affect this.
    #[must_use]
    pub fn ok(&self) -> bool {
        self.errors().next().is_none()
    }

    /// Decomposes into the root node and the diagnostics.
    #[must_use]
    pub fn into_parts(self) -> (Node, Vec<Diagnostic>) {
        (self.root, self.diagnostics)
    }
}

/// Parses XMLUI markup into a lossless concrete syntax tree.
///
/// Every input, the empty string included, produces a tree; malformed
/// markup is recovered into `Error` nodes paired with diagnostics.
#[must_use]
pub fn parse(text: &str) -> Parse {
    let mut p = parser::Parser::new(text);
    grammar::file(&mut p);
    let (root, diagnostics) = p.finish();
    Parse { root, diagnostics }
}
