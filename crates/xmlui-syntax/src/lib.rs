//! `xmlui-syntax` - Scanner, parser, and concrete syntax tree for XMLUI markup.
//!
//! This crate provides the low-level syntactic analysis for XMLUI documents
//! (tags, attributes, text content, comments, CDATA sections, inline script
//! blocks, and the five XML character entities):
//!
//! - **Scanner**: Tokenizes source text one token at a time, with
//!   single-codepoint lookahead and offset rewinding for context-sensitive
//!   decisions
//! - **Parser**: Builds a concrete syntax tree (CST) from tokens, merging
//!   free text inside element content into single spans
//! - **Syntax Tree**: Lossless representation of the source code
//!
//! # Design Principles
//!
//! - **Lossless**: Every byte of the input is represented somewhere in the
//!   tree; concatenating leaf spans in document order reconstructs the source
//! - **Error-tolerant**: Parsing never fails; malformed constructs become
//!   `Error` nodes paired with diagnostics, and parsing always reaches
//!   end of input
//! - **Offset-precise**: All spans are byte offsets (`text_size::TextSize`),
//!   suitable for editors and linters
//!
//! # Example
//!
//! ```
//! use xmlui_syntax::{parse, SyntaxKind};
//!
//! let parsed = parse(r#"<Button id="ok" label="Go" />"#);
//! assert!(parsed.ok());
//!
//! let root = parsed.root();
//! assert_eq!(root.kind(), SyntaxKind::ContentList);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod cursor;
pub mod diagnostics;
pub mod parser;
pub mod scanner;
pub mod syntax;

pub use cursor::{DocumentCursor, Position};
pub use diagnostics::{Diagnostic, DiagnosticCode, Severity};
pub use parser::{parse, Parse};
pub use scanner::Scanner;
pub use syntax::{tag_name_nodes_match, Node, SyntaxKind};
