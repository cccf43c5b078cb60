//! `xmlui-ide` - Queries and rendering helpers over parsed XMLUI documents.
//!
//! This crate builds on `xmlui-syntax`:
//!
//! - **Document**: Owns one source text and its parse result
//! - **Queries**: Find elements by id, attribute, or tag name; locate
//!   event-handler attributes
//! - **Render**: Line-numbered source listings with optional highlighting
//!
//! # Architecture
//!
//! All queries are implemented as pure read-only walks over the finished
//! concrete syntax tree, making them easy to test and compose. Nodes
//! recovered from syntax errors are skipped transparently.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod document;
pub mod queries;
pub mod render;

pub use document::Document;
pub use queries::{
    attributes_of, find_by_attribute, find_by_id, find_by_tag_name, find_handler, find_handlers,
    tag_name_of, ElementHit, HandlerHit,
};
pub use render::source_with_line_numbers;
