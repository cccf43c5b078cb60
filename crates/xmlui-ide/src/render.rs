//! Line-numbered source listings.

use text_size::TextRange;

use crate::document::Document;

/// Renders the whole source with one-based line numbers. Lines overlapping
/// `highlight` are marked with an arrow.
#[must_use]
pub fn source_with_line_numbers(doc: &Document, highlight: Option<TextRange>) -> String {
    let highlight_lines =
        highlight.map(|range| (doc.line_of(range.start()), doc.line_of(range.end())));
    doc.source()
        .split('\n')
        .enumerate()
        .map(|(idx, line)| {
            let line_num = idx as u32 + 1;
            let marked = highlight_lines
                .is_some_and(|(first, last)| line_num >= first && line_num <= last);
            let prefix = if marked { "→ " } else { "  " };
            format!("{prefix}{line_num:>4}: {line}")
        })
        .collect::<Vec<_>>()
        .join("\n")
}
