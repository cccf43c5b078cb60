//! Offset to line/column mapping over a document.
//!
//! The parser works purely in byte offsets; [`DocumentCursor`] is the
//! collaborator that turns those offsets into human-readable positions and
//! whole-line context windows for diagnostics. Lines are split on `\n`,
//! `\r\n`, and lone `\r` only.

use text_size::{TextRange, TextSize};

/// A zero-based line/column position. `character` counts bytes within the
/// line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    /// Zero-based line index.
    pub line: u32,
    /// Zero-based byte offset within the line.
    pub character: u32,
}

/// A line index over one immutable document.
pub struct DocumentCursor<'s> {
    text: &'s str,
    /// Start offset of every line; always begins with 0.
    line_offsets: Vec<TextSize>,
}

impl<'s> DocumentCursor<'s> {
    /// Builds the line index for `text`.
    #[must_use]
    pub fn new(text: &'s str) -> Self {
        let bytes = text.as_bytes();
        let mut line_offsets = vec![TextSize::from(0)];
        let mut i = 0;
        while i < bytes.len() {
            match bytes[i] {
                b'\n' => line_offsets.push(TextSize::from(i as u32 + 1)),
                b'\r' => {
                    if i + 1 < bytes.len() && bytes[i + 1] == b'\n' {
                        i += 1;
                    }
                    line_offsets.push(TextSize::from(i as u32 + 1));
                }
                _ => {}
            }
            i += 1;
        }
        Self { text, line_offsets }
    }

    /// Length of the document in bytes.
    #[must_use]
    pub fn text_len(&self) -> TextSize {
        TextSize::of(self.text)
    }

    /// Number of lines; at least 1, even for the empty document.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.line_offsets.len()
    }

    /// Converts an offset to a zero-based position. Out-of-range offsets are
    /// clamped to the document.
    #[must_use]
    pub fn position_at(&self, offset: TextSize) -> Position {
        let offset = offset.min(self.text_len());
        let line = self
            .line_offsets
            .partition_point(|&start| start <= offset)
            - 1;
        Position {
            line: line as u32,
            character: u32::from(offset - self.line_offsets[line]),
        }
    }

    /// Converts a position back to an offset. Positions past the end of a
    /// line or of the document are clamped.
    #[must_use]
    pub fn offset_at(&self, position: Position) -> TextSize {
        let line = position.line as usize;
        if line >= self.line_offsets.len() {
            return self.text_len();
        }
        let line_offset = self.line_offsets[line];
        if position.character == 0 {
            return line_offset;
        }
        let next_line_offset = self
            .line_offsets
            .get(line + 1)
            .copied()
            .unwrap_or_else(|| self.text_len());
        (line_offset + TextSize::from(position.character)).min(next_line_offset)
    }

    /// Converts an offset to a one-based position for display.
    #[must_use]
    pub fn display_position_at(&self, offset: TextSize) -> Position {
        let pos = self.position_at(offset);
        Position {
            line: pos.line + 1,
            character: pos.character + 1,
        }
    }

    /// Expands a span to whole lines, including `surrounding_lines` extra
    /// lines on each side. The returned range excludes the trailing line
    /// terminator of its last line.
    #[must_use]
    pub fn surrounding_context(
        &self,
        pos: TextSize,
        end: TextSize,
        surrounding_lines: u32,
    ) -> TextRange {
        let start_line = self.position_at(pos).line as usize;
        let end_line = self.position_at(end).line as usize;

        let context_start_line = start_line.saturating_sub(surrounding_lines as usize);
        let context_pos = self.line_offsets[context_start_line];

        let last_context_line = (end_line + surrounding_lines as usize).min(self.line_count() - 1);
        let context_end = match self.line_offsets.get(last_context_line + 1) {
            Some(&next_line_start) => {
                let bytes = self.text.as_bytes();
                let next = usize::from(next_line_start);
                let mut eol_len = 1;
                if next > 0 && bytes[next - 1] == b'\n' && next > 1 && bytes[next - 2] == b'\r' {
                    eol_len = 2;
                }
                next_line_start - TextSize::from(eol_len)
            }
            None => self.text_len(),
        };

        TextRange::new(context_pos, context_end)
    }
}
