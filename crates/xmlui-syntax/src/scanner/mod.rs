//! Scanner for XMLUI markup.
//!
//! The scanner is hand-written rather than table-generated because the
//! parser needs operations a generated lexer cannot offer: rewinding to an
//! arbitrary offset after speculative lookahead, consuming single codepoints
//! while merging free text, and scanning raw comment/CDATA/script blocks as
//! one token each.
//!
//! The scanner never fails. Malformed input (an unterminated string, a `&`
//! that is not a known entity, a stray character) still produces a token;
//! the malformedness is reported on the side as a [`ScanError`] holding the
//! diagnostic code and the length of the bad prefix, which the parser drains
//! after every `scan()` call.

mod chars;

use text_size::{TextRange, TextSize};

use crate::diagnostics::DiagnosticCode;
use crate::syntax::SyntaxKind;

use chars::{is_identifier_part, is_identifier_start, is_whitespace_single_line};

/// A lexical problem noticed while producing the current token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanError {
    /// The stable diagnostic code (always a `W…` warning code).
    pub code: DiagnosticCode,
    /// Length of the malformed prefix of the token, in bytes.
    pub prefix_len: TextSize,
}

/// Stateful tokenizer over a source string.
///
/// `scan()` produces exactly one token per call and exposes its span via
/// [`token_start`](Scanner::token_start) and
/// [`token_end`](Scanner::token_end). After end of input, `scan()` keeps
/// returning the zero-width [`SyntaxKind::Eof`] token.
pub struct Scanner<'src> {
    text: &'src str,
    pos: usize,
    full_start: usize,
    token_start: usize,
    pending_error: Option<ScanError>,
}

impl<'src> Scanner<'src> {
    /// Creates a scanner positioned at the start of `text`.
    #[must_use]
    pub fn new(text: &'src str) -> Self {
        Self {
            text,
            pos: 0,
            full_start: 0,
            token_start: 0,
            pending_error: None,
        }
    }

    /// The source text being scanned.
    #[must_use]
    pub fn source(&self) -> &'src str {
        self.text
    }

    /// Start offset of the current token.
    #[must_use]
    pub fn token_start(&self) -> TextSize {
        TextSize::from(self.token_start as u32)
    }

    /// End offset of the current token (the scanner's cursor).
    #[must_use]
    pub fn token_end(&self) -> TextSize {
        TextSize::from(self.pos as u32)
    }

    /// The text of the current token.
    #[must_use]
    pub fn token_text(&self) -> &'src str {
        &self.text[self.token_start..self.pos]
    }

    /// Takes the lexical error recorded for the current token, if any.
    pub fn take_error(&mut self) -> Option<ScanError> {
        self.pending_error.take()
    }

    /// The next codepoint, without consuming it.
    #[must_use]
    pub fn peek_char(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// Consumes and returns the next codepoint.
    pub fn scan_char(&mut self) -> Option<char> {
        let ch = self.peek_char()?;
        self.pos += ch.len_utf8();
        Some(ch)
    }

    /// Rewinds the scanner to an arbitrary offset.
    ///
    /// Used for controlled backtracking after speculative lookahead, and to
    /// resume scanning right after the bad prefix of a malformed token.
    ///
    /// # Panics
    ///
    /// Panics if `offset` is past the end of the source or not on a
    /// character boundary.
    pub fn reset(&mut self, offset: TextSize) {
        let offset = usize::from(offset);
        assert!(
            self.text.is_char_boundary(offset),
            "reset to a non-boundary offset"
        );
        self.pos = offset;
        self.full_start = offset;
        self.token_start = offset;
        self.pending_error = None;
    }

    /// Scans exactly one token and returns its kind.
    pub fn scan(&mut self) -> SyntaxKind {
        self.full_start = self.pos;
        self.token_start = self.pos;

        let Some(ch) = self.peek_char() else {
            return SyntaxKind::Eof;
        };

        match ch {
            '\n' => {
                self.pos += 1;
                SyntaxKind::Newline
            }
            '\r' => {
                self.pos += if self.rest().starts_with("\r\n") { 2 } else { 1 };
                SyntaxKind::Newline
            }
            '"' | '\'' | '`' => self.scan_string(ch),
            '&' => self.scan_entity(),
            '=' => {
                self.pos += 1;
                SyntaxKind::Equal
            }
            ':' => {
                self.pos += 1;
                SyntaxKind::Colon
            }
            '<' => self.scan_angle(),
            '/' => {
                if self.rest().starts_with("/>") {
                    self.pos += 2;
                    SyntaxKind::SelfClose
                } else {
                    self.pos += 1;
                    self.error(DiagnosticCode::InvalidChar, 1);
                    SyntaxKind::Unknown
                }
            }
            '>' => {
                self.pos += 1;
                SyntaxKind::TagEnd
            }
            _ if is_identifier_start(ch) => {
                self.pos += ch.len_utf8();
                while self.peek_char().is_some_and(is_identifier_part) {
                    self.pos += 1;
                }
                SyntaxKind::Ident
            }
            _ if is_whitespace_single_line(ch) || matches!(ch, '\u{2028}' | '\u{2029}') => {
                while self
                    .peek_char()
                    .is_some_and(|c| is_whitespace_single_line(c) || matches!(c, '\u{2028}' | '\u{2029}'))
                {
                    self.pos += self.peek_char().map_or(0, char::len_utf8);
                }
                SyntaxKind::Whitespace
            }
            _ => {
                let size = ch.len_utf8();
                self.pos += size;
                self.error(DiagnosticCode::InvalidChar, size);
                SyntaxKind::Unknown
            }
        }
    }

    fn rest(&self) -> &'src str {
        &self.text[self.pos..]
    }

    fn error(&mut self, code: DiagnosticCode, prefix_len: usize) {
        self.pending_error = Some(ScanError {
            code,
            prefix_len: TextSize::from(prefix_len as u32),
        });
    }

    /// Scans a string literal with no escape processing. The opening quote
    /// (`"`, `'`, or backtick) must match the closing one.
    fn scan_string(&mut self, quote: char) -> SyntaxKind {
        self.pos += quote.len_utf8();
        if let Some(idx) = self.rest().find(quote) {
            self.pos += idx + quote.len_utf8();
        } else {
            self.pos = self.text.len();
            self.error(DiagnosticCode::UnterminatedString, 1);
        }
        SyntaxKind::StringLiteral
    }

    /// Scans one of the five named entities, or a one-byte invalid token.
    fn scan_entity(&mut self) -> SyntaxKind {
        let rest = self.rest();
        let (len, kind) = if rest.starts_with("&amp;") {
            (5, SyntaxKind::AmpEntity)
        } else if rest.starts_with("&lt;") {
            (4, SyntaxKind::LtEntity)
        } else if rest.starts_with("&gt;") {
            (4, SyntaxKind::GtEntity)
        } else if rest.starts_with("&quot;") {
            (6, SyntaxKind::QuotEntity)
        } else if rest.starts_with("&apos;") {
            (6, SyntaxKind::AposEntity)
        } else {
            self.pos += 1;
            self.error(DiagnosticCode::InvalidChar, 1);
            return SyntaxKind::Unknown;
        };
        self.pos += len;
        kind
    }

    /// Resolves the five alternatives starting with `<`.
    fn scan_angle(&mut self) -> SyntaxKind {
        let rest = self.rest();
        if rest.starts_with("</") {
            self.pos += 2;
            SyntaxKind::CloseTagStart
        } else if rest.starts_with("<!--") {
            self.pos += 4;
            if let Some(idx) = self.rest().find("-->") {
                self.pos += idx + 3;
                SyntaxKind::Comment
            } else {
                self.pos = self.text.len();
                self.error(DiagnosticCode::UnterminatedComment, 4);
                SyntaxKind::Unknown
            }
        } else if rest.starts_with("<![CDATA[") {
            self.pos += 9;
            if let Some(idx) = self.rest().find("]]>") {
                self.pos += idx + 3;
            } else {
                self.pos = self.text.len();
                self.error(DiagnosticCode::UnterminatedCData, 9);
            }
            SyntaxKind::CData
        } else if rest.starts_with("<script>") {
            self.pos += 8;
            if let Some(idx) = self.rest().find("</script>") {
                self.pos += idx + 9;
            } else {
                self.pos = self.text.len();
                self.error(DiagnosticCode::UnterminatedScript, 9);
            }
            SyntaxKind::Script
        } else {
            self.pos += 1;
            SyntaxKind::OpenTagStart
        }
    }
}

/// Scans the entire source and returns all token kinds with their spans.
///
/// This is a convenience for testing and debugging; the parser drives the
/// scanner token by token and handles lexical errors itself.
#[must_use]
pub fn scan_all(source: &str) -> Vec<(SyntaxKind, TextRange)> {
    let mut scanner = Scanner::new(source);
    let mut tokens = Vec::new();
    loop {
        let kind = scanner.scan();
        let _ = scanner.take_error();
        tokens.push((kind, TextRange::new(scanner.token_start(), scanner.token_end())));
        if kind == SyntaxKind::Eof {
            return tokens;
        }
    }
}
