//! The parser driver: token plumbing, frame stack, and error recovery
//! primitives shared by all grammar productions.

use drop_bomb::DropBomb;
use text_size::{TextRange, TextSize};

use crate::cursor::DocumentCursor;
use crate::diagnostics::{Diagnostic, DiagnosticCode};
use crate::scanner::Scanner;
use crate::syntax::{Node, SyntaxKind};

/// Recursive-descent parser over one source string.
///
/// The parser owns a stack of in-progress frames; tokens and completed
/// nodes are pushed onto the top frame, and completing a [`Marker`] folds
/// the top frame into a composite node on the frame below. The bottom
/// frame collects the children of the file-level content list.
pub(crate) struct Parser<'s> {
    text: &'s str,
    scanner: Scanner<'s>,
    cursor: DocumentCursor<'s>,
    /// One-token lookahead cache.
    peeked: Option<Node>,
    frames: Vec<Vec<Node>>,
    diagnostics: Vec<Diagnostic>,
}

/// A started, not yet completed composite node.
///
/// Every marker must be either completed or abandoned; dropping one
/// without doing so is a parser bug and aborts via [`DropBomb`].
pub(crate) struct Marker {
    bomb: DropBomb,
}

impl Marker {
    /// Folds the marker's frame into a composite node of the given kind and
    /// returns its trivia-exclusive range.
    pub(crate) fn complete(mut self, p: &mut Parser<'_>, kind: SyntaxKind) -> TextRange {
        self.bomb.defuse();
        let node = p.fold_top_frame(kind);
        let range = node.content_range();
        p.push_node(node);
        range
    }

    /// Like [`complete`](Self::complete), but returns a clone of the
    /// completed node. Used for tag names, which the grammar needs to keep
    /// around for open/close matching.
    pub(crate) fn complete_cloned(mut self, p: &mut Parser<'_>, kind: SyntaxKind) -> Node {
        self.bomb.defuse();
        let node = p.fold_top_frame(kind);
        let cloned = node.clone();
        p.push_node(node);
        cloned
    }

    /// Dissolves the marker, merging any collected children into the parent
    /// frame.
    pub(crate) fn abandon(mut self, p: &mut Parser<'_>) {
        self.bomb.defuse();
        let children = p.frames.pop().expect("unbalanced marker");
        p.frames
            .last_mut()
            .expect("unbalanced marker")
            .extend(children);
    }
}

impl<'s> Parser<'s> {
    pub(crate) fn new(text: &'s str) -> Self {
        Self {
            text,
            scanner: Scanner::new(text),
            cursor: DocumentCursor::new(text),
            peeked: None,
            frames: vec![Vec::new()],
            diagnostics: Vec::new(),
        }
    }

    /// Finishes parsing, folding the bottom frame into the file-level
    /// content list.
    ///
    /// # Panics
    ///
    /// Panics if a grammar production left a frame unbalanced.
    pub(crate) fn finish(mut self) -> (Node, Vec<Diagnostic>) {
        assert_eq!(self.frames.len(), 1, "unbalanced frame stack");
        let children = self.frames.pop().expect("unbalanced frame stack");
        // The Eof token is always bumped into the file frame, so the list is
        // never empty.
        (
            Node::composite(SyntaxKind::ContentList, children),
            self.diagnostics,
        )
    }

    pub(crate) fn source(&self) -> &'s str {
        self.text
    }

    pub(crate) fn text_at(&self, range: TextRange) -> &'s str {
        &self.text[range]
    }

    pub(crate) fn text_of(&self, node: &Node) -> &'s str {
        node.text(self.text)
    }

    /// Opens a new frame for a composite node.
    pub(crate) fn start(&mut self) -> Marker {
        self.frames.push(Vec::new());
        Marker {
            bomb: DropBomb::new("markers must be completed or abandoned"),
        }
    }

    /// Whether the current frame has collected any children yet.
    pub(crate) fn frame_is_empty(&self) -> bool {
        self.frames.last().is_none_or(Vec::is_empty)
    }

    /// The next significant token, without consuming it.
    pub(crate) fn peek(&mut self) -> &Node {
        if self.peeked.is_none() {
            let token = self.collect_token(false);
            self.peeked = Some(token);
        }
        self.peeked.as_ref().expect("just filled the lookahead")
    }

    pub(crate) fn current(&mut self) -> SyntaxKind {
        self.peek().kind()
    }

    pub(crate) fn at(&mut self, kind: SyntaxKind) -> bool {
        self.current() == kind
    }

    /// Consumes the next token if it has the given kind.
    pub(crate) fn eat(&mut self, kind: SyntaxKind) -> bool {
        let matched = self.at(kind);
        if matched {
            self.bump_any();
        }
        matched
    }

    /// Consumes the next token, asserting its kind.
    ///
    /// # Panics
    ///
    /// Panics if the next token has a different kind; callers must have
    /// checked with [`at`](Self::at) first.
    pub(crate) fn bump(&mut self, kind: SyntaxKind) -> TextRange {
        let (bumped, range) = self.bump_any();
        assert_eq!(bumped, kind, "expected to bump a {kind:?}, got a {bumped:?}");
        range
    }

    /// Consumes the next token unconditionally, pushing it onto the current
    /// frame, and returns its kind and trivia-exclusive range.
    pub(crate) fn bump_any(&mut self) -> (SyntaxKind, TextRange) {
        let token = match self.peeked.take() {
            Some(token) => token,
            None => self.collect_token(false),
        };
        let kind = token.kind();
        let range = token.content_range();
        self.push_node(token);
        (kind, range)
    }

    /// Skips tokens until one of `to` (or end of input) is next.
    pub(crate) fn advance(&mut self, to: &[SyntaxKind]) {
        loop {
            let kind = self.current();
            if kind == SyntaxKind::Eof || to.contains(&kind) {
                return;
            }
            self.bump_any();
        }
    }

    /// Skips tokens until a recovery point, wrapping anything skipped into
    /// an `Error` node. Returns the error node's range, or `None` when the
    /// next token was already a recovery point.
    pub(crate) fn err_node_until(&mut self, to: &[SyntaxKind]) -> Option<TextRange> {
        let m = self.start();
        self.advance(to);
        if self.frame_is_empty() {
            m.abandon(self);
            None
        } else {
            Some(m.complete(self, SyntaxKind::Error))
        }
    }

    /// Records a diagnostic at the span of the next token.
    pub(crate) fn error(&mut self, code: DiagnosticCode, message: impl Into<String>) {
        let range = {
            let token = self.peek();
            token.content_range()
        };
        self.error_at(code, message, range);
    }

    /// Records a diagnostic at an explicit span, with one line of
    /// surrounding context.
    pub(crate) fn error_at(
        &mut self,
        code: DiagnosticCode,
        message: impl Into<String>,
        range: TextRange,
    ) {
        let context_range = self.cursor.surrounding_context(range.start(), range.end(), 1);
        self.diagnostics
            .push(Diagnostic::new(code, message, range, context_range));
    }

    fn fold_top_frame(&mut self, kind: SyntaxKind) -> Node {
        let children = self.frames.pop().expect("unbalanced marker");
        Node::composite(kind, children)
    }

    fn push_node(&mut self, node: Node) {
        self.frames
            .last_mut()
            .expect("frame stack is never empty")
            .push(node);
    }

    /// Pulls the next significant token from the scanner, gathering leading
    /// trivia onto it.
    ///
    /// When the scanner reports a lexical error, the token is truncated to
    /// its bad prefix, wrapped in an `Error` node on the current frame, and
    /// the scanner resumes right after the prefix, so re-scanning stays
    /// byte-exact across the error boundary. The one exception is an invalid
    /// character inside element content, which is returned whole and without
    /// a diagnostic so it can merge into the surrounding text.
    fn collect_token(&mut self, in_content: bool) -> Node {
        let mut trivia: Vec<Node> = Vec::new();
        loop {
            let kind = self.scanner.scan();
            if let Some(err) = self.scanner.take_error() {
                let pos = self.scanner.token_start();
                let trivia_before = if trivia.is_empty() {
                    None
                } else {
                    Some(std::mem::take(&mut trivia))
                };
                if in_content && err.code == DiagnosticCode::InvalidChar {
                    return Node::token(kind, pos, self.scanner.token_end(), trivia_before);
                }
                let message = match err.code {
                    DiagnosticCode::InvalidChar => {
                        format!("Invalid character '{}'.", self.scanner.token_text())
                    }
                    code => code.default_message().unwrap_or("").to_string(),
                };
                // The script prefix length can overshoot the end of a
                // truncated input.
                let bad_prefix_end = (pos + err.prefix_len).min(TextSize::of(self.text));
                let token = Node::token(kind, pos, bad_prefix_end, trivia_before);
                self.scanner.reset(bad_prefix_end);
                let range = TextRange::new(pos, bad_prefix_end);
                let context_range = self.cursor.surrounding_context(pos, bad_prefix_end, 0);
                self.diagnostics
                    .push(Diagnostic::new(err.code, message, range, context_range));
                self.push_node(Node::composite(SyntaxKind::Error, vec![token]));
                continue;
            }
            if kind.is_trivia() {
                trivia.push(Node::token(
                    kind,
                    self.scanner.token_start(),
                    self.scanner.token_end(),
                    None,
                ));
            } else {
                let trivia_before = if trivia.is_empty() { None } else { Some(trivia) };
                return Node::token(
                    kind,
                    self.scanner.token_start(),
                    self.scanner.token_end(),
                    trivia_before,
                );
            }
        }
    }

    /// The next token as seen from inside element content, merging free
    /// text into a single span.
    ///
    /// Markup boundaries (`<`, `</`, CDATA, script, end of input) pass
    /// through untouched. Anything else becomes a `Text` token that extends
    /// to the next `<` or end of input, with two refinements:
    ///
    /// - A run of leading comments stays trivia; the text span starts after
    ///   it. A second comment group terminates the span early, so comments
    ///   never get swallowed into text.
    /// - A string literal directly followed by a markup boundary is kept as
    ///   a `StringLiteral` token rather than merged, which is what an
    ///   attribute-less value position looks like. The one-token lookahead
    ///   this needs is fully rolled back when it fails.
    pub(crate) fn peek_in_content(&mut self) -> SyntaxKind {
        if self.peeked.is_none() {
            let token = self.collect_token(true);
            self.peeked = Some(token);
        }
        {
            let token = self.peeked.as_ref().expect("just filled the lookahead");
            if matches!(
                token.kind(),
                SyntaxKind::Eof
                    | SyntaxKind::OpenTagStart
                    | SyntaxKind::Script
                    | SyntaxKind::CData
                    | SyntaxKind::CloseTagStart
            ) {
                return token.kind();
            }
        }
        let token = self.peeked.take().expect("just filled the lookahead");
        let trivia = token.trivia_before().unwrap_or(&[]);

        let mut leading_comments = 0;
        while leading_comments < trivia.len()
            && trivia[leading_comments].kind() == SyntaxKind::Comment
        {
            leading_comments += 1;
        }
        let first_non_comment = (leading_comments < trivia.len()).then_some(leading_comments);
        let second_comment_group = trivia[leading_comments..]
            .iter()
            .position(|t| t.kind() == SyntaxKind::Comment)
            .map(|idx| leading_comments + idx);

        let parse_as_string_literal = second_comment_group.is_none()
            && token.kind() == SyntaxKind::StringLiteral
            && self.string_literal_at_boundary(token.end());

        let kind;
        let end;
        if let Some(idx) = second_comment_group {
            kind = SyntaxKind::Text;
            end = trivia[idx].pos();
            self.scanner.reset(end);
        } else if parse_as_string_literal {
            kind = SyntaxKind::StringLiteral;
            end = token.end();
        } else {
            kind = SyntaxKind::Text;
            while let Some(ch) = self.scanner.peek_char() {
                if ch == '<' {
                    break;
                }
                self.scanner.scan_char();
            }
            end = self.scanner.token_end();
        }

        let (pos, trivia_before) = if parse_as_string_literal {
            let trivia_before = (!trivia.is_empty()).then(|| trivia.to_vec());
            (token.pos(), trivia_before)
        } else if leading_comments > 0 {
            (
                trivia[leading_comments - 1].end(),
                Some(trivia[..leading_comments].to_vec()),
            )
        } else if let Some(idx) = first_non_comment {
            (trivia[idx].pos(), None)
        } else {
            (token.start(), None)
        };

        let merged = Node::token(kind, pos, end, trivia_before);
        let kind = merged.kind();
        self.peeked = Some(merged);
        kind
    }

    /// Speculatively scans the token after a string literal and reports
    /// whether it is a markup boundary. All side effects of the lookahead
    /// (scanner position, recovered error nodes, diagnostics) are undone.
    fn string_literal_at_boundary(&mut self, literal_end: TextSize) -> bool {
        let frame_len = self.frames.last().map_or(0, Vec::len);
        let diag_len = self.diagnostics.len();
        let next = self.collect_token(true);
        let at_boundary = matches!(
            next.kind(),
            SyntaxKind::CData
                | SyntaxKind::CloseTagStart
                | SyntaxKind::Script
                | SyntaxKind::OpenTagStart
        );
        self.scanner.reset(literal_end);
        if let Some(frame) = self.frames.last_mut() {
            frame.truncate(frame_len);
        }
        self.diagnostics.truncate(diag_len);
        at_boundary
    }
}
