//! Structured problems recorded while scanning and parsing.
//!
//! Every diagnostic carries a stable machine-checkable [`DiagnosticCode`]
//! separate from its human-readable message, so tooling can filter by code
//! without string matching. Diagnostics are append-only and ordered by
//! discovery; scanner-level warnings can interleave with parser-level
//! errors, but within each source they are monotonic.

use text_size::TextRange;

/// How serious a diagnostic is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    /// A recoverable lexical problem (`W…` codes).
    Warning,
    /// A syntax error (`U…` codes).
    Error,
}

/// Stable identifiers for every diagnostic the scanner or parser can emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticCode {
    /// `U003`: a `<` token expected.
    ExpectedTagOpen,
    /// `U004`: a tag name expected.
    ExpectedTagName,
    /// `U005`: a `</` token expected.
    ExpectedCloseStart,
    /// `U006`: a `>` or `/>` token expected.
    ExpectedEndOrClose,
    /// `U007`: opening and closing tag names do not match.
    TagNameMismatch,
    /// `U008`: a `>` token expected.
    ExpectedEnd,
    /// `U009`: an attribute name expected.
    ExpectedAttrName,
    /// `U010`: an `=` token expected.
    ExpectedEq,
    /// `U011`: a string expected as an attribute value after `=`.
    ExpectedAttrValue,
    /// `U012`: duplicated attribute.
    DuplicateAttr,
    /// `U013`: attribute name starts with an uppercase letter.
    UppercaseAttr,
    /// `U014`: a tag name expected after a namespace prefix.
    ExpectedTagNameAfterNamespace,
    /// `U015`: an opened tag has no closing pair.
    ExpectedCloseStartWithName,
    /// `U016`: an attribute name expected after a namespace prefix.
    ExpectedAttrNameAfterNamespace,
    /// `U017`: a `</` with no opening tag to close.
    UnexpectedCloseTag,
    /// `U019`: a tag name expected after `</`.
    ExpectedTagNameAfterCloseStart,
    /// `U020`: an attribute name expected before `=`.
    ExpectedAttrNameBeforeEq,
    /// `W001`: invalid character.
    InvalidChar,
    /// `W002`: unterminated string literal.
    UnterminatedString,
    /// `W007`: unterminated comment.
    UnterminatedComment,
    /// `W008`: unterminated CDATA section.
    UnterminatedCData,
    /// `W009`: unterminated script section.
    UnterminatedScript,
}

impl DiagnosticCode {
    /// The stable code string, e.g. `"U007"`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ExpectedTagOpen => "U003",
            Self::ExpectedTagName => "U004",
            Self::ExpectedCloseStart => "U005",
            Self::ExpectedEndOrClose => "U006",
            Self::TagNameMismatch => "U007",
            Self::ExpectedEnd => "U008",
            Self::ExpectedAttrName => "U009",
            Self::ExpectedEq => "U010",
            Self::ExpectedAttrValue => "U011",
            Self::DuplicateAttr => "U012",
            Self::UppercaseAttr => "U013",
            Self::ExpectedTagNameAfterNamespace => "U014",
            Self::ExpectedCloseStartWithName => "U015",
            Self::ExpectedAttrNameAfterNamespace => "U016",
            Self::UnexpectedCloseTag => "U017",
            Self::ExpectedTagNameAfterCloseStart => "U019",
            Self::ExpectedAttrNameBeforeEq => "U020",
            Self::InvalidChar => "W001",
            Self::UnterminatedString => "W002",
            Self::UnterminatedComment => "W007",
            Self::UnterminatedCData => "W008",
            Self::UnterminatedScript => "W009",
        }
    }

    /// `U…` codes are errors, `W…` codes are warnings.
    #[must_use]
    pub fn severity(self) -> Severity {
        if self.as_str().starts_with('U') {
            Severity::Error
        } else {
            Severity::Warning
        }
    }

    /// The canonical message for codes whose message takes no parameters.
    ///
    /// Parameterized messages (duplicate attribute, tag name mismatch, …)
    /// are formatted at the emission site instead.
    #[must_use]
    pub fn default_message(self) -> Option<&'static str> {
        match self {
            Self::ExpectedTagOpen => Some("A '<' token expected."),
            Self::ExpectedTagName => Some("A tag name expected."),
            Self::ExpectedCloseStart => Some("A '</' token expected."),
            Self::ExpectedEndOrClose => Some("A '>' or '/>' token expected."),
            Self::ExpectedEnd => Some("A '>' token expected."),
            Self::ExpectedAttrName => Some("An attribute name expected."),
            Self::ExpectedEq => Some("An '=' token expected."),
            Self::ExpectedAttrValue => Some("A string expected as an attribute value after '='."),
            Self::UnexpectedCloseTag => Some("Read '</', but there's no opening tag to close."),
            Self::ExpectedTagNameAfterCloseStart => Some("Expected tag name after '</'."),
            Self::ExpectedAttrNameBeforeEq => Some("Expected attribute name before '='."),
            Self::InvalidChar => Some("Invalid character."),
            Self::UnterminatedString => Some("Unterminated string literal."),
            Self::UnterminatedComment => Some("Unterminated comment"),
            Self::UnterminatedCData => Some("Unterminated CDATA section"),
            Self::UnterminatedScript => Some("Unterminated script section"),
            Self::TagNameMismatch
            | Self::DuplicateAttr
            | Self::UppercaseAttr
            | Self::ExpectedTagNameAfterNamespace
            | Self::ExpectedCloseStartWithName
            | Self::ExpectedAttrNameAfterNamespace => None,
        }
    }
}

impl std::fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One recorded problem: stable code, human message, primary span, and a
/// whole-line context window for display.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("[{code}] {message}")]
pub struct Diagnostic {
    /// The stable diagnostic code.
    pub code: DiagnosticCode,
    /// Human-readable message.
    pub message: String,
    /// The primary span of the problem.
    pub range: TextRange,
    /// The span expanded to whole lines around [`range`](Self::range).
    pub context_range: TextRange,
}

impl Diagnostic {
    /// Creates a diagnostic.
    #[must_use]
    pub fn new(
        code: DiagnosticCode,
        message: impl Into<String>,
        range: TextRange,
        context_range: TextRange,
    ) -> Self {
        Self {
            code,
            message: message.into(),
            range,
            context_range,
        }
    }

    /// The severity implied by the code.
    #[must_use]
    pub fn severity(&self) -> Severity {
        self.code.severity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_strings_are_stable() {
        assert_eq!(DiagnosticCode::TagNameMismatch.as_str(), "U007");
        assert_eq!(DiagnosticCode::DuplicateAttr.as_str(), "U012");
        assert_eq!(DiagnosticCode::InvalidChar.as_str(), "W001");
        assert_eq!(DiagnosticCode::UnterminatedScript.as_str(), "W009");
    }

    #[test]
    fn test_severity_from_code_prefix() {
        assert_eq!(DiagnosticCode::ExpectedTagName.severity(), Severity::Error);
        assert_eq!(
            DiagnosticCode::UnterminatedString.severity(),
            Severity::Warning
        );
    }

    #[test]
    fn test_display_includes_code() {
        let diag = Diagnostic::new(
            DiagnosticCode::ExpectedEnd,
            DiagnosticCode::ExpectedEnd.default_message().unwrap(),
            TextRange::new(3.into(), 4.into()),
            TextRange::new(0.into(), 10.into()),
        );
        assert_eq!(diag.to_string(), "[U008] A '>' token expected.");
    }
}
