//! Character classification for the scanner.

/// Single-line whitespace: everything the scanner folds into one
/// whitespace-trivia run. Covers the XML whitespace characters plus the
/// Unicode space separators and the BOM.
pub(crate) fn is_whitespace_single_line(ch: char) -> bool {
    matches!(
        ch,
        ' ' | '\t'
            | '\u{0B}' // vertical tab
            | '\u{0C}' // form feed
            | '\u{85}' // next line
            | '\u{A0}' // no-break space
            | '\u{1680}' // ogham space mark
            | '\u{2000}'..='\u{200B}' // en quad .. zero-width space
            | '\u{202F}' // narrow no-break space
            | '\u{205F}' // medium mathematical space
            | '\u{3000}' // ideographic space
            | '\u{FEFF}' // BOM
    )
}

/// First character of an identifier: ASCII letter, `_`, or `$`.
pub(crate) fn is_identifier_start(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_' || ch == '$'
}

/// Subsequent identifier characters also allow digits, `-`, and `.`.
pub(crate) fn is_identifier_part(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || matches!(ch, '_' | '$' | '-' | '.')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whitespace_classes() {
        assert!(is_whitespace_single_line(' '));
        assert!(is_whitespace_single_line('\t'));
        assert!(is_whitespace_single_line('\u{A0}'));
        assert!(is_whitespace_single_line('\u{FEFF}'));
        assert!(!is_whitespace_single_line('\n'));
        assert!(!is_whitespace_single_line('a'));
    }

    #[test]
    fn test_identifier_classes() {
        assert!(is_identifier_start('a'));
        assert!(is_identifier_start('$'));
        assert!(is_identifier_start('_'));
        assert!(!is_identifier_start('1'));
        assert!(!is_identifier_start('-'));

        assert!(is_identifier_part('1'));
        assert!(is_identifier_part('-'));
        assert!(is_identifier_part('.'));
        assert!(!is_identifier_part(':'));
    }
}
