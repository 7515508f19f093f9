//! ATR list parser
//!
//! Splits the list file into lines and classifies each of them.
//! No allocation: parsed lines borrow from the file content.

pub mod line;

pub use line::{LineKind, ParsedLine};

/// Parse a single raw line, including its line ending if any
///
/// A `\r` right before the newline is part of the line ending.
pub fn parse_line(number: usize, raw: &str) -> ParsedLine<'_> {
    let (body, terminated) = match raw.strip_suffix('\n') {
        Some(body) => (body.strip_suffix('\r').unwrap_or(body), true),
        None => (raw, false),
    };

    let kind = if terminated && body.is_empty() {
        LineKind::Blank
    } else if body.starts_with('#') {
        LineKind::Comment
    } else if body.starts_with('\t') {
        LineKind::Continuation
    } else {
        LineKind::Record
    };

    ParsedLine {
        number,
        body,
        terminated,
        kind,
    }
}

/// Parse a whole list file
pub fn parse_document(content: &str) -> Vec<ParsedLine<'_>> {
    content
        .split_inclusive('\n')
        .enumerate()
        .map(|(idx, raw)| parse_line(idx + 1, raw))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_record() {
        let line = parse_line(1, "3B 02 14 50\n");
        assert_eq!(line.kind, LineKind::Record);
        assert_eq!(line.body, "3B 02 14 50");
        assert!(line.terminated);
        assert_eq!(line.record_value(), Some("3B 02 14 50"));
    }

    #[test]
    fn test_parse_skipped_lines() {
        assert_eq!(parse_line(1, "\n").kind, LineKind::Blank);
        assert_eq!(parse_line(1, "# comment\n").kind, LineKind::Comment);
        assert_eq!(
            parse_line(1, "\tSchlumberger Multiflex 3k\n").kind,
            LineKind::Continuation
        );
        assert_eq!(parse_line(1, "\tfoo\n").record_value(), None);
    }

    #[test]
    fn test_whitespace_only_line_is_empty_record() {
        let line = parse_line(3, " \n");
        assert_eq!(line.kind, LineKind::Record);
        assert_eq!(line.record_value(), Some(""));
        assert!(line.has_trailing_whitespace());
    }

    #[test]
    fn test_trailing_whitespace() {
        assert!(parse_line(1, "3B0000 \n").has_trailing_whitespace());
        assert!(parse_line(1, "3B0000\t\n").has_trailing_whitespace());
        assert!(parse_line(1, "3B0000 \r\n").has_trailing_whitespace());
        assert!(!parse_line(1, "3B0000\n").has_trailing_whitespace());
        // needs the newline right after the whitespace
        assert!(!parse_line(1, "3B0000 ").has_trailing_whitespace());
    }

    #[test]
    fn test_crlf_line_ending() {
        let line = parse_line(1, "3B0000\r\n");
        assert_eq!(line.body, "3B0000");
        assert_eq!(parse_line(1, "\r\n").kind, LineKind::Blank);
    }

    #[test]
    fn test_uppercase_covers_whole_line() {
        assert!(parse_line(1, "3B 00 FF\n").is_uppercase());
        assert!(!parse_line(1, "3b 00 ff\n").is_uppercase());
        assert!(!parse_line(1, "3B 00 FF card\n").is_uppercase());
    }

    #[test]
    fn test_parse_document_numbers_lines() {
        let lines = parse_document("# header\n\n3B00\n\tdesc\n3F00");
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[2].number, 3);
        assert_eq!(lines[2].kind, LineKind::Record);
        assert!(!lines[4].terminated);
        assert_eq!(lines[4].record_value(), Some("3F00"));
    }

    #[test]
    fn test_parse_empty_document() {
        assert!(parse_document("").is_empty());
    }
}
