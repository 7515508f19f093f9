//! Line types
//!
//! The list file is made of four kinds of lines. Only `Record` lines carry
//! data; the others are skipped by validation.

/// Kind of a line in the ATR list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Exactly a newline
    Blank,
    /// Starts with `#`
    Comment,
    /// Starts with a tab: a description belonging to the ATR above
    Continuation,
    /// Anything else: an ATR entry
    Record,
}

/// A classified line of the list file
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedLine<'a> {
    /// One-based line number
    pub number: usize,
    /// Line content without its line ending
    pub body: &'a str,
    /// Whether a newline terminated the line
    pub terminated: bool,
    pub kind: LineKind,
}

impl<'a> ParsedLine<'a> {
    /// Space or tab right before the newline.
    ///
    /// The last line of a file without a final newline is never flagged.
    pub fn has_trailing_whitespace(&self) -> bool {
        self.terminated && (self.body.ends_with(' ') || self.body.ends_with('\t'))
    }

    /// Whether the whole line equals its uppercase conversion
    pub fn is_uppercase(&self) -> bool {
        self.body.to_uppercase() == self.body
    }

    /// Stripped record value, `None` for lines that are not records
    pub fn record_value(&self) -> Option<&'a str> {
        match self.kind {
            LineKind::Record => Some(self.body.trim()),
            _ => None,
        }
    }
}
