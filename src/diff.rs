//! Context diffs
//!
//! Renders the difference between two sequences of lines in the classic
//! context format (`***`/`---` blocks with `!`, `-` and `+` markers).
//! Opcodes come from `similar`; this module only groups and formats them.

use std::fmt;
use std::ops::Range;

use similar::{Algorithm, DiffOp, DiffTag, TextDiff};

/// Number of unchanged lines shown around each change
pub const DEFAULT_CONTEXT_LINES: usize = 3;

/// Marker in front of a line of a hunk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mark {
    Equal,
    Delete,
    Insert,
    Change,
}

impl Mark {
    fn prefix(self) -> &'static str {
        match self {
            Mark::Equal => "  ",
            Mark::Delete => "- ",
            Mark::Insert => "+ ",
            Mark::Change => "! ",
        }
    }
}

impl From<DiffTag> for Mark {
    fn from(tag: DiffTag) -> Self {
        match tag {
            DiffTag::Equal => Mark::Equal,
            DiffTag::Delete => Mark::Delete,
            DiffTag::Insert => Mark::Insert,
            DiffTag::Replace => Mark::Change,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DiffLine {
    pub mark: Mark,
    pub text: String,
}

/// One group of changes with its surrounding context
#[derive(Debug, Clone, PartialEq)]
pub struct Hunk {
    pub old_range: Range<usize>,
    pub new_range: Range<usize>,
    /// Empty when the hunk only inserts
    pub old_lines: Vec<DiffLine>,
    /// Empty when the hunk only deletes
    pub new_lines: Vec<DiffLine>,
}

impl fmt::Display for Hunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "***************")?;
        writeln!(f, "*** {} ****", format_range(&self.old_range))?;
        for line in &self.old_lines {
            writeln!(f, "{}{}", line.mark.prefix(), line.text)?;
        }
        writeln!(f, "--- {} ----", format_range(&self.new_range))?;
        for line in &self.new_lines {
            writeln!(f, "{}{}", line.mark.prefix(), line.text)?;
        }
        Ok(())
    }
}

/// A labelled diff between two sequences
#[derive(Debug, Clone, PartialEq)]
pub struct ContextDiff {
    pub from: String,
    pub to: String,
    pub hunks: Vec<Hunk>,
}

impl ContextDiff {
    pub fn new<S: AsRef<str>>(
        from: impl Into<String>,
        to: impl Into<String>,
        old: &[S],
        new: &[S],
        context_lines: usize,
    ) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            hunks: context_diff(old, new, context_lines),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.hunks.is_empty()
    }
}

impl fmt::Display for ContextDiff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.hunks.is_empty() {
            return Ok(());
        }
        writeln!(f, "*** {}", self.from)?;
        writeln!(f, "--- {}", self.to)?;
        for hunk in &self.hunks {
            write!(f, "{}", hunk)?;
        }
        Ok(())
    }
}

/// Compute the hunks turning `old` into `new`
///
/// Identical inputs produce no hunks.
pub fn context_diff<S: AsRef<str>>(old: &[S], new: &[S], context_lines: usize) -> Vec<Hunk> {
    let old: Vec<&str> = old.iter().map(AsRef::as_ref).collect();
    let new: Vec<&str> = new.iter().map(AsRef::as_ref).collect();

    let diff = TextDiff::configure()
        .algorithm(Algorithm::Myers)
        .diff_slices(old.as_slice(), new.as_slice());

    diff.grouped_ops(context_lines)
        .iter()
        .filter(|group| group.iter().any(|op| op.tag() != DiffTag::Equal))
        .map(|group| build_hunk(group, &old, &new))
        .collect()
}

fn build_hunk(group: &[DiffOp], old: &[&str], new: &[&str]) -> Hunk {
    let old_start = group.first().map_or(0, |op| op.old_range().start);
    let old_end = group.last().map_or(0, |op| op.old_range().end);
    let new_start = group.first().map_or(0, |op| op.new_range().start);
    let new_end = group.last().map_or(0, |op| op.new_range().end);

    let old_touched = group
        .iter()
        .any(|op| matches!(op.tag(), DiffTag::Delete | DiffTag::Replace));
    let new_touched = group
        .iter()
        .any(|op| matches!(op.tag(), DiffTag::Insert | DiffTag::Replace));

    let mut old_lines = Vec::new();
    let mut new_lines = Vec::new();

    for op in group {
        let (tag, old_range, new_range) = op.as_tag_tuple();
        let mark = Mark::from(tag);
        if old_touched && tag != DiffTag::Insert {
            old_lines.extend(old[old_range].iter().map(|text| DiffLine {
                mark,
                text: text.to_string(),
            }));
        }
        if new_touched && tag != DiffTag::Delete {
            new_lines.extend(new[new_range].iter().map(|text| DiffLine {
                mark,
                text: text.to_string(),
            }));
        }
    }

    Hunk {
        old_range: old_start..old_end,
        new_range: new_start..new_end,
        old_lines,
        new_lines,
    }
}

/// One-based `start,end`; a single line prints one number and an empty range
/// prints the line before it.
fn format_range(range: &Range<usize>) -> String {
    let length = range.len();
    let beginning = if length == 0 {
        range.start
    } else {
        range.start + 1
    };
    if length <= 1 {
        beginning.to_string()
    } else {
        format!("{},{}", beginning, beginning + length - 1)
    }
}
