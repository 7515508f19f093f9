//! Validation Engine
//!
//! Core validation logic separated from parsing and reporting concerns.

use std::fmt;

use log::debug;

use crate::diff::{ContextDiff, DEFAULT_CONTEXT_LINES};
use crate::parser::{parse_document, LineKind};
use crate::validation::lists::RecordLists;

/// Kind of problem found in the list
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Violation {
    /// Space or tab before the newline
    TrailingSpace,
    /// Record line not entirely uppercase
    Case,
    /// File order differs from sorted order
    Order,
    /// Same record listed more than once
    Duplicate,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::TrailingSpace => write!(f, "trailing space"),
            Violation::Case => write!(f, "format error"),
            Violation::Order => write!(f, "not sorted"),
            Violation::Duplicate => write!(f, "duplicate entries"),
        }
    }
}

/// A problem on a specific line
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub line: usize,
    pub violation: Violation,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}: {}", self.line, self.violation, self.message)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationOptions {
    /// Unchanged lines shown around each change in the diffs
    pub context_lines: usize,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            context_lines: DEFAULT_CONTEXT_LINES,
        }
    }
}

/// Result of validating a list file
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationResult {
    pub lists: RecordLists,
    /// Line-level problems, in file order
    pub diagnostics: Vec<Diagnostic>,
    /// File order against sorted order
    pub order_diff: ContextDiff,
    /// Sorted order against sorted order without duplicates
    pub duplicate_diff: ContextDiff,
}

impl ValidationResult {
    pub fn has_failures(&self) -> bool {
        !self.diagnostics.is_empty()
            || !self.order_diff.is_empty()
            || !self.duplicate_diff.is_empty()
    }

    /// Distinct kinds of problems found, in declaration order
    pub fn violations(&self) -> Vec<Violation> {
        let mut found: Vec<Violation> = self.diagnostics.iter().map(|d| d.violation).collect();
        if !self.order_diff.is_empty() {
            found.push(Violation::Order);
        }
        if !self.duplicate_diff.is_empty() {
            found.push(Violation::Duplicate);
        }
        found.sort();
        found.dedup();
        found
    }

    /// Human-readable report; empty when there is nothing to report
    pub fn render(&self) -> String {
        let mut out = String::new();
        for diagnostic in &self.diagnostics {
            out.push_str(&diagnostic.to_string());
            out.push('\n');
        }
        out.push_str(&self.order_diff.to_string());
        out.push_str(&self.duplicate_diff.to_string());
        out
    }
}

/// Validate an entire list file
pub fn validate_document(content: &str, options: &ValidationOptions) -> ValidationResult {
    let mut diagnostics = Vec::new();
    let mut records = Vec::new();
    let mut skipped = 0usize;

    for line in parse_document(content) {
        if line.has_trailing_whitespace() {
            diagnostics.push(Diagnostic {
                line: line.number,
                violation: Violation::TrailingSpace,
                message: format!("{:?}", line.body),
            });
        }

        if line.kind != LineKind::Record {
            skipped += 1;
            continue;
        }

        if !line.is_uppercase() {
            diagnostics.push(Diagnostic {
                line: line.number,
                violation: Violation::Case,
                message: format!("not uppercase: {}", line.body),
            });
        }

        // kept even when malformed: problems are reported, never fixed
        if let Some(value) = line.record_value() {
            records.push(value.to_string());
        }
    }

    debug!(
        "scanned {} records, skipped {} lines, {} line diagnostics",
        records.len(),
        skipped,
        diagnostics.len()
    );

    let lists = RecordLists::from_records(records);
    let order_diff = ContextDiff::new(
        "file order",
        "sorted order",
        &lists.records,
        &lists.sorted,
        options.context_lines,
    );
    let duplicate_diff = ContextDiff::new(
        "sorted order",
        "without duplicates",
        &lists.sorted,
        &lists.unique,
        options.context_lines,
    );

    ValidationResult {
        lists,
        diagnostics,
        order_diff,
        duplicate_diff,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validate(content: &str) -> ValidationResult {
        validate_document(content, &ValidationOptions::default())
    }

    #[test]
    fn test_clean_list_passes() {
        let result = validate("# ATR list\n\n3B 00\n\tcard one\n3B 01\n\tcard two\n3F 00\n");
        assert!(!result.has_failures());
        assert!(result.violations().is_empty());
        assert_eq!(result.render(), "");
        assert_eq!(result.lists.records, vec!["3B 00", "3B 01", "3F 00"]);
    }

    #[test]
    fn test_out_of_order_fails() {
        let result = validate("3B0001\n3B0000\n");
        assert!(result.has_failures());
        assert_eq!(result.violations(), vec![Violation::Order]);
        assert_eq!(result.lists.sorted, vec!["3B0000", "3B0001"]);

        let hunk = &result.order_diff.hunks[0];
        assert_eq!(hunk.old_range, 0..2);
        assert_eq!(hunk.new_range, 0..2);
        assert_eq!(hunk.new_lines.first().map(|l| l.text.as_str()), Some("3B0000"));
        assert!(result.duplicate_diff.is_empty());
    }

    #[test]
    fn test_lowercase_fails() {
        let result = validate("3b0000\n");
        assert!(result.has_failures());
        assert_eq!(result.diagnostics.len(), 1);
        assert_eq!(result.diagnostics[0].line, 1);
        assert_eq!(result.diagnostics[0].violation, Violation::Case);
        // still collected
        assert_eq!(result.lists.records, vec!["3b0000"]);
    }

    #[test]
    fn test_lowercase_continuation_is_fine() {
        let result = validate("3B0000\n\tSome card (bank)\n");
        assert!(!result.has_failures());
    }

    #[test]
    fn test_duplicate_fails() {
        let result = validate("3B0000\n3B0000\n");
        assert!(result.has_failures());
        assert_eq!(result.violations(), vec![Violation::Duplicate]);
        assert!(result.order_diff.is_empty());

        let rendered = result.duplicate_diff.to_string();
        assert!(rendered.contains("- 3B0000"));
        assert_eq!(result.lists.unique, vec!["3B0000"]);
    }

    #[test]
    fn test_trailing_space_fails() {
        let result = validate("3B0000 \n");
        assert!(result.has_failures());
        assert_eq!(result.violations(), vec![Violation::TrailingSpace]);
        assert_eq!(result.lists.records, vec!["3B0000"]);
        assert_eq!(result.render(), "line 1: trailing space: \"3B0000 \"\n");
    }

    #[test]
    fn test_trailing_space_on_skipped_lines() {
        let result = validate("# comment \n\tdescription\t\n3B00\n");
        assert_eq!(result.diagnostics.len(), 2);
        assert_eq!(result.diagnostics[0].line, 1);
        assert_eq!(result.diagnostics[1].line, 2);
    }

    #[test]
    fn test_only_skipped_lines() {
        let result = validate("# header\n\n\tcontinuation\n# footer\n");
        assert!(result.lists.is_empty());
        assert!(result.lists.sorted.is_empty());
        assert!(result.lists.unique.is_empty());
        assert!(result.order_diff.is_empty());
        assert!(result.duplicate_diff.is_empty());
        assert!(!result.has_failures());
    }

    #[test]
    fn test_all_problems_reported_together() {
        let result = validate("3F00\n3b00 \n3F00\n");
        assert_eq!(
            result.violations(),
            vec![
                Violation::TrailingSpace,
                Violation::Case,
                Violation::Order,
                Violation::Duplicate
            ]
        );
        let rendered = result.render();
        assert!(rendered.starts_with("line 2: trailing space"));
        assert!(rendered.contains("*** file order\n--- sorted order\n"));
        assert!(rendered.contains("*** sorted order\n--- without duplicates\n"));
    }
}
