//! ATR list linter
//!
//! Checks the flat-text smart-card ATR database (`smartcard_list.txt`).
//!
//! This library provides:
//! - Line classification of the list file
//! - Format, ordering and duplicate validation
//! - Context diffs between the file order and the expected order
//! - Counting of ATRs added in the git working tree
//! - Configuration management

pub mod changes;
pub mod config;
pub mod diff;
pub mod parser;
pub mod validation;

// Re-exports for clean public API
pub use changes::{count_new_atrs, ChangeSummary, DiffSource, GitDiff};
pub use config::Config;
pub use parser::{parse_document, parse_line, LineKind, ParsedLine};
pub use validation::{
    validate_document, Diagnostic, ValidationOptions, ValidationResult, Violation,
};
