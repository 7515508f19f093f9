//! Validation Engine
//!
//! Format checks on each line, then ordering and duplicate checks on the
//! collected records.

pub mod engine;
pub mod lists;

pub use engine::{validate_document, Diagnostic, ValidationOptions, ValidationResult, Violation};
pub use lists::RecordLists;
