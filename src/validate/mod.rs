//! Rule-driven validation of parts, BOM nodes and suppliers.
//!
//! Checks are applied independently and report [`Issue`] values rather than
//! failing; a record can accumulate several issues and a batch never aborts
//! on bad data or a bad rule pattern.

pub mod issue;
pub mod validator;

pub use issue::{summarize, Issue, IssueCode, IssueLevel, IssueSummary, DEFAULT_SUMMARY_MAX};
pub use validator::{validate_bundle, validate_dataset, RecordValidator, ValidationReport};
