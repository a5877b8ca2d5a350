//! **Rule-driven validation, scoring and cross-referencing for engineering records.**
//!
//! `plm-tools` works with the four record sets an early-stage hardware program
//! keeps as plain JSON files: part masters, a BOM snapshot, supplier
//! scorecards and a change log. It checks them against a configurable rule
//! document, scores suppliers on weighted dimensions, grades BOM supplier
//! coverage and cross-references who supplies what. It powers both a
//! command-line interface (CLI) for direct use and a Rust library for
//! programmatic integration into your own applications.
//!
//! ## Key Features
//!
//! - **Tolerant Loading**: Accepts datasets as bare arrays, wrapped
//!   containers or keyed objects, skipping malformed records instead of
//!   refusing the file.
//! - **Rule-Driven Checks**: Required fields, SKU layer tokens, revision
//!   format, lifecycle status, alternates, BOM quantities and supplier
//!   scores, all configured by a `rules.json`/`rules.yaml` document that
//!   defaults section by section.
//! - **Issues, Not Errors**: Data problems come back as plain [`validate::Issue`]
//!   values with stable codes; library errors are reserved for unreadable
//!   files and broken rule documents.
//! - **Weighted Scoring**: Supplier scorecards reduced to a weighted average
//!   and a normalized percentage, plus a deterministic BOM health verdict.
//! - **Cross-Referencing**: One pass over a snapshot answers which SKUs a
//!   supplier covers, which BOM rows carry a SKU, and which changes touched it.
//!
//! ## Core Concepts & Modules
//!
//! - **[`model`]**: The record types ([`Part`], [`BomNode`], [`Supplier`],
//!   [`ChangeRecord`]), the [`DatasetBundle`] snapshot they travel in, and the
//!   [`CrossRefIndex`] built over a bundle.
//! - **[`rules`]**: The [`RuleConfig`] document with its defaults, discovery
//!   and file loading, advisory authoring checks, and JSON Schema generation.
//! - **[`loader`]**: Container normalization and lenient per-dataset decoding
//!   from JSON documents, plus whole-workspace loading.
//! - **[`validate`]**: The [`RecordValidator`] and batch checks producing
//!   [`validate::Issue`] lists and display summaries.
//! - **[`score`]**: Weighted supplier scoring and the BOM health ladder.
//! - **[`aggregate`]**: Supplier profiles and the dashboard digest (change
//!   window, top suppliers, risk concentrations).
//!
//! ## Getting Started: Checking a Workspace
//!
//! The most common entry point is to load a data directory and run the
//! record checks:
//!
//! ```no_run
//! use std::path::Path;
//! use plm_tools::loader::load_workspace;
//! use plm_tools::validate::validate_bundle;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let workspace = load_workspace(Path::new("data"), None)?;
//!     let report = validate_bundle(&workspace.bundle, &workspace.rules);
//!
//!     println!(
//!         "{} issues across {} records",
//!         report.issues.len(),
//!         report.records_checked
//!     );
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Scoring a BOM Snapshot
//!
//! Health grading needs nothing but the node list:
//!
//! ```
//! use plm_tools::score::{score_bom_health, BomSnapshotStats};
//!
//! let stats = BomSnapshotStats {
//!     total_nodes: 40,
//!     high_criticality: 6,
//!     missing_suppliers: 2,
//! };
//! let health = score_bom_health(stats);
//! assert_eq!(health.label(), "Healthy");
//! ```
//!
//! ## Command-Line Interface (CLI)
//!
//! This documentation is for the `plm-tools` library crate. If you are
//! looking for the command-line tool, see the project's README or run
//! `plm-tools --help`.

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
// Pedantic lints: allow categories that are design choices for this codebase
#![allow(
    // Cast safety: usize→f64 casts appear in rate and score math; all values
    // are bounded in practice
    clippy::cast_precision_loss,
    // Doc completeness: # Errors / # Panics sections are aspirational
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    // Variable names like `min`/`max` or `old`/`new` are clear in context
    clippy::similar_names
)]

pub mod aggregate;
pub mod cli;
pub mod error;
pub mod loader;
pub mod model;
pub mod rules;
pub mod score;
pub mod validate;

// Re-export main types for convenience
pub use aggregate::{build_dashboard, DashboardSummary, SupplierProfile};
pub use error::{ErrorContext, OptionContext, PlmToolsError, Result};
pub use loader::{load_workspace, normalize_records, LoadedWorkspace};
pub use model::{
    Alternate, BomNode, ChangeRecord, CrossRefIndex, DatasetBundle, Part, RecordKind, Supplier,
};
pub use rules::{ConfigError, RuleConfig, Validatable};
pub use score::{score_bom_health, BomHealth, BomHealthLevel, BomSnapshotStats, WeightedScore};
pub use validate::{
    summarize, validate_bundle, Issue, IssueCode, IssueLevel, RecordValidator, ValidationReport,
};
