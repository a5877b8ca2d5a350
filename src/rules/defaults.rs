//! Fallback rule values.
//!
//! These mirror what record checks assume when a rules file omits a section.
//! Example-document content (a fuller starting point for `rules init`) lives
//! in [`super::file`].

use indexmap::IndexMap;

/// Fields every part record must carry.
pub const DEFAULT_PART_REQUIRED_FIELDS: [&str; 5] =
    ["sku", "revision", "status", "owner", "date"];

/// Fields every BOM row must carry.
pub const DEFAULT_BOM_REQUIRED_FIELDS: [&str; 6] =
    ["nodeId", "sku", "qty", "unit", "revision", "criticality"];

/// Fields every supplier record must carry.
pub const DEFAULT_SUPPLIER_REQUIRED_FIELDS: [&str; 4] =
    ["supplierId", "name", "region", "status"];

/// Allowed supplier statuses.
pub const DEFAULT_SUPPLIER_STATUSES: [&str; 4] =
    ["Preferred", "Approved", "Conditional", "Blocked"];

/// Allowed BOM criticality values.
pub const DEFAULT_CRITICALITIES: [&str; 3] = ["High", "Medium", "Low"];

/// Allowed interchangeability labels for alternates.
pub const DEFAULT_INTERCHANGEABILITY: [&str; 3] =
    ["Drop-in", "Requires ECO", "Not Compatible"];

/// Revision format: a single uppercase letter.
pub const DEFAULT_REVISION_PATTERN: &str = "^[A-Z]$";

/// Inclusive score bounds.
pub const DEFAULT_SCORE_MIN: f64 = 1.0;
pub const DEFAULT_SCORE_MAX: f64 = 5.0;

/// Scoring dimensions, each weighted 1 by default.
pub const DEFAULT_SCORE_DIMENSIONS: [&str; 6] = [
    "quality",
    "delivery",
    "cost",
    "engineeringSupport",
    "compliance",
    "risk",
];

/// Default weight map: every dimension at weight 1.
#[must_use]
pub fn default_weights() -> IndexMap<String, f64> {
    DEFAULT_SCORE_DIMENSIONS
        .iter()
        .map(|dim| ((*dim).to_string(), 1.0))
        .collect()
}

/// Owned copy of a static string list.
#[must_use]
pub fn owned(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| (*s).to_string()).collect()
}
