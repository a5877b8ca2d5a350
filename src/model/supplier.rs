//! Supplier master records.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::coerce;

/// A supplier record with its capability scorecard.
///
/// `scores` keeps raw JSON values so range checks can report exactly what was
/// written when a score is not a number.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Supplier {
    pub supplier_id: String,
    pub name: String,
    pub region: String,
    pub status: String,
    /// Capability dimension -> raw score value.
    pub scores: IndexMap<String, Value>,
    pub risk_tags: Vec<String>,
    pub notes: String,
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

impl Supplier {
    /// Score for one capability dimension as a finite number.
    #[must_use]
    pub fn score_number(&self, key: &str) -> Option<f64> {
        self.scores.get(key).and_then(coerce::to_number)
    }

    /// Look up a field by its wire name, coerced to display text.
    #[must_use]
    pub fn field_text(&self, name: &str) -> Option<String> {
        match name {
            "supplierId" => Some(self.supplier_id.clone()),
            "name" => Some(self.name.clone()),
            "region" => Some(self.region.clone()),
            "status" => Some(self.status.clone()),
            "notes" => Some(self.notes.clone()),
            "riskTags" => Some(self.risk_tags.join(",")),
            _ => self.extra.get(name).map(coerce::to_text),
        }
    }

    /// Identifier used when reporting issues against this record.
    #[must_use]
    pub fn display_id(&self) -> &str {
        if self.supplier_id.trim().is_empty() {
            "—"
        } else {
            &self.supplier_id
        }
    }
}
