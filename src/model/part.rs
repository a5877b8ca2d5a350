//! Part master records.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::coerce;

/// A substitute reference carried on a part record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Alternate {
    /// SKU of the substitute part.
    pub sku: String,
    /// How freely the substitute may stand in for the primary part.
    pub interchangeability: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// A single part master record.
///
/// Fields default to empty so partially filled records still decode; rule
/// checks decide what absence means.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Part {
    pub sku: String,
    pub revision: String,
    pub status: String,
    pub owner: String,
    /// Last-touched date as written in the dataset (ISO `YYYY-MM-DD`).
    pub date: String,
    pub alternates: Vec<Alternate>,
    pub risk_tags: Vec<String>,
    pub preferred_suppliers: Vec<String>,
    /// Fields not modeled above, kept for round-tripping and rule lookups.
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

impl Part {
    /// Look up a field by its wire name, coerced to display text.
    ///
    /// Returns `None` when the record carries no such field at all.
    #[must_use]
    pub fn field_text(&self, name: &str) -> Option<String> {
        match name {
            "sku" => Some(self.sku.clone()),
            "revision" => Some(self.revision.clone()),
            "status" => Some(self.status.clone()),
            "owner" => Some(self.owner.clone()),
            "date" => Some(self.date.clone()),
            "riskTags" => Some(self.risk_tags.join(",")),
            "preferredSuppliers" => Some(self.preferred_suppliers.join(",")),
            _ => self.extra.get(name).map(coerce::to_text),
        }
    }

    /// Identifier used when reporting issues against this record.
    #[must_use]
    pub fn display_id(&self) -> &str {
        if self.sku.trim().is_empty() {
            "—"
        } else {
            &self.sku
        }
    }
}
