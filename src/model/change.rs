//! Engineering change records (ECR/ECO log).

use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::coerce;

/// One entry in the change log.
///
/// Older datasets wrote the identifier as `id`; both spellings decode into
/// `change_id`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChangeRecord {
    #[serde(rename = "changeId", alias = "id")]
    pub change_id: String,
    /// Change class, e.g. `ECR` or `ECO`.
    #[serde(rename = "type")]
    pub change_type: String,
    pub status: String,
    pub title: String,
    pub date: String,
    pub approver: String,
    pub affected_skus: Vec<String>,
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

impl ChangeRecord {
    /// Whether this change names the given SKU in its affected list.
    #[must_use]
    pub fn mentions_sku(&self, sku: &str) -> bool {
        self.affected_skus.iter().any(|s| s == sku)
    }

    /// The change date parsed as a calendar day, `None` when unparseable.
    #[must_use]
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        coerce::parse_date(&self.date)
    }
}
