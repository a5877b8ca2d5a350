//! BOM tree node records.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::coerce;

/// One row of the flattened BOM tree.
///
/// `qty` is kept as the raw JSON value: datasets author it as a number or a
/// numeric string, and rule checks want the original text when it is neither.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BomNode {
    pub node_id: String,
    /// Parent node id, empty for root rows.
    pub parent_id: String,
    pub sku: String,
    pub qty: Value,
    pub unit: String,
    pub revision: String,
    pub criticality: String,
    /// Supplier ids assigned to source this row, empty when unassigned.
    pub suppliers: Vec<String>,
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

impl BomNode {
    /// Quantity as a finite number, if the raw value parses as one.
    #[must_use]
    pub fn qty_number(&self) -> Option<f64> {
        coerce::to_number(&self.qty)
    }

    /// Whether at least one supplier is assigned to this row.
    #[must_use]
    pub fn has_suppliers(&self) -> bool {
        !self.suppliers.is_empty()
    }

    /// Look up a field by its wire name, coerced to display text.
    #[must_use]
    pub fn field_text(&self, name: &str) -> Option<String> {
        match name {
            "nodeId" => Some(self.node_id.clone()),
            "parentId" => Some(self.parent_id.clone()),
            "sku" => Some(self.sku.clone()),
            "qty" => Some(coerce::to_text(&self.qty)),
            "unit" => Some(self.unit.clone()),
            "revision" => Some(self.revision.clone()),
            "criticality" => Some(self.criticality.clone()),
            "suppliers" => Some(self.suppliers.join(",")),
            _ => self.extra.get(name).map(coerce::to_text),
        }
    }

    /// Identifier used when reporting issues against this record.
    #[must_use]
    pub fn display_id(&self) -> &str {
        if self.node_id.trim().is_empty() {
            "—"
        } else {
            &self.node_id
        }
    }
}
