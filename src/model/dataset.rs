//! The four datasets bundled as one working set.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{BomNode, ChangeRecord, CrossRefIndex, Part, Supplier};

/// Which dataset a record belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RecordKind {
    Part,
    BomNode,
    Supplier,
    Change,
}

impl RecordKind {
    /// Human label used in issue contexts and log lines.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            RecordKind::Part => "Part",
            RecordKind::BomNode => "BOM node",
            RecordKind::Supplier => "Supplier",
            RecordKind::Change => "Change",
        }
    }

    /// Key under which the dataset file wraps its record array.
    #[must_use]
    pub fn container_key(&self) -> &'static str {
        match self {
            RecordKind::Part => "parts",
            RecordKind::BomNode => "nodes",
            RecordKind::Supplier => "suppliers",
            RecordKind::Change => "changes",
        }
    }

    /// Conventional file stem for the dataset (`<stem>.json`).
    #[must_use]
    pub fn file_stem(&self) -> &'static str {
        match self {
            RecordKind::Part => "parts",
            RecordKind::BomNode => "bom",
            RecordKind::Supplier => "suppliers",
            RecordKind::Change => "changes",
        }
    }

    /// All dataset kinds in loading order.
    #[must_use]
    pub fn all() -> [RecordKind; 4] {
        [
            RecordKind::Part,
            RecordKind::BomNode,
            RecordKind::Supplier,
            RecordKind::Change,
        ]
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// All four datasets loaded into memory.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DatasetBundle {
    pub parts: Vec<Part>,
    pub bom_nodes: Vec<BomNode>,
    pub suppliers: Vec<Supplier>,
    pub changes: Vec<ChangeRecord>,
}

impl DatasetBundle {
    /// Total number of records across all datasets.
    #[must_use]
    pub fn record_count(&self) -> usize {
        self.parts.len() + self.bom_nodes.len() + self.suppliers.len() + self.changes.len()
    }

    /// Number of records in one dataset.
    #[must_use]
    pub fn count(&self, kind: RecordKind) -> usize {
        match kind {
            RecordKind::Part => self.parts.len(),
            RecordKind::BomNode => self.bom_nodes.len(),
            RecordKind::Supplier => self.suppliers.len(),
            RecordKind::Change => self.changes.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.record_count() == 0
    }

    /// Build the cross-reference index over this bundle.
    #[must_use]
    pub fn build_index(&self) -> CrossRefIndex {
        CrossRefIndex::build(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_kind_labels() {
        assert_eq!(RecordKind::BomNode.label(), "BOM node");
        assert_eq!(RecordKind::BomNode.container_key(), "nodes");
        assert_eq!(RecordKind::BomNode.file_stem(), "bom");
        assert_eq!(RecordKind::all().len(), 4);
    }

    #[test]
    fn test_bundle_counts() {
        let mut bundle = DatasetBundle::default();
        assert!(bundle.is_empty());

        bundle.parts.push(Part::default());
        bundle.suppliers.push(Supplier::default());
        assert_eq!(bundle.record_count(), 2);
        assert_eq!(bundle.count(RecordKind::Part), 1);
        assert_eq!(bundle.count(RecordKind::BomNode), 0);
    }
}
