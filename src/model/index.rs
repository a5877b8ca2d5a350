//! Cross-reference index over the loaded datasets.
//!
//! Building the index once avoids repeated O(n) scans when resolving which
//! SKUs a supplier feeds or which BOM rows consume a SKU.
//!
//! # Example
//!
//! ```ignore
//! use plm_tools::model::CrossRefIndex;
//!
//! let index = CrossRefIndex::build(&bundle);
//! let skus = index.supplied_skus("SUP-001");
//! let rows = index.nodes_for_sku("SB1-ASM-0001", &bundle.bom_nodes);
//! ```

use std::collections::{BTreeSet, HashMap};

use super::{BomNode, ChangeRecord, DatasetBundle};

/// Precomputed relations between parts, BOM rows, suppliers and changes.
///
/// Supplier-to-SKU links come from two places: `preferredSuppliers` on part
/// records and the `suppliers` list on BOM rows. Both feed the same map.
#[derive(Debug, Clone)]
#[must_use]
pub struct CrossRefIndex {
    /// Supplier id -> supplied SKUs, sorted and deduplicated.
    supplied_skus_by_supplier: HashMap<String, Vec<String>>,
    /// SKU -> BOM row indices into the bundle's node list.
    node_indices_by_sku: HashMap<String, Vec<usize>>,
    part_count: usize,
    node_count: usize,
    supplier_count: usize,
    change_count: usize,
}

impl CrossRefIndex {
    /// Build the index in one pass over each dataset.
    pub fn build(bundle: &DatasetBundle) -> Self {
        let mut supply_sets: HashMap<String, BTreeSet<String>> = HashMap::new();
        let mut node_indices_by_sku: HashMap<String, Vec<usize>> = HashMap::new();

        let mut add_supply = |supplier_id: &str, sku: &str| {
            if supplier_id.is_empty() || sku.is_empty() {
                return;
            }
            supply_sets
                .entry(supplier_id.to_string())
                .or_default()
                .insert(sku.to_string());
        };

        for part in &bundle.parts {
            for supplier_id in &part.preferred_suppliers {
                add_supply(supplier_id, &part.sku);
            }
        }
        for node in &bundle.bom_nodes {
            for supplier_id in &node.suppliers {
                add_supply(supplier_id, &node.sku);
            }
        }

        for (idx, node) in bundle.bom_nodes.iter().enumerate() {
            if node.sku.is_empty() {
                continue;
            }
            node_indices_by_sku
                .entry(node.sku.clone())
                .or_default()
                .push(idx);
        }

        let supplied_skus_by_supplier = supply_sets
            .into_iter()
            .map(|(id, skus)| (id, skus.into_iter().collect()))
            .collect();

        Self {
            supplied_skus_by_supplier,
            node_indices_by_sku,
            part_count: bundle.parts.len(),
            node_count: bundle.bom_nodes.len(),
            supplier_count: bundle.suppliers.len(),
            change_count: bundle.changes.len(),
        }
    }

    /// SKUs supplied by one supplier, sorted.
    ///
    /// Returns an empty slice for unknown suppliers.
    pub fn supplied_skus(&self, supplier_id: &str) -> &[String] {
        self.supplied_skus_by_supplier
            .get(supplier_id)
            .map(std::vec::Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Number of distinct SKUs a supplier feeds.
    pub fn supplied_count(&self, supplier_id: &str) -> usize {
        self.supplied_skus_by_supplier
            .get(supplier_id)
            .map(std::vec::Vec::len)
            .unwrap_or(0)
    }

    /// BOM row indices for a SKU.
    ///
    /// Returns an empty slice for SKUs that appear on no row.
    pub fn node_indices_for_sku(&self, sku: &str) -> &[usize] {
        self.node_indices_by_sku
            .get(sku)
            .map(std::vec::Vec::as_slice)
            .unwrap_or(&[])
    }

    /// BOM rows for a SKU, resolved against the bundle's node list.
    pub fn nodes_for_sku<'a>(&self, sku: &str, nodes: &'a [BomNode]) -> Vec<&'a BomNode> {
        self.node_indices_for_sku(sku)
            .iter()
            .filter_map(|&idx| nodes.get(idx))
            .collect()
    }

    /// Changes naming a SKU in their affected list, newest first.
    ///
    /// Computed on demand rather than stored; change logs are small and the
    /// lookup is rare next to supplier/BOM resolution. Date order is the
    /// lexicographic order of the raw date strings.
    pub fn changes_for_sku<'a>(
        &self,
        sku: &str,
        changes: &'a [ChangeRecord],
    ) -> Vec<&'a ChangeRecord> {
        if sku.is_empty() {
            return Vec::new();
        }
        let mut related: Vec<&ChangeRecord> =
            changes.iter().filter(|c| c.mentions_sku(sku)).collect();
        related.sort_by(|a, b| b.date.cmp(&a.date));
        related
    }

    /// Total part records indexed.
    pub fn part_count(&self) -> usize {
        self.part_count
    }

    /// Total BOM rows indexed.
    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// Total supplier records indexed.
    pub fn supplier_count(&self) -> usize {
        self.supplier_count
    }

    /// Total change records indexed.
    pub fn change_count(&self) -> usize {
        self.change_count
    }
}
