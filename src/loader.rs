//! Dataset loading and container normalization.
//!
//! Dataset files arrive in several shapes: a bare record array, an object
//! wrapping the array under a container key (`parts`, `items`, `data`,
//! `rows`, ...), or a dictionary of records keyed by id. [`normalize_records`]
//! resolves all of them to one record list at the boundary, so the rest of
//! the crate only ever sees typed `Vec`s.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{DecodeErrorKind, PlmToolsError, Result};
use crate::model::{DatasetBundle, RecordKind};
use crate::rules::RuleConfig;

// ============================================================================
// Container Normalization
// ============================================================================

/// Extract the record list from a dataset document.
///
/// Resolution order:
/// 1. The document itself, if it is an array.
/// 2. The dataset's own container key (`parts`, `nodes`, `suppliers`,
///    `changes`), if that property is an array.
/// 3. The first array-valued property, in document order.
/// 4. The property values, if the document is a non-empty dictionary whose
///    values are all objects.
///
/// Returns `None` when the document has no recognizable record list. Scalar
/// documents and empty objects land here; callers treat that as an empty
/// dataset rather than an error.
#[must_use]
pub fn normalize_records(document: &Value, kind: RecordKind) -> Option<Vec<Value>> {
    if let Some(records) = document.as_array() {
        return Some(records.clone());
    }

    let map = document.as_object()?;

    if let Some(records) = map.get(kind.container_key()).and_then(Value::as_array) {
        return Some(records.clone());
    }

    if let Some(records) = map.values().find_map(Value::as_array) {
        return Some(records.clone());
    }

    if !map.is_empty() && map.values().all(Value::is_object) {
        return Some(map.values().cloned().collect());
    }

    None
}

/// Decode a dataset document into typed records.
///
/// Records that fail to decode are skipped with a warning, not fatal: one
/// malformed entry must never cost the rest of the dataset. Returns the
/// decoded records and the number skipped.
pub fn decode_records<T: DeserializeOwned>(document: &Value, kind: RecordKind) -> (Vec<T>, usize) {
    let values = match normalize_records(document, kind) {
        Some(values) => values,
        None => {
            tracing::warn!("No {} record list found in document", kind.label());
            return (Vec::new(), 0);
        }
    };

    let mut records = Vec::with_capacity(values.len());
    let mut skipped = 0usize;

    for (idx, value) in values.into_iter().enumerate() {
        match serde_json::from_value::<T>(value) {
            Ok(record) => records.push(record),
            Err(e) => {
                skipped += 1;
                tracing::warn!(
                    "Skipping malformed {} record at index {}: {}",
                    kind.label(),
                    idx,
                    e
                );
            }
        }
    }

    (records, skipped)
}

// ============================================================================
// Dataset Files
// ============================================================================

/// Conventional path of a dataset file inside a data directory.
#[must_use]
pub fn dataset_path(data_dir: &Path, kind: RecordKind) -> PathBuf {
    data_dir.join(format!("{}.json", kind.file_stem()))
}

/// Read and parse one dataset file into a raw JSON document.
pub fn load_dataset_file(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path).map_err(|e| PlmToolsError::io(path, e))?;

    serde_json::from_str(&content).map_err(|e| {
        PlmToolsError::decode(
            format!("Failed to parse {}", path.display()),
            DecodeErrorKind::InvalidJson(e.to_string()),
        )
    })
}

/// Load one dataset from its conventional file under `data_dir`.
///
/// Returns the decoded records and the number of entries skipped as
/// malformed.
pub fn load_dataset<T: DeserializeOwned>(
    data_dir: &Path,
    kind: RecordKind,
) -> Result<(Vec<T>, usize)> {
    let path = dataset_path(data_dir, kind);
    let document = load_dataset_file(&path)?;
    Ok(decode_records(&document, kind))
}

/// Resolve a dataset selector as typed on the command line.
pub fn parse_dataset_kind(name: &str) -> Result<RecordKind> {
    match name.trim().to_ascii_lowercase().as_str() {
        "part" | "parts" => Ok(RecordKind::Part),
        "bom" | "bom-node" | "bom-nodes" | "nodes" => Ok(RecordKind::BomNode),
        "supplier" | "suppliers" => Ok(RecordKind::Supplier),
        "change" | "changes" => Ok(RecordKind::Change),
        _ => Err(PlmToolsError::decode(
            "Invalid dataset selector",
            DecodeErrorKind::UnknownDataset(name.to_string()),
        )),
    }
}

// ============================================================================
// Workspace Loading
// ============================================================================

/// Everything a command needs: the four datasets plus the rule document.
#[derive(Debug, Clone)]
pub struct LoadedWorkspace {
    /// The four datasets, decoded.
    pub bundle: DatasetBundle,
    /// Active rule configuration (loaded or default).
    pub rules: RuleConfig,
    /// Where the rules came from, `None` when defaults are in effect.
    pub rules_path: Option<PathBuf>,
    /// Total records dropped as malformed across all datasets.
    pub skipped_records: usize,
}

/// Load all four datasets and the rule configuration from a data directory.
///
/// Every dataset file (`parts.json`, `bom.json`, `suppliers.json`,
/// `changes.json`) must exist and parse as JSON; individual malformed records
/// inside them are skipped with a warning. The rules file is optional and
/// falls back to defaults.
pub fn load_workspace(data_dir: &Path, rules_path: Option<&Path>) -> Result<LoadedWorkspace> {
    let mut bundle = DatasetBundle::default();
    let mut skipped_records = 0usize;

    let (parts, skipped) = load_dataset(data_dir, RecordKind::Part)?;
    bundle.parts = parts;
    skipped_records += skipped;

    let (bom_nodes, skipped) = load_dataset(data_dir, RecordKind::BomNode)?;
    bundle.bom_nodes = bom_nodes;
    skipped_records += skipped;

    let (suppliers, skipped) = load_dataset(data_dir, RecordKind::Supplier)?;
    bundle.suppliers = suppliers;
    skipped_records += skipped;

    let (changes, skipped) = load_dataset(data_dir, RecordKind::Change)?;
    bundle.changes = changes;
    skipped_records += skipped;

    let (rules, rules_path) = crate::rules::load_or_default(rules_path, data_dir);

    tracing::debug!(
        "Loaded {} parts, {} BOM nodes, {} suppliers, {} changes ({} records skipped)",
        bundle.parts.len(),
        bundle.bom_nodes.len(),
        bundle.suppliers.len(),
        bundle.changes.len(),
        skipped_records
    );

    Ok(LoadedWorkspace {
        bundle,
        rules,
        rules_path,
        skipped_records,
    })
}
