//! Rule document types for validation and scoring.
//!
//! The rule document is authored as `rules.json` (or YAML) next to the
//! datasets. Every section is optional; missing sections fall back to the
//! defaults in [`super::defaults`], matching what record checks assume when
//! no rules file is present at all.

use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::defaults;

// ============================================================================
// Rule Document
// ============================================================================

/// Complete rule document applied to the datasets.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct RuleConfig {
    /// Document metadata, surfaced in summaries.
    pub meta: RulesMeta,
    /// Rules for part master records.
    pub parts: PartsRules,
    /// Rules for BOM rows.
    pub bom: BomRules,
    /// Rules for supplier records.
    pub suppliers: SupplierRules,
    /// Weighted scoring model for supplier scorecards.
    pub supplier_scoring: SupplierScoring,
    /// Allowed SKU layer tokens.
    pub sku_layers: SkuLayerRules,
    /// Revision format rule.
    pub revision: RevisionRule,
    /// Lifecycle states for parts.
    pub status_machine: StatusMachine,
    /// Rules for approved alternates on part records.
    pub alternates: AlternatesRules,
}

impl RuleConfig {
    /// Create a rule document with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// Metadata block carried on the rule document.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct RulesMeta {
    /// When the datasets were last refreshed (`YYYY-MM-DD`).
    pub last_updated: String,
    /// Free-form document version.
    pub version: String,
}

// ============================================================================
// Per-dataset Rules
// ============================================================================

/// Rules for part master records.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct PartsRules {
    /// Fields that must be present and non-blank on every part.
    pub required_fields: Vec<String>,
}

impl Default for PartsRules {
    fn default() -> Self {
        Self {
            required_fields: defaults::owned(&defaults::DEFAULT_PART_REQUIRED_FIELDS),
        }
    }
}

/// Rules for BOM rows.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct BomRules {
    /// Fields that must be present and non-blank on every row.
    pub required_fields: Vec<String>,
    /// Allowed criticality values. An empty list disables the check.
    pub criticality: Vec<String>,
}

impl Default for BomRules {
    fn default() -> Self {
        Self {
            required_fields: defaults::owned(&defaults::DEFAULT_BOM_REQUIRED_FIELDS),
            criticality: defaults::owned(&defaults::DEFAULT_CRITICALITIES),
        }
    }
}

/// Rules for supplier records.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct SupplierRules {
    /// Fields that must be present and non-blank on every supplier.
    pub required_fields: Vec<String>,
    /// Allowed supplier statuses. An empty list disables the check.
    pub status: Vec<String>,
}

impl Default for SupplierRules {
    fn default() -> Self {
        Self {
            required_fields: defaults::owned(&defaults::DEFAULT_SUPPLIER_REQUIRED_FIELDS),
            status: defaults::owned(&defaults::DEFAULT_SUPPLIER_STATUSES),
        }
    }
}

// ============================================================================
// Scoring
// ============================================================================

/// Inclusive bounds for individual supplier scores.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct ScoreRange {
    pub min: f64,
    pub max: f64,
}

impl Default for ScoreRange {
    fn default() -> Self {
        Self {
            min: defaults::DEFAULT_SCORE_MIN,
            max: defaults::DEFAULT_SCORE_MAX,
        }
    }
}

/// Weighted scoring model for supplier scorecards.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct SupplierScoring {
    /// Score bounds shared by every dimension.
    pub range: ScoreRange,
    /// Dimension -> weight. Weights at or below zero drop the dimension.
    #[schemars(with = "std::collections::HashMap<String, f64>")]
    pub weights: IndexMap<String, f64>,
}

impl Default for SupplierScoring {
    fn default() -> Self {
        Self {
            range: ScoreRange::default(),
            weights: defaults::default_weights(),
        }
    }
}

// ============================================================================
// Format Rules
// ============================================================================

/// Allowed SKU layer tokens (second `-` separated token of a SKU).
///
/// An empty list disables the membership check; emptiness of the token
/// itself is still flagged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct SkuLayerRules {
    pub allowed: Vec<String>,
}

/// Regex rule for revision strings.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct RevisionRule {
    /// Anchored regex a trimmed revision must match.
    pub pattern: String,
}

impl Default for RevisionRule {
    fn default() -> Self {
        Self {
            pattern: defaults::DEFAULT_REVISION_PATTERN.to_string(),
        }
    }
}

/// Lifecycle states for part and BOM statuses.
///
/// An empty list disables the membership check; emptiness of the status
/// itself is still flagged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct StatusMachine {
    pub states: Vec<String>,
}

/// Rules for approved alternates on part records.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct AlternatesRules {
    /// Allowed interchangeability labels.
    pub interchangeability: Vec<String>,
}

impl Default for AlternatesRules {
    fn default() -> Self {
        Self {
            interchangeability: defaults::owned(&defaults::DEFAULT_INTERCHANGEABILITY),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
