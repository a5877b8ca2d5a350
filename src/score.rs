//! Supplier scoring and BOM health assessment.
//!
//! Two weighted-score flavors exist on purpose: [`weighted_supplier_score`]
//! is the quick ranking number used by dashboards (missing sub-scores are
//! skipped), while [`WeightedScore::compute`] is the display variant that
//! clamps raw values into the configured range and substitutes the range
//! minimum for missing sub-scores, so a supplier with sparse data is not
//! flattered.

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

use crate::model::{coerce, BomNode};
use crate::rules::defaults::{DEFAULT_SCORE_MAX, DEFAULT_SCORE_MIN};
use crate::rules::RuleConfig;

// ============================================================================
// Weighted Scores
// ============================================================================

/// Weighted average of the raw sub-scores present in both maps.
///
/// Non-finite or non-positive weights are skipped, as are sub-scores that do
/// not coerce to a finite number. Returns `0` when no valid pair remains;
/// the result is never `NaN`.
#[must_use]
pub fn weighted_supplier_score(
    scores: &IndexMap<String, Value>,
    weights: &IndexMap<String, f64>,
) -> f64 {
    if weights.is_empty() {
        return 0.0;
    }

    let mut weight_sum = 0.0;
    let mut sum = 0.0;

    for (key, weight) in weights {
        if !weight.is_finite() || *weight <= 0.0 {
            continue;
        }
        let value = match scores.get(key).and_then(coerce::to_number) {
            Some(v) => v,
            None => continue,
        };
        weight_sum += weight;
        sum += value * weight;
    }

    if weight_sum <= 0.0 {
        return 0.0;
    }
    sum / weight_sum
}

/// A supplier score normalized against the configured scoring range.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightedScore {
    /// Weighted average over the clamped sub-scores.
    pub avg: f64,
    /// `avg` rescaled from the range to `0..100`, clamped.
    pub pct: f64,
    pub range_min: f64,
    pub range_max: f64,
    /// The weights the average was computed with.
    pub weights: IndexMap<String, f64>,
}

impl WeightedScore {
    /// Compute the normalized score for one supplier's raw sub-scores.
    ///
    /// Every positively weighted category contributes: a raw value outside
    /// the range is clamped to it, and a missing or non-numeric value counts
    /// as the range minimum.
    #[must_use]
    pub fn compute(scores: &IndexMap<String, Value>, rules: &RuleConfig) -> Self {
        let range = &rules.supplier_scoring.range;
        let min = if range.min.is_finite() {
            range.min
        } else {
            DEFAULT_SCORE_MIN
        };
        let max = if range.max.is_finite() {
            range.max
        } else {
            DEFAULT_SCORE_MAX
        };
        let weights = &rules.supplier_scoring.weights;

        let mut weight_sum = 0.0;
        let mut sum = 0.0;

        for (key, weight) in weights {
            let weight = if weight.is_finite() { *weight } else { 0.0 };
            if weight <= 0.0 {
                continue;
            }
            weight_sum += weight;

            let raw = scores.get(key).and_then(coerce::to_number).unwrap_or(min);
            let clamped = raw.min(max).max(min);
            sum += clamped * weight;
        }

        let avg = if weight_sum > 0.0 { sum / weight_sum } else { 0.0 };
        let pct = if max > min {
            ((avg - min) / (max - min) * 100.0).clamp(0.0, 100.0)
        } else {
            0.0
        };

        Self {
            avg,
            pct,
            range_min: min,
            range_max: max,
            weights: weights.clone(),
        }
    }
}

// ============================================================================
// BOM Health
// ============================================================================

/// Aggregate coverage counts over one BOM snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BomSnapshotStats {
    pub total_nodes: usize,
    /// Nodes whose criticality reads `High` or `Critical` (case-insensitive).
    pub high_criticality: usize,
    /// Nodes with no supplier assigned.
    pub missing_suppliers: usize,
}

impl BomSnapshotStats {
    /// Count the health inputs over a node list.
    #[must_use]
    pub fn from_nodes(nodes: &[BomNode]) -> Self {
        let high_criticality = nodes
            .iter()
            .filter(|n| {
                let criticality = n.criticality.to_lowercase();
                criticality == "high" || criticality == "critical"
            })
            .count();
        let missing_suppliers = nodes.iter().filter(|n| !n.has_suppliers()).count();

        Self {
            total_nodes: nodes.len(),
            high_criticality,
            missing_suppliers,
        }
    }
}

/// Categorical BOM health, worst first when it matters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum BomHealthLevel {
    NoData,
    Healthy,
    Attention,
    AtRisk,
}

impl BomHealthLevel {
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            BomHealthLevel::NoData => "No data",
            BomHealthLevel::Healthy => "Healthy",
            BomHealthLevel::Attention => "Attention",
            BomHealthLevel::AtRisk => "At risk",
        }
    }
}

/// A health verdict with its operator-facing hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BomHealth {
    pub level: BomHealthLevel,
    pub hint: &'static str,
}

impl BomHealth {
    #[must_use]
    pub fn label(&self) -> &'static str {
        self.level.label()
    }
}

const HIGH_CRIT_HINT: &str =
    "High-criticality nodes exceed 30% of the BOM. Coverage gaps carry extra schedule risk.";

fn hint_for(level: BomHealthLevel) -> &'static str {
    match level {
        BomHealthLevel::NoData => "BOM nodes are empty.",
        BomHealthLevel::Healthy => "Supplier coverage looks strong for the current BOM snapshot.",
        BomHealthLevel::Attention => {
            "Some nodes have no supplier assigned. Close gaps before Beta builds."
        }
        BomHealthLevel::AtRisk => {
            "Too many nodes lack supplier coverage. Expect schedule slips and cost surprises."
        }
    }
}

/// Deterministic health verdict for a BOM snapshot.
///
/// The base level comes from the missing-supplier rate: `<= 5%` is healthy,
/// `<= 15%` needs attention, above that the BOM is at risk. When more than
/// 30% of nodes are high-criticality the verdict drops one further step,
/// since coverage gaps on critical nodes hurt disproportionately. An empty
/// snapshot is `No data`.
#[must_use]
pub fn score_bom_health(stats: BomSnapshotStats) -> BomHealth {
    if stats.total_nodes == 0 {
        return BomHealth {
            level: BomHealthLevel::NoData,
            hint: hint_for(BomHealthLevel::NoData),
        };
    }

    let total = stats.total_nodes as f64;
    let missing_rate = stats.missing_suppliers as f64 / total;
    let high_rate = stats.high_criticality as f64 / total;

    let base = if missing_rate <= 0.05 {
        BomHealthLevel::Healthy
    } else if missing_rate <= 0.15 {
        BomHealthLevel::Attention
    } else {
        BomHealthLevel::AtRisk
    };

    let level = if high_rate > 0.3 {
        match base {
            BomHealthLevel::Healthy => BomHealthLevel::Attention,
            _ => BomHealthLevel::AtRisk,
        }
    } else {
        base
    };

    let hint = if level == base {
        hint_for(base)
    } else {
        HIGH_CRIT_HINT
    };

    BomHealth { level, hint }
}
