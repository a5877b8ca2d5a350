//! Dataset-level summaries composed from the scorer and the index.
//!
//! Everything here is derived data: enriched supplier profiles, trailing
//! change-window counters, risk-tag rollups, and the dashboard digest that
//! presentation layers render. The reference date for windowing is
//! injectable so summaries stay deterministic under test.

use chrono::{Duration, NaiveDate, Utc};
use indexmap::IndexMap;
use serde::Serialize;

use crate::model::{coerce, ChangeRecord, CrossRefIndex, DatasetBundle, Supplier};
use crate::rules::RuleConfig;
use crate::score::{score_bom_health, BomHealth, BomSnapshotStats, WeightedScore};

/// Trailing window length for "this week" counters.
pub const DEFAULT_WINDOW_DAYS: i64 = 7;
/// How many suppliers the dashboard lists.
pub const TOP_SUPPLIER_COUNT: usize = 5;
/// How many risk tags the dashboard lists.
pub const TOP_RISK_COUNT: usize = 6;
/// How many recent changes the dashboard lists.
pub const RECENT_CHANGE_COUNT: usize = 6;

/// A display-ready list entry, title plus one metadata line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListItem {
    pub title: String,
    pub meta: String,
}

/// One decimal place, or `—` when the value is not a number.
#[must_use]
pub fn fmt1(value: f64) -> String {
    if value.is_finite() {
        format!("{value:.1}")
    } else {
        "—".to_string()
    }
}

fn or_dash(value: &str) -> &str {
    if value.is_empty() {
        "—"
    } else {
        value
    }
}

// ============================================================================
// Supplier Profiles
// ============================================================================

/// A supplier together with its derived attributes.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplierProfile {
    #[serde(flatten)]
    pub supplier: Supplier,
    /// Weighted average on the raw score scale.
    pub score_avg: f64,
    /// Weighted average rescaled to `0..100`.
    pub score_pct: f64,
    /// SKUs this supplier covers, sorted.
    pub supplied_skus: Vec<String>,
    pub supplied_count: usize,
}

/// Compute the derived attributes for every supplier in the bundle.
#[must_use]
pub fn enrich_suppliers(
    bundle: &DatasetBundle,
    rules: &RuleConfig,
    index: &CrossRefIndex,
) -> Vec<SupplierProfile> {
    bundle
        .suppliers
        .iter()
        .map(|supplier| {
            let score = WeightedScore::compute(&supplier.scores, rules);
            let supplied_skus = index.supplied_skus(&supplier.supplier_id).to_vec();

            SupplierProfile {
                supplier: supplier.clone(),
                score_avg: score.avg,
                score_pct: score.pct,
                supplied_count: supplied_skus.len(),
                supplied_skus,
            }
        })
        .collect()
}

/// Rank profiles by normalized score descending, ties keeping their
/// original dataset order.
#[must_use]
pub fn rank_suppliers(profiles: &[SupplierProfile], limit: usize) -> Vec<&SupplierProfile> {
    let mut ranked: Vec<&SupplierProfile> = profiles.iter().collect();
    ranked.sort_by(|a, b| {
        b.score_pct
            .partial_cmp(&a.score_pct)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    ranked.truncate(limit);
    ranked
}

/// Dashboard digest of the highest-ranked suppliers.
#[must_use]
pub fn top_suppliers(profiles: &[SupplierProfile], limit: usize) -> Vec<ListItem> {
    rank_suppliers(profiles, limit)
        .into_iter()
        .map(|profile| {
            let supplier = &profile.supplier;
            let tags = supplier.risk_tags.join(", ");
            ListItem {
                title: format!("{} ({})", supplier.name, supplier.supplier_id),
                meta: format!(
                    "Score: {} • Region: {} • Tags: {}",
                    fmt1(profile.score_avg),
                    or_dash(&supplier.region),
                    or_dash(&tags)
                ),
            }
        })
        .collect()
}

// ============================================================================
// Change Windows
// ============================================================================

/// Counters over the trailing change window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeWindowStats {
    /// Changes dated inside the window (or later).
    pub new_changes: usize,
    /// ECOs implemented inside the window.
    pub eco_approved: usize,
    /// ECRs not yet closed, regardless of date.
    pub open_ecr: usize,
}

/// Count change activity in the `window_days` up to `reference`.
///
/// Changes without a parseable date never count as recent. Open ECRs are
/// counted over the whole dataset since an old unclosed request is still
/// open work.
#[must_use]
pub fn change_window_stats(
    changes: &[ChangeRecord],
    reference: NaiveDate,
    window_days: i64,
) -> ChangeWindowStats {
    let since = reference - Duration::days(window_days);

    let mut stats = ChangeWindowStats::default();
    for change in changes {
        let recent = change.parsed_date().map_or(false, |d| d >= since);
        if recent {
            stats.new_changes += 1;
            if change.change_type == "ECO" && change.status == "Implemented" {
                stats.eco_approved += 1;
            }
        }
        if change.change_type == "ECR" && change.status != "Closed" {
            stats.open_ecr += 1;
        }
    }

    stats
}

/// The latest dated changes, newest first.
#[must_use]
pub fn recent_changes(changes: &[ChangeRecord], limit: usize) -> Vec<ListItem> {
    let mut dated: Vec<(NaiveDate, &ChangeRecord)> = changes
        .iter()
        .filter_map(|change| change.parsed_date().map(|d| (d, change)))
        .collect();
    dated.sort_by(|a, b| b.0.cmp(&a.0));
    dated.truncate(limit);

    dated
        .into_iter()
        .map(|(_, change)| ListItem {
            title: format!(
                "{} • {} • {}",
                change.change_id, change.change_type, change.title
            ),
            meta: format!(
                "Status: {} • Date: {} • Approver: {}",
                change.status,
                change.date,
                or_dash(&change.approver)
            ),
        })
        .collect()
}

// ============================================================================
// Risk Rollup
// ============================================================================

/// Group risk tags across suppliers and parts, most frequent first.
///
/// Empty tags group under `Unspecified`. Ties keep first-seen order.
#[must_use]
pub fn key_risks(bundle: &DatasetBundle, limit: usize) -> Vec<ListItem> {
    let mut counts: IndexMap<String, usize> = IndexMap::new();

    let supplier_tags = bundle.suppliers.iter().flat_map(|s| s.risk_tags.iter());
    let part_tags = bundle.parts.iter().flat_map(|p| p.risk_tags.iter());

    for tag in supplier_tags.chain(part_tags) {
        let key = if tag.is_empty() {
            "Unspecified".to_string()
        } else {
            tag.clone()
        };
        *counts.entry(key).or_insert(0) += 1;
    }

    let mut grouped: Vec<(String, usize)> = counts.into_iter().collect();
    grouped.sort_by(|a, b| b.1.cmp(&a.1));
    grouped.truncate(limit);

    grouped
        .into_iter()
        .map(|(tag, count)| ListItem {
            title: tag,
            meta: format!("Occurrences: {count}"),
        })
        .collect()
}

// ============================================================================
// Dashboard
// ============================================================================

/// Everything the dashboard view renders, as plain data.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    /// Date the trailing window was anchored at.
    pub reference_date: NaiveDate,
    pub window_days: i64,
    pub window: ChangeWindowStats,
    pub bom_stats: BomSnapshotStats,
    pub bom_health: BomHealth,
    pub top_suppliers: Vec<ListItem>,
    pub key_risks: Vec<ListItem>,
    pub recent_changes: Vec<ListItem>,
}

/// Build the dashboard digest.
///
/// `reference` anchors the change window; when absent it falls back to the
/// rule document's `meta.lastUpdated`, then to today.
#[must_use]
pub fn build_dashboard(
    bundle: &DatasetBundle,
    rules: &RuleConfig,
    index: &CrossRefIndex,
    reference: Option<NaiveDate>,
) -> DashboardSummary {
    let reference_date = reference
        .or_else(|| coerce::parse_date(&rules.meta.last_updated))
        .unwrap_or_else(|| Utc::now().date_naive());

    let bom_stats = BomSnapshotStats::from_nodes(&bundle.bom_nodes);
    let profiles = enrich_suppliers(bundle, rules, index);

    DashboardSummary {
        reference_date,
        window_days: DEFAULT_WINDOW_DAYS,
        window: change_window_stats(&bundle.changes, reference_date, DEFAULT_WINDOW_DAYS),
        bom_stats,
        bom_health: score_bom_health(bom_stats),
        top_suppliers: top_suppliers(&profiles, TOP_SUPPLIER_COUNT),
        key_risks: key_risks(bundle, TOP_RISK_COUNT),
        recent_changes: recent_changes(&bundle.changes, RECENT_CHANGE_COUNT),
    }
}
