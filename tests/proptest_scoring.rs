//! Property-based tests for scoring and issue summaries.
//!
//! Ensures the scoring math handles arbitrary numeric input without
//! panicking, and that key invariants (clamping, percentage bounds, summary
//! ordering) hold across random inputs.

use indexmap::IndexMap;
use plm_tools::rules::RuleConfig;
use plm_tools::score::{
    score_bom_health, weighted_supplier_score, BomHealthLevel, BomSnapshotStats, WeightedScore,
};
use plm_tools::validate::{summarize, Issue, IssueCode, IssueLevel, DEFAULT_SUMMARY_MAX};
use proptest::prelude::*;
use serde_json::{json, Value};

const DIMENSIONS: [&str; 6] = [
    "quality",
    "delivery",
    "cost",
    "engineeringSupport",
    "compliance",
    "risk",
];

/// Raw sub-score values as they appear in hand-maintained JSON: numbers,
/// numeric-or-garbage strings, nulls and booleans.
fn score_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        (-1e6..1e6f64).prop_map(|v| json!(v)),
        (-100i64..100).prop_map(|v| json!(v)),
        "\\PC{0,8}".prop_map(Value::String),
        Just(Value::Null),
        Just(json!(true)),
    ]
}

fn score_map() -> impl Strategy<Value = IndexMap<String, Value>> {
    prop::collection::vec((prop::sample::select(&DIMENSIONS[..]), score_value()), 0..8).prop_map(
        |entries| {
            entries
                .into_iter()
                .map(|(key, value)| (key.to_string(), value))
                .collect()
        },
    )
}

fn weight_map() -> impl Strategy<Value = IndexMap<String, f64>> {
    let weight = prop_oneof![
        (-5.0..5.0f64),
        Just(0.0),
        Just(f64::NAN),
        Just(f64::INFINITY),
    ];
    prop::collection::vec((prop::sample::select(&DIMENSIONS[..]), weight), 0..8).prop_map(
        |entries| {
            entries
                .into_iter()
                .map(|(key, value)| (key.to_string(), value))
                .collect()
        },
    )
}

fn issue_list() -> impl Strategy<Value = Vec<Issue>> {
    prop::collection::vec(0..3usize, 0..30).prop_map(|levels| {
        levels
            .into_iter()
            .map(|level| {
                let mut issue = Issue::error(IssueCode::SkuEmpty, "generated");
                issue.level = match level {
                    0 => IssueLevel::Error,
                    1 => IssueLevel::Warn,
                    _ => IssueLevel::Info,
                };
                issue
            })
            .collect()
    })
}

fn title_rank(title: &str) -> u8 {
    if title.starts_with("ERROR") {
        3
    } else if title.starts_with("WARN") {
        2
    } else {
        1
    }
}

proptest! {
    // 1000 cases: the scoring math is cheap to evaluate and its edge cases
    // live in odd numeric inputs, so broad coverage pays off.
    #![proptest_config(ProptestConfig::with_cases(1000))]

    #[test]
    fn compute_stays_in_default_range(scores in score_map()) {
        let rules = RuleConfig::default();
        let score = WeightedScore::compute(&scores, &rules);

        prop_assert!(score.avg.is_finite());
        prop_assert!((1.0..=5.0).contains(&score.avg));
        prop_assert!((0.0..=100.0).contains(&score.pct));
    }

    #[test]
    fn compute_handles_arbitrary_ranges(
        min in -1e6..1e6f64,
        max in -1e6..1e6f64,
        value in -1e9..1e9f64,
    ) {
        let mut rules = RuleConfig::default();
        rules.supplier_scoring.range.min = min;
        rules.supplier_scoring.range.max = max;

        let mut scores = IndexMap::new();
        scores.insert("quality".to_string(), json!(value));
        let score = WeightedScore::compute(&scores, &rules);

        prop_assert!(score.avg.is_finite());
        prop_assert!((0.0..=100.0).contains(&score.pct));
        if min <= max {
            prop_assert!(score.avg >= min - 1e-6);
            prop_assert!(score.avg <= max + 1e-6);
        } else {
            // A degenerate range cannot be rescaled.
            prop_assert_eq!(score.pct, 0.0);
        }
    }

    #[test]
    fn string_scores_coerce_like_numbers(value in -1000.0..1000.0f64) {
        let rules = RuleConfig::default();

        let mut numeric = IndexMap::new();
        numeric.insert("quality".to_string(), json!(value));
        let mut textual = IndexMap::new();
        textual.insert("quality".to_string(), Value::String(value.to_string()));

        let a = WeightedScore::compute(&numeric, &rules);
        let b = WeightedScore::compute(&textual, &rules);
        prop_assert_eq!(a.avg, b.avg);
        prop_assert_eq!(a.pct, b.pct);
    }

    #[test]
    fn supplier_score_is_never_nan(scores in score_map(), weights in weight_map()) {
        let score = weighted_supplier_score(&scores, &weights);
        prop_assert!(!score.is_nan());

        // Dropping every weight always yields zero.
        prop_assert_eq!(weighted_supplier_score(&scores, &IndexMap::new()), 0.0);
    }

    #[test]
    fn summarize_caps_and_orders(issues in issue_list(), max in 0..20usize) {
        let entries = summarize(&issues, Some(max));
        prop_assert_eq!(entries.len(), max.min(issues.len()));

        // Severity never increases down the list.
        for pair in entries.windows(2) {
            prop_assert!(title_rank(&pair[0].title) >= title_rank(&pair[1].title));
        }
    }

    #[test]
    fn summarize_default_cap(issues in issue_list()) {
        let entries = summarize(&issues, None);
        prop_assert_eq!(entries.len(), issues.len().min(DEFAULT_SUMMARY_MAX));
    }

    #[test]
    fn bom_health_is_total(
        total in 0..10_000usize,
        high in 0..10_000usize,
        missing in 0..10_000usize,
    ) {
        let health = score_bom_health(BomSnapshotStats {
            total_nodes: total,
            high_criticality: high,
            missing_suppliers: missing,
        });

        prop_assert!(!health.hint.is_empty());
        if total == 0 {
            prop_assert_eq!(health.level, BomHealthLevel::NoData);
        } else {
            prop_assert_ne!(health.level, BomHealthLevel::NoData);
        }

        // Full coverage with few critical nodes is always healthy.
        if total > 0 && missing == 0 && high * 4 <= total {
            prop_assert_eq!(health.level, BomHealthLevel::Healthy);
        }
        // A fully uncovered BOM is always at risk.
        if total > 0 && missing >= total {
            prop_assert_eq!(health.level, BomHealthLevel::AtRisk);
        }
    }
}
