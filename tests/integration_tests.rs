//! Integration tests for plm-tools
//!
//! These tests verify end-to-end functionality of dataset loading, record
//! checks, cross-referencing, supplier scoring and the dashboard digest
//! against a small fixture workspace with a handful of deliberate defects.

use plm_tools::{
    aggregate::{enrich_suppliers, rank_suppliers},
    cli::{exit_codes, run_check, CheckConfig, OutputFormat},
    validate::validate_dataset,
    build_dashboard, load_workspace, score_bom_health, summarize, validate_bundle,
    BomHealthLevel, BomSnapshotStats, CrossRefIndex, Issue, IssueCode, LoadedWorkspace,
    RecordKind,
};
use std::path::Path;

// ============================================================================
// Test Fixtures
// ============================================================================

const FIXTURES_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures");

fn fixture_path(name: &str) -> std::path::PathBuf {
    Path::new(FIXTURES_DIR).join(name)
}

/// The fixture workspace: 4 parts (plus one malformed entry), 4 BOM rows,
/// 3 suppliers and 5 changes, with rules pinning layers, states and weights.
fn load_fixture_workspace() -> LoadedWorkspace {
    load_workspace(&fixture_path("workspace"), None).expect("Failed to load fixture workspace")
}

fn find_issue<'a>(issues: &'a [Issue], code: IssueCode, context: &str) -> &'a Issue {
    issues
        .iter()
        .find(|i| i.code == code && i.context.as_deref() == Some(context))
        .unwrap_or_else(|| panic!("No {code} issue for {context}"))
}

// ============================================================================
// Loader Tests
// ============================================================================

mod loader_tests {
    use super::*;

    #[test]
    fn test_load_workspace_counts() {
        let workspace = load_fixture_workspace();

        assert_eq!(workspace.bundle.parts.len(), 4);
        assert_eq!(workspace.bundle.bom_nodes.len(), 4);
        assert_eq!(workspace.bundle.suppliers.len(), 3);
        assert_eq!(workspace.bundle.changes.len(), 5);
        // parts.json carries one entry that is not an object.
        assert_eq!(workspace.skipped_records, 1);
    }

    #[test]
    fn test_rules_file_is_discovered() {
        let workspace = load_fixture_workspace();

        let rules_path = workspace
            .rules_path
            .expect("rules.json should be discovered");
        assert!(rules_path.ends_with("rules.json"));
        assert_eq!(workspace.rules.meta.last_updated, "2025-01-20");
        assert_eq!(
            workspace.rules.sku_layers.allowed,
            ["PLT", "SUB", "ASM", "PRT"]
        );
        assert_eq!(
            workspace.rules.status_machine.states,
            ["Draft", "In Review", "Released", "Obsolete"]
        );
    }

    #[test]
    fn test_explicit_rules_path_wins() {
        let rules_file = fixture_path("workspace/rules.json");
        let workspace = load_workspace(&fixture_path("workspace"), Some(&rules_file))
            .expect("Failed to load fixture workspace");

        assert_eq!(workspace.rules_path.as_deref(), Some(rules_file.as_path()));
    }

    #[test]
    fn test_container_shapes_are_normalized() {
        let workspace = load_fixture_workspace();

        // parts.json wraps records under "parts", bom.json is a bare array,
        // suppliers.json hides its records under an "items" property.
        assert_eq!(workspace.bundle.parts[0].sku, "SB1-ASM-0001");
        assert_eq!(workspace.bundle.bom_nodes[0].node_id, "BN-1");
        assert_eq!(workspace.bundle.suppliers[0].name, "Nordic Precision");
        assert_eq!(workspace.bundle.changes[0].change_id, "ECO-2025-004");
    }
}

// ============================================================================
// Validation Tests
// ============================================================================

mod validation_tests {
    use super::*;

    #[test]
    fn test_bundle_report_totals() {
        let workspace = load_fixture_workspace();
        let report = validate_bundle(&workspace.bundle, &workspace.rules);

        // Changes carry no checks: 4 parts + 4 BOM rows + 3 suppliers.
        assert_eq!(report.records_checked, 11);
        assert_eq!(report.issues.len(), 10);
        assert_eq!(report.error_count(), 10);
        assert!(!report.is_clean());
    }

    #[test]
    fn test_part_defects_are_reported() {
        let workspace = load_fixture_workspace();
        let report = validate_bundle(&workspace.bundle, &workspace.rules);

        let issue = find_issue(
            &report.issues,
            IssueCode::RequiredMissing,
            "Part SB1-XXX-0999",
        );
        assert_eq!(issue.field.as_deref(), Some("owner"));

        let issue = find_issue(
            &report.issues,
            IssueCode::SkuLayerInvalid,
            "Part SB1-XXX-0999",
        );
        assert_eq!(
            issue.details.as_deref(),
            Some("layer=XXX allowed=PLT|SUB|ASM|PRT")
        );

        let issue = find_issue(&report.issues, IssueCode::RevFormat, "Part SB1-XXX-0999");
        assert_eq!(issue.details.as_deref(), Some("rev=rev2 pattern=^[A-Z]$"));

        let issue = find_issue(&report.issues, IssueCode::StatusInvalid, "Part SB1-XXX-0999");
        assert_eq!(
            issue.details.as_deref(),
            Some("status=Prototype allowed=Draft|In Review|Released|Obsolete")
        );
    }

    #[test]
    fn test_alternate_defects_are_reported() {
        let workspace = load_fixture_workspace();
        let report = validate_bundle(&workspace.bundle, &workspace.rules);

        let issue = find_issue(&report.issues, IssueCode::AltSkuEmpty, "Part SB1-PRT-0104");
        assert_eq!(issue.details.as_deref(), Some("index=1"));

        let issue = find_issue(
            &report.issues,
            IssueCode::AltInterchangeInvalid,
            "Part SB1-PRT-0104",
        );
        assert_eq!(issue.details.as_deref(), Some("index=1 value=Maybe"));
    }

    #[test]
    fn test_bom_and_supplier_defects_are_reported() {
        let workspace = load_fixture_workspace();
        let report = validate_bundle(&workspace.bundle, &workspace.rules);

        let issue = find_issue(&report.issues, IssueCode::BomQtyInvalid, "BOM Node BN-3");
        assert_eq!(issue.details.as_deref(), Some("qty=0"));

        let issue = find_issue(
            &report.issues,
            IssueCode::RequiredMissing,
            "Supplier SUP-003",
        );
        assert_eq!(issue.field.as_deref(), Some("region"));

        let issue = find_issue(
            &report.issues,
            IssueCode::SupplierStatusInvalid,
            "Supplier SUP-003",
        );
        assert_eq!(issue.details.as_deref(), Some("status=Trial"));

        let issue = find_issue(
            &report.issues,
            IssueCode::SupplierScoreRange,
            "Supplier SUP-003",
        );
        assert_eq!(
            issue.details.as_deref(),
            Some("key=delivery value=6 range=1..5")
        );
    }

    #[test]
    fn test_clean_records_stay_clean() {
        let workspace = load_fixture_workspace();
        let report = validate_bundle(&workspace.bundle, &workspace.rules);

        for context in [
            "Part SB1-ASM-0001",
            "Part SB1-PRT-0105",
            "BOM Node BN-1",
            "BOM Node BN-2",
            "BOM Node BN-4",
            "Supplier SUP-001",
            "Supplier SUP-002",
        ] {
            assert!(
                !report
                    .issues
                    .iter()
                    .any(|i| i.context.as_deref() == Some(context)),
                "{context} should be clean"
            );
        }
    }

    #[test]
    fn test_dataset_selector_scopes_the_report() {
        let workspace = load_fixture_workspace();

        let report = validate_dataset(&workspace.bundle, &workspace.rules, RecordKind::Part);
        assert_eq!(report.records_checked, 4);
        assert!(report
            .issues
            .iter()
            .all(|i| i.context.as_deref().unwrap_or("").starts_with("Part ")));

        // No checks exist for change records.
        let report = validate_dataset(&workspace.bundle, &workspace.rules, RecordKind::Change);
        assert_eq!(report.records_checked, 0);
        assert!(report.is_clean());
    }

    #[test]
    fn test_summary_caps_entries() {
        let workspace = load_fixture_workspace();
        let report = validate_bundle(&workspace.bundle, &workspace.rules);

        // 10 findings, default cap of 8.
        let entries = summarize(&report.issues, None);
        assert_eq!(entries.len(), 8);
        assert!(entries.iter().all(|e| e.title.starts_with("ERROR • ")));

        assert_eq!(summarize(&report.issues, Some(3)).len(), 3);
    }
}

// ============================================================================
// Cross-Reference Tests
// ============================================================================

mod index_tests {
    use super::*;

    #[test]
    fn test_supplied_skus_merge_parts_and_bom() {
        let workspace = load_fixture_workspace();
        let index = CrossRefIndex::build(&workspace.bundle);

        // SUP-001: preferred on two parts, listed on two BOM rows.
        assert_eq!(
            index.supplied_skus("SUP-001"),
            ["SB1-ASM-0001", "SB1-PRT-0104", "SB1-PRT-0105"]
        );
        assert_eq!(index.supplied_count("SUP-001"), 3);

        // SUP-002 reaches the same SKU from both sources; it counts once.
        assert_eq!(index.supplied_skus("SUP-002"), ["SB1-PRT-0104"]);
        assert_eq!(index.supplied_skus("SUP-003"), ["SB1-PRT-0105"]);
        assert!(index.supplied_skus("SUP-999").is_empty());
    }

    #[test]
    fn test_nodes_for_sku() {
        let workspace = load_fixture_workspace();
        let index = CrossRefIndex::build(&workspace.bundle);

        let rows = index.nodes_for_sku("SB1-PRT-0104", &workspace.bundle.bom_nodes);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].node_id, "BN-2");
        assert_eq!(rows[1].node_id, "BN-4");
    }

    #[test]
    fn test_changes_for_sku_newest_first() {
        let workspace = load_fixture_workspace();
        let index = CrossRefIndex::build(&workspace.bundle);

        let related = index.changes_for_sku("SB1-PRT-0104", &workspace.bundle.changes);
        assert_eq!(related.len(), 2);
        assert_eq!(related[0].change_id, "ECO-2025-004");
        assert_eq!(related[1].change_id, "ECO-2025-003");
    }

    #[test]
    fn test_record_counts() {
        let workspace = load_fixture_workspace();
        let index = CrossRefIndex::build(&workspace.bundle);

        assert_eq!(index.part_count(), 4);
        assert_eq!(index.node_count(), 4);
        assert_eq!(index.supplier_count(), 3);
        assert_eq!(index.change_count(), 5);
    }
}

// ============================================================================
// Scoring Tests
// ============================================================================

mod scoring_tests {
    use super::*;

    fn approx(actual: f64, expected: f64) -> bool {
        (actual - expected).abs() < 1e-9
    }

    #[test]
    fn test_profiles_use_configured_weights() {
        let workspace = load_fixture_workspace();
        let index = CrossRefIndex::build(&workspace.bundle);
        let profiles = enrich_suppliers(&workspace.bundle, &workspace.rules, &index);

        // Rules weight quality 2, delivery 1, cost 1; other dimensions drop.
        let nordic = &profiles[0];
        assert_eq!(nordic.supplier.supplier_id, "SUP-001");
        assert!(approx(nordic.score_avg, 4.5));
        assert!(approx(nordic.score_pct, 87.5));

        let shenzen = &profiles[1];
        assert!(approx(shenzen.score_avg, 4.0));
        assert!(approx(shenzen.score_pct, 75.0));

        // Gulf's delivery score of 6 clamps to the range maximum.
        let gulf = &profiles[2];
        assert!(approx(gulf.score_avg, 3.75));
        assert!(approx(gulf.score_pct, 68.75));
    }

    #[test]
    fn test_rank_suppliers_orders_by_score() {
        let workspace = load_fixture_workspace();
        let index = CrossRefIndex::build(&workspace.bundle);
        let profiles = enrich_suppliers(&workspace.bundle, &workspace.rules, &index);

        let ranked = rank_suppliers(&profiles, 10);
        let ids: Vec<&str> = ranked
            .iter()
            .map(|p| p.supplier.supplier_id.as_str())
            .collect();
        assert_eq!(ids, ["SUP-001", "SUP-002", "SUP-003"]);

        assert_eq!(rank_suppliers(&profiles, 2).len(), 2);
    }

    #[test]
    fn test_bom_health_from_fixture() {
        let workspace = load_fixture_workspace();

        let stats = BomSnapshotStats::from_nodes(&workspace.bundle.bom_nodes);
        assert_eq!(stats.total_nodes, 4);
        assert_eq!(stats.high_criticality, 1);
        assert_eq!(stats.missing_suppliers, 1);

        // 1 of 4 rows has no supplier: a 25% gap puts the BOM at risk.
        let health = score_bom_health(stats);
        assert_eq!(health.level, BomHealthLevel::AtRisk);
        assert_eq!(health.label(), "At risk");
    }
}

// ============================================================================
// Dashboard Tests
// ============================================================================

mod dashboard_tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_window_anchors_on_rules_metadata() {
        let workspace = load_fixture_workspace();
        let index = CrossRefIndex::build(&workspace.bundle);

        let dashboard = build_dashboard(&workspace.bundle, &workspace.rules, &index, None);
        assert_eq!(
            dashboard.reference_date,
            NaiveDate::from_ymd_opt(2025, 1, 20).unwrap()
        );
        assert_eq!(dashboard.window_days, 7);
        assert_eq!(dashboard.window.new_changes, 2);
        assert_eq!(dashboard.window.eco_approved, 1);
        assert_eq!(dashboard.window.open_ecr, 1);
    }

    #[test]
    fn test_explicit_reference_widens_the_window() {
        let workspace = load_fixture_workspace();
        let index = CrossRefIndex::build(&workspace.bundle);

        let reference = NaiveDate::from_ymd_opt(2025, 1, 10).unwrap();
        let dashboard =
            build_dashboard(&workspace.bundle, &workspace.rules, &index, Some(reference));

        // Everything dated 2025-01-03 or later counts, even past the anchor;
        // only the December request and the undated change fall out.
        assert_eq!(dashboard.reference_date, reference);
        assert_eq!(dashboard.window.new_changes, 3);
        assert_eq!(dashboard.window.eco_approved, 1);
    }

    #[test]
    fn test_dashboard_lists() {
        let workspace = load_fixture_workspace();
        let index = CrossRefIndex::build(&workspace.bundle);
        let dashboard = build_dashboard(&workspace.bundle, &workspace.rules, &index, None);

        assert_eq!(
            dashboard.top_suppliers[0].title,
            "Nordic Precision (SUP-001)"
        );
        assert_eq!(
            dashboard.top_suppliers[0].meta,
            "Score: 4.5 • Region: EMEA • Tags: —"
        );
        assert_eq!(
            dashboard.top_suppliers[2].meta,
            "Score: 3.8 • Region: — • Tags: Geo Risk, Long Lead"
        );

        let risks: Vec<(&str, &str)> = dashboard
            .key_risks
            .iter()
            .map(|item| (item.title.as_str(), item.meta.as_str()))
            .collect();
        assert_eq!(
            risks,
            [
                ("Single Source", "Occurrences: 2"),
                ("Long Lead", "Occurrences: 2"),
                ("Geo Risk", "Occurrences: 1"),
            ]
        );

        // The change without a parseable date is dropped from the list.
        assert_eq!(dashboard.recent_changes.len(), 4);
        assert_eq!(
            dashboard.recent_changes[0].title,
            "ECR-2025-011 • ECR • Deck resin sourcing alternative"
        );
        assert_eq!(
            dashboard.recent_changes[0].meta,
            "Status: Open • Date: 2025-01-17 • Approver: —"
        );

        assert_eq!(dashboard.bom_stats.total_nodes, 4);
        assert_eq!(dashboard.bom_health.level, BomHealthLevel::AtRisk);
    }
}

// ============================================================================
// CLI Tests
// ============================================================================

mod cli_tests {
    use super::*;

    #[test]
    fn test_run_check_reports_findings() {
        let out_dir = tempfile::tempdir().unwrap();
        let out_file = out_dir.path().join("report.json");

        let config = CheckConfig {
            data_dir: fixture_path("workspace"),
            rules_file: None,
            dataset: None,
            output: OutputFormat::Json,
            output_file: Some(out_file.clone()),
            max_findings: None,
            summary: false,
            fail_on_warning: false,
            no_color: true,
        };

        let exit_code = run_check(config).expect("check should run");
        assert_eq!(exit_code, exit_codes::FINDINGS);

        let content = std::fs::read_to_string(&out_file).unwrap();
        let json: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(json["tool"], "plm-tools");
        assert_eq!(json["dataset"], "all");
        assert_eq!(json["recordsChecked"], 11);
        assert_eq!(json["skippedRecords"], 1);
        assert_eq!(json["errors"], 10);
        assert_eq!(json["warnings"], 0);
        assert_eq!(json["issues"].as_array().unwrap().len(), 10);
    }

    #[test]
    fn test_run_check_dataset_scope_is_clean_for_changes() {
        let out_dir = tempfile::tempdir().unwrap();
        let out_file = out_dir.path().join("report.json");

        let config = CheckConfig {
            data_dir: fixture_path("workspace"),
            rules_file: None,
            dataset: Some("changes".to_string()),
            output: OutputFormat::Json,
            output_file: Some(out_file.clone()),
            max_findings: None,
            summary: false,
            fail_on_warning: false,
            no_color: true,
        };

        let exit_code = run_check(config).expect("check should run");
        assert_eq!(exit_code, exit_codes::SUCCESS);

        let content = std::fs::read_to_string(&out_file).unwrap();
        let json: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(json["dataset"], "changes");
        assert_eq!(json["recordsChecked"], 0);
        assert_eq!(json["errors"], 0);
    }
}
