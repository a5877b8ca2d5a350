//! Check command handler.
//!
//! Implements the `check` subcommand for running record checks over the
//! datasets, driven by the active rule document.

use crate::cli::{exit_codes, should_use_color, write_output, OutputFormat, OutputTarget};
use crate::loader::{load_workspace, parse_dataset_kind, LoadedWorkspace};
use crate::rules::Validatable;
use crate::validate::{
    summarize, validate_bundle, validate_dataset, IssueLevel, ValidationReport,
    DEFAULT_SUMMARY_MAX,
};
use anyhow::Result;
use serde_json::json;
use std::path::PathBuf;

/// Check command configuration
pub struct CheckConfig {
    pub data_dir: PathBuf,
    pub rules_file: Option<PathBuf>,
    /// Restrict the run to one dataset (`parts`, `bom`, `suppliers`, `changes`).
    pub dataset: Option<String>,
    pub output: OutputFormat,
    pub output_file: Option<PathBuf>,
    /// Cap on the findings shown in text output.
    pub max_findings: Option<usize>,
    /// Emit a compact single-line JSON digest instead of the full report.
    pub summary: bool,
    pub fail_on_warning: bool,
    pub no_color: bool,
}

/// Run the check command, returning the desired exit code.
///
/// The caller is responsible for calling `std::process::exit()` with the
/// returned code when it is non-zero.
pub fn run_check(config: CheckConfig) -> Result<i32> {
    let workspace = load_workspace(&config.data_dir, config.rules_file.as_deref())?;

    // Authoring mistakes in the rule document are advisory: checks still run.
    for problem in workspace.rules.validate() {
        tracing::warn!("Rule document problem: {problem}");
    }

    let report = match &config.dataset {
        Some(selector) => {
            let kind = parse_dataset_kind(selector)?;
            tracing::debug!("Restricting checks to the {selector} dataset");
            validate_dataset(&workspace.bundle, &workspace.rules, kind)
        }
        None => validate_bundle(&workspace.bundle, &workspace.rules),
    };

    let content = if config.summary {
        format_check_summary(&report)?
    } else {
        match config.output {
            OutputFormat::Json => format_check_json(&report, &workspace, &config)?,
            OutputFormat::Text => format_check_text(&report, &workspace, &config),
        }
    };

    let target = OutputTarget::from_option(config.output_file);
    write_output(&content, &target)?;

    Ok(exit_code_for(&report, config.fail_on_warning))
}

/// Map a report to the process exit code contract.
fn exit_code_for(report: &ValidationReport, fail_on_warning: bool) -> i32 {
    if report.error_count() > 0 {
        exit_codes::FINDINGS
    } else if fail_on_warning && report.warn_count() > 0 {
        exit_codes::WARNINGS
    } else {
        exit_codes::SUCCESS
    }
}

/// Format the check report for terminal output
fn format_check_text(
    report: &ValidationReport,
    workspace: &LoadedWorkspace,
    config: &CheckConfig,
) -> String {
    let mut lines = Vec::new();
    let use_color = should_use_color(config.no_color);

    let (status, color) = if report.error_count() > 0 {
        ("FAIL", "\x1b[31m")
    } else if report.warn_count() > 0 {
        ("PASS", "\x1b[33m")
    } else {
        ("PASS", "\x1b[32m")
    };
    let (color, reset) = if use_color { (color, "\x1b[0m") } else { ("", "") };

    match &workspace.rules_path {
        Some(path) => lines.push(format!("Record checks (rules: {})", path.display())),
        None => lines.push("Record checks (rules: defaults)".to_string()),
    }
    lines.push(format!(
        "Status: {color}{status}{reset} ({} errors, {} warnings, {} info) across {} records",
        report.error_count(),
        report.warn_count(),
        report.count(IssueLevel::Info),
        report.records_checked
    ));
    lines.push(String::new());

    if report.is_clean() {
        lines.push("No issues found.".to_string());
        return lines.join("\n");
    }

    let max = config.max_findings.unwrap_or(DEFAULT_SUMMARY_MAX);
    let entries = summarize(&report.issues, Some(max));
    for entry in &entries {
        lines.push(entry.title.clone());
        if !entry.meta.is_empty() {
            lines.push(format!("  {}", entry.meta));
        }
    }

    if report.issues.len() > entries.len() {
        lines.push(String::new());
        lines.push(format!(
            "Showing {} of {} issues (raise --max to see the rest)",
            entries.len(),
            report.issues.len()
        ));
    }

    lines.join("\n")
}

/// Format the full check report as JSON
fn format_check_json(
    report: &ValidationReport,
    workspace: &LoadedWorkspace,
    config: &CheckConfig,
) -> Result<String> {
    let output = json!({
        "tool": "plm-tools",
        "version": env!("CARGO_PKG_VERSION"),
        "rules": workspace.rules_path.as_ref().map(|p| p.display().to_string()),
        "dataset": config.dataset.as_deref().unwrap_or("all"),
        "recordsChecked": report.records_checked,
        "skippedRecords": workspace.skipped_records,
        "errors": report.error_count(),
        "warnings": report.warn_count(),
        "issues": report.issues,
    });
    serde_json::to_string_pretty(&output)
        .map_err(|e| anyhow::anyhow!("Failed to serialize check JSON: {e}"))
}

/// Compact digest for CI badge generation
#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct CheckSummary {
    clean: bool,
    records_checked: usize,
    errors: usize,
    warnings: usize,
    info: usize,
}

fn format_check_summary(report: &ValidationReport) -> Result<String> {
    let summary = CheckSummary {
        clean: report.is_clean(),
        records_checked: report.records_checked,
        errors: report.error_count(),
        warnings: report.warn_count(),
        info: report.count(IssueLevel::Info),
    };
    serde_json::to_string(&summary)
        .map_err(|e| anyhow::anyhow!("Failed to serialize check summary: {e}"))
}
