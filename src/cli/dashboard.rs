//! Dashboard command handler.
//!
//! Implements the `dashboard` subcommand rendering the program digest:
//! change activity, BOM coverage, top suppliers and risk concentrations.

use crate::aggregate::{build_dashboard, DashboardSummary, ListItem};
use crate::cli::{write_output, OutputFormat, OutputTarget};
use crate::loader::load_workspace;
use anyhow::Result;
use chrono::NaiveDate;
use std::path::PathBuf;

/// Dashboard command configuration
pub struct DashboardConfig {
    pub data_dir: PathBuf,
    pub rules_file: Option<PathBuf>,
    /// Anchor the trailing window here instead of the rule document date.
    pub date: Option<NaiveDate>,
    pub output: OutputFormat,
    pub output_file: Option<PathBuf>,
}

/// Run the dashboard command
pub fn run_dashboard(config: DashboardConfig) -> Result<()> {
    let workspace = load_workspace(&config.data_dir, config.rules_file.as_deref())?;
    let index = workspace.bundle.build_index();
    let summary = build_dashboard(&workspace.bundle, &workspace.rules, &index, config.date);

    let content = match config.output {
        OutputFormat::Json => serde_json::to_string_pretty(&summary)
            .map_err(|e| anyhow::anyhow!("Failed to serialize dashboard JSON: {e}"))?,
        OutputFormat::Text => format_dashboard_text(&summary),
    };

    write_output(&content, &OutputTarget::from_option(config.output_file))
}

/// Format the dashboard digest for terminal output
fn format_dashboard_text(summary: &DashboardSummary) -> String {
    let mut lines = Vec::new();
    lines.push(format!(
        "Dashboard for {} (trailing {} days)",
        summary.reference_date, summary.window_days
    ));
    lines.push(String::new());
    lines.push(format!(
        "Changes:   {} new • {} ECO approved • {} ECR open",
        summary.window.new_changes, summary.window.eco_approved, summary.window.open_ecr
    ));
    lines.push(format!(
        "BOM:       {} nodes • {} high criticality • {} missing suppliers",
        summary.bom_stats.total_nodes,
        summary.bom_stats.high_criticality,
        summary.bom_stats.missing_suppliers
    ));
    lines.push(format!(
        "Health:    {} • {}",
        summary.bom_health.label(),
        summary.bom_health.hint
    ));

    push_section(&mut lines, "Top suppliers", &summary.top_suppliers);
    push_section(&mut lines, "Key risks", &summary.key_risks);
    push_section(&mut lines, "Recent changes", &summary.recent_changes);

    lines.join("\n")
}

fn push_section(lines: &mut Vec<String>, heading: &str, items: &[ListItem]) {
    lines.push(String::new());
    lines.push(format!("{heading}:"));
    if items.is_empty() {
        lines.push("  (none)".to_string());
        return;
    }
    for item in items {
        lines.push(format!("  {}", item.title));
        lines.push(format!("    {}", item.meta));
    }
}
