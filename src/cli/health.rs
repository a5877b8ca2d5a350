//! Health command handler.
//!
//! Implements the `health` subcommand for assessing supplier coverage
//! across the current BOM snapshot.

use crate::cli::{exit_codes, should_use_color, write_output, OutputFormat, OutputTarget};
use crate::loader::load_workspace;
use crate::score::{score_bom_health, BomHealth, BomHealthLevel, BomSnapshotStats};
use anyhow::Result;
use serde_json::json;
use std::path::PathBuf;

/// Health command configuration
pub struct HealthConfig {
    pub data_dir: PathBuf,
    pub rules_file: Option<PathBuf>,
    pub output: OutputFormat,
    pub output_file: Option<PathBuf>,
    /// Exit with a non-zero code when the BOM is at risk.
    pub fail_on_risk: bool,
    pub no_color: bool,
}

/// Run the health command, returning the desired exit code.
pub fn run_health(config: HealthConfig) -> Result<i32> {
    let workspace = load_workspace(&config.data_dir, config.rules_file.as_deref())?;

    let stats = BomSnapshotStats::from_nodes(&workspace.bundle.bom_nodes);
    let health = score_bom_health(stats);

    let content = match config.output {
        OutputFormat::Json => format_health_json(stats, health)?,
        OutputFormat::Text => format_health_text(stats, health, config.no_color),
    };
    write_output(&content, &OutputTarget::from_option(config.output_file))?;

    if config.fail_on_risk && health.level == BomHealthLevel::AtRisk {
        tracing::error!("BOM is at risk and --fail-on-risk is set");
        return Ok(exit_codes::FINDINGS);
    }
    Ok(exit_codes::SUCCESS)
}

/// Format the health verdict for terminal output
fn format_health_text(stats: BomSnapshotStats, health: BomHealth, no_color: bool) -> String {
    let use_color = should_use_color(no_color);
    let (color, reset) = if use_color {
        let color = match health.level {
            BomHealthLevel::Healthy => "\x1b[32m",
            BomHealthLevel::Attention => "\x1b[33m",
            BomHealthLevel::AtRisk => "\x1b[31m",
            BomHealthLevel::NoData => "",
        };
        (color, "\x1b[0m")
    } else {
        ("", "")
    };

    let mut lines = Vec::new();
    lines.push(format!("BOM health: {color}{}{reset}", health.label()));
    lines.push(health.hint.to_string());
    lines.push(String::new());
    lines.push(format!("Total nodes:        {}", stats.total_nodes));
    lines.push(format!("High criticality:   {}", stats.high_criticality));
    lines.push(format!("Missing suppliers:  {}", stats.missing_suppliers));
    lines.join("\n")
}

/// Format the health verdict as JSON
fn format_health_json(stats: BomSnapshotStats, health: BomHealth) -> Result<String> {
    let output = json!({
        "tool": "plm-tools",
        "version": env!("CARGO_PKG_VERSION"),
        "stats": stats,
        "level": health.level,
        "label": health.label(),
        "hint": health.hint,
    });
    serde_json::to_string_pretty(&output)
        .map_err(|e| anyhow::anyhow!("Failed to serialize health JSON: {e}"))
}
