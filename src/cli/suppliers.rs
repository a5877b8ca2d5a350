//! Suppliers command handler.
//!
//! Implements the `suppliers` subcommand for ranking suppliers by weighted
//! score and showing what each one covers.

use crate::aggregate::{enrich_suppliers, fmt1, rank_suppliers, SupplierProfile};
use crate::cli::{write_output, OutputFormat, OutputTarget};
use crate::loader::load_workspace;
use anyhow::Result;
use serde_json::json;
use std::path::PathBuf;

/// Suppliers command configuration
pub struct SuppliersConfig {
    pub data_dir: PathBuf,
    pub rules_file: Option<PathBuf>,
    /// Show only the top N suppliers.
    pub limit: Option<usize>,
    pub output: OutputFormat,
    pub output_file: Option<PathBuf>,
}

/// Run the suppliers command
pub fn run_suppliers(config: SuppliersConfig) -> Result<()> {
    let workspace = load_workspace(&config.data_dir, config.rules_file.as_deref())?;
    let index = workspace.bundle.build_index();
    let profiles = enrich_suppliers(&workspace.bundle, &workspace.rules, &index);

    let limit = config.limit.unwrap_or(profiles.len());
    let ranked = rank_suppliers(&profiles, limit);

    let content = match config.output {
        OutputFormat::Json => format_suppliers_json(&ranked, profiles.len())?,
        OutputFormat::Text => format_suppliers_text(&ranked, profiles.len()),
    };

    write_output(&content, &OutputTarget::from_option(config.output_file))
}

/// Format ranked suppliers for terminal output
fn format_suppliers_text(ranked: &[&SupplierProfile], total: usize) -> String {
    let mut lines = Vec::new();
    lines.push(format!(
        "Suppliers ({} of {} shown, ranked by weighted score)",
        ranked.len(),
        total
    ));
    lines.push(String::new());

    if ranked.is_empty() {
        lines.push("No suppliers in the dataset.".to_string());
        return lines.join("\n");
    }

    for (i, profile) in ranked.iter().enumerate() {
        let supplier = &profile.supplier;
        lines.push(format!(
            "{:>2}. {} ({})",
            i + 1,
            supplier.name,
            supplier.display_id()
        ));
        lines.push(format!(
            "    Score: {} ({}%) • Status: {} • Region: {}",
            fmt1(profile.score_avg),
            fmt1(profile.score_pct),
            or_dash(&supplier.status),
            or_dash(&supplier.region)
        ));
        let skus = if profile.supplied_skus.is_empty() {
            "—".to_string()
        } else {
            profile.supplied_skus.join(", ")
        };
        lines.push(format!(
            "    Supplies: {skus} ({} SKUs)",
            profile.supplied_count
        ));
    }

    lines.join("\n")
}

fn or_dash(value: &str) -> &str {
    if value.is_empty() {
        "—"
    } else {
        value
    }
}

/// Format ranked suppliers as JSON
fn format_suppliers_json(ranked: &[&SupplierProfile], total: usize) -> Result<String> {
    let output = json!({
        "tool": "plm-tools",
        "version": env!("CARGO_PKG_VERSION"),
        "count": total,
        "shown": ranked.len(),
        "suppliers": ranked,
    });
    serde_json::to_string_pretty(&output)
        .map_err(|e| anyhow::anyhow!("Failed to serialize supplier JSON: {e}"))
}
