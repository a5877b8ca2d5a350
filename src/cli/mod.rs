//! CLI command handlers.
//!
//! This module provides testable command handlers that are invoked by main.rs.
//! Each handler implements the business logic for a specific CLI subcommand.

mod check;
mod dashboard;
mod health;
mod output;
mod suppliers;

pub use check::{run_check, CheckConfig};
pub use dashboard::{run_dashboard, DashboardConfig};
pub use health::{run_health, HealthConfig};
pub use output::{should_use_color, write_output, OutputFormat, OutputTarget};
pub use suppliers::{run_suppliers, SuppliersConfig};

/// Exit codes for CI/CD integration
pub mod exit_codes {
    /// Success - checks passed (or an informational command completed)
    pub const SUCCESS: i32 = 0;
    /// Findings at error level, or an at-risk BOM under `--fail-on-risk`
    pub const FINDINGS: i32 = 1;
    /// Warnings were found and `--fail-on-warning` was set
    pub const WARNINGS: i32 = 2;
}
