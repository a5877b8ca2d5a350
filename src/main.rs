//! plm-tools: Rule-driven checks and scoring for engineering records
//!
//! A command-line companion for part masters, BOM snapshots, supplier
//! scorecards and change logs kept as plain JSON files.

#![allow(
    clippy::too_many_lines,
    clippy::struct_excessive_bools,
    clippy::needless_pass_by_value
)]

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use plm_tools::{
    cli,
    cli::{CheckConfig, DashboardConfig, HealthConfig, OutputFormat, SuppliersConfig},
    rules,
    rules::Validatable,
};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Build long version string with dataset support info
const fn build_long_version() -> &'static str {
    concat!(
        env!("CARGO_PKG_VERSION"),
        "\n\nDatasets:",
        "\n  parts.json, bom.json, suppliers.json, changes.json",
        "\n  (bare arrays, wrapped containers and keyed objects all accepted)",
        "\n\nRules:",
        "\n  rules.json / rules.yaml discovered in the data directory or CWD",
        "\n\nOutput Formats:",
        "\n  text, json"
    )
}

#[derive(Parser)]
#[command(name = "plm-tools")]
#[command(version, long_version = build_long_version())]
#[command(about = "Rule-driven checks and scoring for engineering records", long_about = None)]
#[command(after_help = "EXIT CODES:
    0  Checks passed (or informational command completed)
    1  Error-level findings / BOM at risk with --fail-on-risk
    2  Warnings found with --fail-on-warning

EXAMPLES:
    # Check every dataset against the discovered rules
    plm-tools check --data-dir ./data

    # CI gate on one dataset, machine-readable
    plm-tools check --dataset suppliers -o json --fail-on-warning

    # Rank suppliers by weighted score
    plm-tools suppliers --limit 5

    # Weekly digest anchored at a fixed date
    plm-tools dashboard --date 2025-01-20 -o json > digest.json")]
struct Cli {
    /// Directory holding the dataset files
    #[arg(long, short = 'C', global = true, default_value = "data", value_name = "DIR")]
    data_dir: PathBuf,

    /// Path to the rules file (default: discover in the data directory)
    #[arg(long, global = true, value_name = "PATH")]
    rules: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Disable colored output (also respects `NO_COLOR` env)
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

// ============================================================================
// Command argument structs (extracted for readability)
// ============================================================================

/// Arguments for the `check` subcommand
#[derive(Parser)]
struct CheckArgs {
    /// Check a single dataset (parts, bom, suppliers, changes)
    #[arg(long)]
    dataset: Option<String>,

    /// Output format
    #[arg(short, long, default_value = "text")]
    output: OutputFormat,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,

    /// Maximum findings to show in text output (default: 8)
    #[arg(long, value_name = "N")]
    max: Option<usize>,

    /// Emit a compact single-line JSON digest (for CI badges)
    #[arg(long)]
    summary: bool,

    /// Exit with non-zero code when warnings are found (not just errors)
    #[arg(long)]
    fail_on_warning: bool,
}

/// Arguments for the `suppliers` subcommand
#[derive(Parser)]
struct SuppliersArgs {
    /// Show only the top N suppliers
    #[arg(short, long, value_name = "N")]
    limit: Option<usize>,

    /// Output format
    #[arg(short, long, default_value = "text")]
    output: OutputFormat,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,
}

/// Arguments for the `health` subcommand
#[derive(Parser)]
struct HealthArgs {
    /// Output format
    #[arg(short, long, default_value = "text")]
    output: OutputFormat,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,

    /// Exit with code 1 when the BOM is at risk
    #[arg(long)]
    fail_on_risk: bool,
}

/// Arguments for the `dashboard` subcommand
#[derive(Parser)]
struct DashboardArgs {
    /// Anchor the trailing change window at this date
    #[arg(long, value_name = "YYYY-MM-DD")]
    date: Option<NaiveDate>,

    /// Output format
    #[arg(short, long, default_value = "text")]
    output: OutputFormat,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Check datasets against the active rule document
    Check(CheckArgs),

    /// Rank suppliers by weighted score with their supplied SKUs
    Suppliers(SuppliersArgs),

    /// Assess supplier coverage across the BOM snapshot
    Health(HealthArgs),

    /// Render the program digest (changes, coverage, risks)
    Dashboard(DashboardArgs),

    /// Show, discover, or initialize the rule document
    Rules {
        #[command(subcommand)]
        action: RulesAction,
    },

    /// Generate JSON Schema for the rules file format
    RulesSchema {
        /// Write schema to file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Sub-subcommands for the `rules` command
#[derive(Subcommand)]
enum RulesAction {
    /// Print current effective rules (merged from defaults + file)
    Show,
    /// Print rules file search paths and the discovered file
    Path,
    /// Generate an example rules.json in the data directory
    Init,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    // Dispatch to command handlers
    match cli.command {
        Commands::Check(args) => {
            let config = CheckConfig {
                data_dir: cli.data_dir,
                rules_file: cli.rules,
                dataset: args.dataset,
                output: args.output,
                output_file: args.output_file,
                max_findings: args.max,
                summary: args.summary,
                fail_on_warning: args.fail_on_warning,
                no_color: cli.no_color,
            };

            let exit_code = cli::run_check(config)?;
            if exit_code != 0 {
                std::process::exit(exit_code);
            }
            Ok(())
        }

        Commands::Suppliers(args) => cli::run_suppliers(SuppliersConfig {
            data_dir: cli.data_dir,
            rules_file: cli.rules,
            limit: args.limit,
            output: args.output,
            output_file: args.output_file,
        }),

        Commands::Health(args) => {
            let config = HealthConfig {
                data_dir: cli.data_dir,
                rules_file: cli.rules,
                output: args.output,
                output_file: args.output_file,
                fail_on_risk: args.fail_on_risk,
                no_color: cli.no_color,
            };

            let exit_code = cli::run_health(config)?;
            if exit_code != 0 {
                std::process::exit(exit_code);
            }
            Ok(())
        }

        Commands::Dashboard(args) => cli::run_dashboard(DashboardConfig {
            data_dir: cli.data_dir,
            rules_file: cli.rules,
            date: args.date,
            output: args.output,
            output_file: args.output_file,
        }),

        Commands::Rules { action } => match action {
            RulesAction::Show => {
                let (config, loaded_from) =
                    rules::load_or_default(cli.rules.as_deref(), &cli.data_dir);
                if let Some(path) = &loaded_from {
                    eprintln!("# Loaded from: {}", path.display());
                } else {
                    eprintln!("# No rules file found; showing defaults");
                }
                let json = serde_json::to_string_pretty(&config)
                    .context("failed to serialize rules")?;
                println!("{json}");

                let problems = config.validate();
                if !problems.is_empty() {
                    eprintln!("# {} problem(s) found:", problems.len());
                    for problem in &problems {
                        eprintln!("#   {problem}");
                    }
                }
                Ok(())
            }
            RulesAction::Path => {
                eprintln!("Rules file search paths (in order):");
                eprintln!("  {}", cli.data_dir.display());
                if let Ok(cwd) = std::env::current_dir() {
                    eprintln!("  {}", cwd.display());
                }
                eprintln!();
                eprintln!("Recognized file names:");
                for name in &["rules.json", "rules.yaml", "rules.yml"] {
                    eprintln!("  {name}");
                }
                eprintln!();
                match rules::discover_rules_file(cli.rules.as_deref(), &cli.data_dir) {
                    Some(path) => eprintln!("Active rules file: {}", path.display()),
                    None => eprintln!("No rules file found."),
                }
                Ok(())
            }
            RulesAction::Init => {
                let target = cli.data_dir.join("rules.json");
                if target.exists() {
                    bail!(
                        "{} already exists. Remove it first to re-initialize.",
                        target.display()
                    );
                }
                let content = rules::generate_example_rules();
                std::fs::write(&target, content)
                    .with_context(|| format!("failed to write {}", target.display()))?;
                eprintln!("Created {}", target.display());
                Ok(())
            }
        },

        Commands::RulesSchema { output } => {
            let schema = rules::generate_rules_schema();
            match output {
                Some(path) => {
                    std::fs::write(&path, &schema)?;
                    eprintln!("Schema written to {}", path.display());
                }
                None => {
                    println!("{schema}");
                }
            }
            Ok(())
        }

        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "plm-tools", &mut io::stdout());
            Ok(())
        }
    }
}
