use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::debug;

use tax_cli::config::AppConfig;
use tax_cli::utils::{parse_amount, parse_optional_amount};
use tax_cli::{app, logging};
use tax_core::api::ComputeRequest;
use tax_core::calculations::StrategyCatalog;

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Progressive income tax calculator for several jurisdictions.
///
/// Computes liability, net income, and effective and marginal rates from
/// built-in bracket tables or tables loaded from CSV files.
#[derive(Debug, Parser)]
#[command(name = "tax-calc", version)]
struct Cli {
    /// TOML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log filter, e.g. `debug` or `tax_core=debug`. Overrides the config
    /// file; `RUST_LOG` overrides both.
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Also append log output to this file.
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// Extra bracket-table CSV file (`jurisdiction,upper_bound,rate`).
    /// May be repeated; later files replace earlier tables of the same code.
    #[arg(long = "brackets", global = true)]
    bracket_files: Vec<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Compute the tax on a gross income.
    Compute {
        /// Gross income; thousands separators are allowed (`1,200,000`).
        #[arg(long)]
        income: String,

        /// Jurisdiction code. Defaults to the configured jurisdiction.
        #[arg(long)]
        jurisdiction: Option<String>,

        /// Filing status, e.g. `single`, `married`, `huf`.
        #[arg(long)]
        filing_status: Option<String>,

        /// Deductions claimed.
        #[arg(long)]
        deductions: Option<String>,

        /// Number of dependents.
        #[arg(long)]
        dependents: Option<u32>,

        /// Age of the taxpayer.
        #[arg(long)]
        age: Option<u32>,

        /// Print the result as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show a jurisdiction's bracket table.
    Brackets {
        #[arg(long)]
        jurisdiction: Option<String>,

        #[arg(long)]
        json: bool,
    },

    /// List registered jurisdictions.
    Jurisdictions,

    /// Show savings strategies and the total for a selection.
    Optimize {
        /// Strategy id to select. May be repeated.
        #[arg(long = "select")]
        selected: Vec<String>,

        #[arg(long)]
        json: bool,
    },
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };

    let level = cli.log_level.as_deref().unwrap_or(&config.logging.level);
    let log_file = cli.log_file.as_deref().or(config.logging.file.as_deref());
    logging::init_logging(level, log_file)?;
    debug!(?cli, "starting");

    let registry = app::build_registry(&config, &cli.bracket_files)
        .context("failed to build jurisdiction registry")?;
    let default_code = config.engine.default_jurisdiction.as_str();

    let output = match cli.command {
        Command::Compute {
            income,
            jurisdiction,
            filing_status,
            deductions,
            dependents,
            age,
            json,
        } => {
            let request = ComputeRequest {
                jurisdiction_code: jurisdiction.unwrap_or_else(|| default_code.to_string()),
                gross_income: parse_amount("income", &income)?,
                filing_status,
                deductions_claimed: parse_optional_amount("deductions", deductions.as_deref())?,
                dependent_count: dependents,
                age,
            };
            app::render_compute(&registry, request, json)?
        }
        Command::Brackets { jurisdiction, json } => {
            app::render_brackets(&registry, jurisdiction.as_deref().unwrap_or(default_code), json)?
        }
        Command::Jurisdictions => app::render_jurisdictions(&registry),
        Command::Optimize { selected, json } => {
            let currency = registry.resolve(default_code)?;
            app::render_optimization(&StrategyCatalog::builtin(), selected, currency, json)?
        }
    };

    println!("{output}");
    Ok(())
}
