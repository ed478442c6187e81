//! Tournament settlement CLI
//!
//! Reads a tournament file (fee schedule source, overrides, entrants), runs the
//! settlement engine and prints the payouts.

mod input;
mod logging;
mod report;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use prize_settlement::{validate_entrants, SettlementConfig, SettlementEngine};
use tracing::{debug, info};

use crate::input::TournamentInput;

#[derive(Parser)]
#[command(name = "settle")]
#[command(about = "Compute tournament payouts from fee schedule and final chip counts")]
#[command(version)]
struct Cli {
    /// Tournament JSON file
    tournament: PathBuf,

    /// Settlement configuration file (TOML); defaults plus SETTLEMENT_* env otherwise
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    output: OutputFormat,

    /// Log level when RUST_LOG is not set
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// Log format (pretty, compact, json)
    #[arg(long, default_value = "compact")]
    log_format: String,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    logging::initialize_logging(&cli.log_level, &cli.log_format)?;

    let config = match &cli.config {
        Some(path) => SettlementConfig::from_file(path)
            .with_context(|| format!("Failed to load settlement configuration: {:?}", path))?,
        None => SettlementConfig::from_env().context("Failed to load settlement configuration")?,
    };
    debug!("Loaded configuration: {:?}", config);

    let tournament = TournamentInput::from_file(&cli.tournament)?;
    validate_entrants(&tournament.entrants)?;
    info!(entrants = tournament.entrants.len(), "Loaded tournament {:?}", cli.tournament);

    let table = config.fee_table()?;
    let overrides = tournament.fee_overrides();
    let engine = SettlementEngine::new(config);
    let result = engine.settle_source(
        &tournament.schedule,
        &table,
        &overrides,
        &tournament.entrants,
    )?;

    match cli.output {
        OutputFormat::Table => {
            print!("{}", report::render_table(&result));
            for line in report::render_warnings(&result.warnings) {
                eprintln!("{}", line);
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
    }

    Ok(())
}
