// In app/src/main.rs

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::str::FromStr;
use tracing::Level;
use tracing_subscriber::filter::Targets;
use tracing_subscriber::prelude::*;

use engine::PriceEngine;
use strategies::{MarketCondition, StrategySettings, create_strategy};

mod output;
mod sources;

const DEFAULT_CONFIG_PATH: &str = "config/pricer.toml";
const ENV_FILE_VAR: &str = "PRICER_ENV_FILE";

// --- Command-Line Interface Definition ---

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = "Recommends crypto-pegged retail markups from market signals.")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Prices every product in the configured catalog.
    Price(PriceArgs),

    /// Lists the accepted market-condition identifiers.
    Conditions,
}

#[derive(Args, Debug)]
struct PriceArgs {
    /// Path to the TOML configuration file.
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// CSV file with timestamp,price columns. Overrides the configured data provider.
    #[arg(short, long)]
    data: Option<PathBuf>,

    /// Market condition (e.g. "balanced", "bull", "competitor"). Overrides the config file.
    #[arg(short, long)]
    market_condition: Option<String>,

    /// Print flat JSON records instead of a table.
    #[arg(long)]
    json: bool,

    /// Price products on all cores.
    #[arg(long)]
    parallel: bool,

    /// Print signals for each product and enable debug logging.
    #[arg(short, long)]
    verbose: bool,
}

// --- Main Application Entry Point ---

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from a .env file, if it exists. Variables
    // already set in the environment are kept.
    let env_file = std::env::var(ENV_FILE_VAR).unwrap_or_else(|_| ".env".to_string());
    dotenvy::from_path(&env_file).ok();

    // Parse command-line arguments.
    let cli = Cli::parse();

    match cli.command {
        Commands::Price(args) => handle_price(args).await?,
        Commands::Conditions => {
            init_tracing(Level::INFO);
            print_conditions();
        }
    }

    Ok(())
}

/// Installs the fmt subscriber on stderr, keeping HTTP client noise at WARN.
fn init_tracing(level: Level) {
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_filter(
            Targets::new()
                .with_target("reqwest", Level::WARN)
                .with_target("hyper", Level::WARN)
                .with_target("hyper_util", Level::WARN)
                .with_default(level),
        );
    tracing_subscriber::registry().with(fmt_layer).init();
}

// --- "Price" Subcommand Logic ---

/// Loads and validates configuration, fetches market data and prints one
/// recommendation per product.
async fn handle_price(args: PriceArgs) -> Result<()> {
    // --- 1. Configuration ---
    let settings = app_config::load_settings(&args.config)
        .with_context(|| format!("Failed to load {}", args.config.display()))?;

    let level = if args.verbose {
        Level::DEBUG
    } else {
        Level::from_str(&settings.app.log_level).unwrap_or(Level::INFO)
    };
    init_tracing(level);

    let config = app_config::validate(&settings, args.market_condition.as_deref())
        .context("Invalid configuration")?;
    tracing::info!(
        products = config.catalog.len(),
        condition = %config.market_condition,
        "Configuration loaded successfully."
    );

    // --- 2. Market data ---
    let series = sources::build_series_source(&config, args.data.as_deref()).await?;
    let competitors = sources::build_competitor_source(&config).await?;

    // --- 3. Pricing ---
    let engine = PriceEngine::new(
        config.market_condition,
        &config.strategies,
        config.smoothing_window_hours,
    )
    .with_default_asset(config.default_asset.clone());
    tracing::debug!(
        condition = %engine.market_condition(),
        strategy = engine.strategy_name(),
        default_asset = engine.default_asset(),
        "Price engine ready."
    );
    let catalog = config.catalog;
    let parallel = args.parallel;

    // The pricing work is CPU-bound, so move it off the async runtime.
    let outcomes = tokio::task::spawn_blocking(move || {
        if parallel {
            engine.run_parallel(&catalog, &series, &competitors)
        } else {
            engine.run(&catalog, &series, &competitors)
        }
    })
    .await?;

    // --- 4. Output ---
    if args.json {
        output::print_json(&outcomes)?;
    } else {
        output::print_table(&outcomes, args.verbose);
    }
    Ok(())
}

// --- "Conditions" Subcommand Logic ---

fn print_conditions() {
    let settings = StrategySettings::default();
    for condition in MarketCondition::ALL {
        let aliases = condition.aliases();
        let aliases = if aliases.is_empty() {
            String::new()
        } else {
            format!(" (aliases: {})", aliases.join(", "))
        };
        println!(
            "{:12} {}{}",
            condition.as_str(),
            create_strategy(condition, &settings).name(),
            aliases
        );
    }
}
