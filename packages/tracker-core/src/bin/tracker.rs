//! Tracker CLI - portfolio valuation from sheet exports or local CSV files.
//!
//! Prints JSON for easy consumption by scripts and frontends.

use clap::{Parser, Subcommand};
use serde_json::json;
use std::path::PathBuf;
use tracker_core::{
    compute_report, ApiResponse, ResponseCache, SheetClient, Table, TrackerConfig,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tracker")]
#[command(about = "Portfolio tracker CLI - valuation and P&L reporting")]
#[command(version)]
struct Cli {
    /// Path to the config file (defaults to the user config directory)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Full report: valued holdings, totals, realized P&L, warnings
    Report {
        #[command(flatten)]
        input: InputArgs,
    },
    /// Portfolio totals only
    Summary {
        #[command(flatten)]
        input: InputArgs,
    },
    /// Remove all cached sheet responses
    ClearCache,
}

#[derive(clap::Args)]
struct InputArgs {
    /// Read holdings from a local CSV instead of the configured sheet
    #[arg(long)]
    holdings_file: Option<PathBuf>,

    /// Read transactions from a local CSV instead of the configured sheet
    #[arg(long)]
    transactions_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let output = match cli.command {
        Commands::Report { input } => handle_report(cli.config, input, false).await,
        Commands::Summary { input } => handle_report(cli.config, input, true).await,
        Commands::ClearCache => handle_clear_cache(),
    };

    println!("{}", output);
}

fn load_config(path: Option<PathBuf>) -> tracker_core::Result<TrackerConfig> {
    match path {
        Some(path) => TrackerConfig::load_from_path(&path),
        None => TrackerConfig::load(),
    }
}

/// Load one table from a local file or from the configured sheet tab.
async fn load_table(
    file: Option<PathBuf>,
    client: &SheetClient,
    config: &TrackerConfig,
    holdings: bool,
) -> tracker_core::Result<Table> {
    if let Some(path) = file {
        let content = std::fs::read(&path)?;
        return Table::from_csv_bytes(&content);
    }

    if !config.has_sheet() {
        return Err(tracker_core::Error::Config(
            "no sheet_id configured and no local file given".to_string(),
        ));
    }

    let source = if holdings {
        config.holdings_source()
    } else {
        config.transactions_source()
    };
    client.fetch_table(&source).await
}

async fn handle_report(
    config_path: Option<PathBuf>,
    input: InputArgs,
    summary_only: bool,
) -> String {
    let config = match load_config(config_path) {
        Ok(config) => config,
        Err(e) => {
            return serde_json::to_string_pretty(&ApiResponse::<()>::err(e.to_string())).unwrap()
        }
    };

    let cache = ResponseCache::new(ResponseCache::default_dir(), config.cache_ttl());
    let client = SheetClient::new(cache);

    let holdings = match load_table(input.holdings_file, &client, &config, true).await {
        Ok(table) => table,
        Err(e) => {
            return serde_json::to_string_pretty(&ApiResponse::<()>::err(e.to_string())).unwrap()
        }
    };
    let transactions = match load_table(input.transactions_file, &client, &config, false).await {
        Ok(table) => table,
        Err(e) => {
            return serde_json::to_string_pretty(&ApiResponse::<()>::err(e.to_string())).unwrap()
        }
    };

    match compute_report(&holdings, &transactions) {
        Ok(report) => {
            if summary_only {
                serde_json::to_string_pretty(&ApiResponse::ok(report.summary)).unwrap()
            } else {
                serde_json::to_string_pretty(&ApiResponse::ok(report)).unwrap()
            }
        }
        Err(e) => serde_json::to_string_pretty(&ApiResponse::<()>::err(e.to_string())).unwrap(),
    }
}

fn handle_clear_cache() -> String {
    let cache = ResponseCache::with_defaults();
    match cache.clear() {
        Ok(removed) => serde_json::to_string_pretty(&ApiResponse::ok(json!({
            "removed": removed,
            "dir": cache.dir(),
        })))
        .unwrap(),
        Err(e) => serde_json::to_string_pretty(&ApiResponse::<()>::err(e.to_string())).unwrap(),
    }
}
