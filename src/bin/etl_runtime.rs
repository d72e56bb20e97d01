//! ETL Runtime
//!
//! Fetches the PokéAPI catalog, derives mass index + category, upserts into
//! SQLite and prints the per-category analytics.
//!
//! Usage:
//!   cargo run --release --bin etl_runtime
//!
//! Environment variables:
//!   POKEFLOW_DB_PATH - SQLite database path (default: local.db)
//!   POKEAPI_BASE_URL - API root (default: https://pokeapi.co/api/v2)
//!   POKEAPI_LIMIT - Catalog size (default: 10)
//!   FETCH_TIMEOUT_SECS - Per-request timeout (default: 10)
//!   RUN_INTERVAL_SECS - Repeat every N seconds instead of running once

use dotenv::dotenv;
use log::{error, info, warn};
use pokeflow::pipeline::{
    config::PipelineConfig,
    db::PokemonStore,
    engine::{run_once, PipelineError, RunReport},
    pokeapi::PokeApiClient,
    types::DerivedRecord,
};
use std::process::ExitCode;
use std::time::Duration;
use tokio::time::{Interval, MissedTickBehavior};

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    let config = PipelineConfig::from_env();

    info!("🚀 Pokeflow ETL runtime");
    info!("   ├─ Database: {}", config.db_path);
    info!("   ├─ API: {}", config.api_base_url);
    info!("   ├─ Limit: {}", config.fetch_limit);
    info!("   └─ Timeout: {}s", config.fetch_timeout_secs);

    let fetcher = PokeApiClient::new(
        &config.api_base_url,
        config.fetch_limit,
        config.fetch_timeout(),
    )?;

    let Some(period) = config.run_interval() else {
        return Ok(match execute_run(&fetcher, &config).await {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                error!("❌ {}", e);
                ExitCode::FAILURE
            }
        });
    };

    info!("🔄 Periodic mode: one run every {}s (CTRL+C to stop)", period.as_secs());
    let mut ticker = run_ticker(period);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                if let Err(e) = execute_run(&fetcher, &config).await {
                    warn!("⚠️  Run failed, waiting for next tick: {}", e);
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("⚠️  Received CTRL+C, shutting down...");
                break;
            }
        }
    }

    info!("✅ ETL runtime stopped");
    Ok(ExitCode::SUCCESS)
}

/// Interval for periodic mode
///
/// A run longer than the period pushes the next one back instead of
/// firing the missed runs back to back.
fn run_ticker(period: Duration) -> Interval {
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    ticker
}

/// One run with its own connection: opened first, closed after the commit
async fn execute_run(fetcher: &PokeApiClient, config: &PipelineConfig) -> Result<(), PipelineError> {
    let mut store = PokemonStore::open(&config.db_path)?;
    let report = run_once(fetcher, &mut store).await?;
    store.close()?;

    print_report(&report);
    Ok(())
}

fn print_report(report: &RunReport) {
    println!("Pokemon per category:");
    for count in &report.counts {
        println!("  {:<14} {}", count.category.as_str(), count.count);
    }

    println!();
    println!("Heaviest per category:");
    print_rows(&report.heaviest);

    println!();
    println!("Weakest per category:");
    print_rows(&report.weakest);
}

fn print_rows(rows: &[DerivedRecord]) {
    for row in rows {
        println!(
            "  {:<14} #{:<4} {:<12} h={:.1}m w={:.1}kg imc={:.2}",
            row.mass_category.as_str(),
            row.id,
            row.name,
            row.height,
            row.weight,
            row.mass_index
        );
    }
}
