//! Calculation history server binary entry point.
//!
//! Logs go to stderr. Coverage is excluded because `main` needs a bound
//! socket and a shutdown signal to exercise.

// Enable the coverage attribute when running with nightly for llvm-cov exclusions
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

use std::sync::Arc;

use calc_history::config::{Config, LogFormat};
use calc_history::error::AppError;
use calc_history::server;
use calc_history::service::CalculationService;
use calc_history::storage::SqliteStorage;
use tracing_subscriber::EnvFilter;

#[cfg_attr(coverage_nightly, coverage(off))]
#[tokio::main]
async fn main() {
    // Load configuration before logging so the filter can use LOG_LEVEL
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            std::process::exit(1);
        }
    };

    init_tracing(&config);
    tracing::info!("calc-history starting...");
    tracing::info!(
        "Configuration loaded: database={}, address={}, max_expression_length={}",
        config.database_path,
        config.bind_address,
        config.max_expression_length
    );

    if let Err(e) = run(config).await {
        tracing::error!("{e}");
        std::process::exit(1);
    }

    tracing::info!("calc-history shutdown complete");
}

#[cfg_attr(coverage_nightly, coverage(off))]
async fn run(config: Config) -> Result<(), AppError> {
    let storage = SqliteStorage::new(&config.database_path).await?;
    let service = CalculationService::with_repository(
        Arc::new(storage),
        config.max_expression_length,
    );
    server::serve(config.bind_address, Arc::new(service)).await
}

#[cfg_attr(coverage_nightly, coverage(off))]
fn init_tracing(config: &Config) {
    let filter = config
        .log_level
        .parse::<EnvFilter>()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match config.log_format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Text => builder.with_ansi(false).init(),
    }
}
