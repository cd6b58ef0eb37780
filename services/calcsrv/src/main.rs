//! CalcSrv main entrypoint
//!
//! Service startup and command line interface.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

use calcsrv::api;
use calcsrv::config::Config;
use calcsrv::history::SqliteHistoryStore;

#[derive(Parser, Debug)]
#[command(author, version, about = "CalcSrv - calculator API service")]
struct Args {
    /// Configuration file path
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Check configuration and database connectivity
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::from_file(path)?,
        None => Config::load()?,
    };
    config.validate()?;

    common::logging::init(&config.log.level)?;

    match args.command {
        Some(Commands::Check) => check_config(config).await,
        None => run_service(config).await,
    }
}

/// Run the HTTP service
async fn run_service(config: Config) -> Result<()> {
    info!("Starting {} service", config.service.name);

    let store = SqliteHistoryStore::connect(&config.database.path).await?;
    info!("History database ready: {}", config.database.path);

    let app = api::create_router(Arc::new(store));

    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
    info!(
        "{} listening on http://{}",
        config.service.name,
        listener.local_addr()?
    );
    info!("API endpoints:");
    info!("  GET  /health - Health check");
    info!("  GET  /calculadora-fast-api/sum - Single-pair sum");
    info!("  POST /calculadora-fast-api/batch_operations - Batch operations");
    info!("  GET  /calculadora-fast-api/history - Calculation history");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Check configuration and environment
async fn check_config(config: Config) -> Result<()> {
    println!("=== CalcSrv configuration check ===\n");

    println!("--- Service ---");
    println!("Name: {}", config.service.name);
    println!("Bind address: http://{}", config.bind_addr());
    println!("Log level: {}", config.log.level);

    println!("\n--- Database ---");
    println!("Path: {}", config.database.path);

    print!("Connection test: ");
    match SqliteHistoryStore::connect(&config.database.path).await {
        Ok(store) => {
            store.client().ping().await?;
            println!("✓ ok");
        }
        Err(e) => {
            println!("✗ failed - {}", e);
            return Err(e.into());
        }
    }

    println!("\n✓ All checks passed");
    Ok(())
}
