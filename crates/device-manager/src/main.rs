mod commands;

use anyhow::{Result, anyhow};
use clap::Parser;
use dotenv::dotenv;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use application::{AndroidDeviceManager, ProviderRegistry};
use infrastructure::config::ManagerConfig;
use infrastructure::{SeaOrmRecordStore, connect};
use migration::{Migrator, MigratorTrait};

use commands::Command;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to config directory
    #[arg(long, default_value = "config")]
    config_dir: String,

    /// Override the database URL from configuration
    #[arg(long)]
    database_url: Option<String>,

    /// Device type to operate on
    #[arg(long, default_value = "android")]
    device_type: String,

    #[command(subcommand)]
    command: Command,
}

async fn run() -> Result<()> {
    dotenv().ok();

    // Logs go to stderr, stdout carries the JSON result
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "info,device_manager=debug,application=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    let mut config = ManagerConfig::load(&args.config_dir)?;
    if let Some(url) = args.database_url {
        config.database.url = url;
    }

    let db = connect(&config.database).await?;
    if config.database.run_migrations {
        Migrator::up(&db, None).await?;
        info!("Migrations applied");
    }

    let mut registry = ProviderRegistry::new();
    registry.register(Arc::new(AndroidDeviceManager::new(Arc::new(
        SeaOrmRecordStore::new(db),
    ))))?;

    let provider = registry.get(&args.device_type).ok_or_else(|| {
        anyhow!(
            "Unknown device type '{}' (available: {})",
            args.device_type,
            registry.provider_types().join(", ")
        )
    })?;

    let output = commands::execute(provider.as_ref(), args.command).await?;
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
