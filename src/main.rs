use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;

use commands::{ConfigCommand, SavedCommand, UnitPriceCommand};
use config::Config;
use decide_core::{FileStore, SavedItemRepository};

#[derive(Parser)]
#[command(name = "decide")]
#[command(version)]
#[command(about = "Decision helpers: saved items and unit-price comparison", long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare products by unit price
    Unitprice(UnitPriceCommand),

    /// Manage saved items
    Saved(SavedCommand),

    /// Manage configuration
    Config(ConfigCommand),
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(cli.config)?;
    tracing::debug!("Using data directory {}", config.data_dir.display());

    match cli.command {
        Some(Commands::Unitprice(cmd)) => {
            let repo = SavedItemRepository::new(FileStore::new(config.data_dir.clone()));
            cmd.run(&repo).await?;
        }
        Some(Commands::Saved(cmd)) => {
            let repo = SavedItemRepository::new(FileStore::new(config.data_dir.clone()));
            cmd.run(&repo).await?;
        }
        Some(Commands::Config(cmd)) => {
            cmd.run(&config)?;
        }
        None => {
            println!("Use --help to see available commands");
        }
    }

    Ok(())
}
