use anyhow::{Context, Result};
use clap::Parser;
use snake_sim::game::GameConfig;
use snake_sim::modes::HumanMode;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "snake_sim")]
#[command(version, about = "Grid snake game in the terminal")]
struct Cli {
    /// Seed for food placement, for a repeatable game
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs to this file (RUST_LOG overrides the default filter)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // The terminal belongs to the game, so logs only go to a file
    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }

    tracing::info!(seed = ?cli.seed, "snake_sim starting");

    let mut human_mode = HumanMode::new(GameConfig::default(), cli.seed);
    human_mode.run().await?;

    Ok(())
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("snake_sim=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}
