//! X & O Deluxe - CLI entry point.

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};
use tracing_subscriber::EnvFilter;
use xo_deluxe::{GameConfig, GameSession, Position, run_tui};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Command::Play { config, log_file } => run_play(config, log_file).await,
        Command::Replay { cells } => run_replay(&cells),
        Command::Config => {
            print!("{}", GameConfig::default_toml()?);
            Ok(())
        }
    }
}

/// Run the terminal UI, logging to a file so output does not tear the screen.
async fn run_play(config_path: PathBuf, log_file: PathBuf) -> Result<()> {
    initialize_file_tracing(&log_file)?;

    let config = GameConfig::load_or_default(&config_path)?;
    run_tui(config).await
}

/// Play `cells` in order on a fresh session and print the outcome.
#[instrument(skip_all, fields(moves = cells.len()))]
fn run_replay(cells: &[String]) -> Result<()> {
    initialize_stderr_tracing();

    let mut session = GameSession::default();
    for cell in cells {
        let Some(pos) = Position::from_label_or_number(cell) else {
            warn!(%cell, "Unknown cell");
            println!("cell {}: ignored (not a cell)", cell);
            continue;
        };
        match session.play(pos) {
            Ok(status) => info!(%cell, %status, "Played"),
            Err(e) => {
                warn!(%cell, error = %e, "Move ignored");
                println!("cell {}: ignored ({})", cell, e);
            }
        }
    }

    println!("{}", session.board().display());
    println!();
    for entry in session.entries() {
        println!("{}", entry);
    }
    println!();
    println!("{}", xo_deluxe::status_line(&session));
    Ok(())
}

fn initialize_file_tracing(path: &Path) -> Result<()> {
    let log_file = std::fs::File::create(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))?;

    info!(path = %path.display(), "File tracing initialized");
    Ok(())
}

fn initialize_stderr_tracing() {
    // Don't panic if already initialized
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .try_init();
}
