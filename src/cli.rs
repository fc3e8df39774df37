//! Command-line interface for xo_deluxe.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// X & O Deluxe - tic-tac-toe with move history and celebrations
#[derive(Parser, Debug)]
#[command(name = "xo_deluxe")]
#[command(about = "Terminal tic-tac-toe with time travel", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play in the terminal UI
    Play {
        /// Path to the configuration file (defaults are used if missing)
        #[arg(short, long, default_value = "xo_deluxe.toml")]
        config: PathBuf,

        /// Where to write logs while the UI owns the terminal
        #[arg(long, default_value = "xo_deluxe.log")]
        log_file: PathBuf,
    },

    /// Play a sequence of cells headless and print the result
    Replay {
        /// Cells in play order, as indices (0-8) or labels like `center`;
        /// rejected moves are reported and skipped
        #[arg(required = true)]
        cells: Vec<String>,
    },

    /// Print the default configuration as TOML
    Config,
}
