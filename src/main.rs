//! Tilequest CLI - play the game in a terminal or check a config file.

// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]

mod cli;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

/// Tilequest - a tile-map RPG with turn-based battles
#[derive(Parser, Debug)]
#[command(name = "tilequest")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Play in the terminal (arrows/WASD move, Enter/Space confirm, Esc quits)
    Play {
        /// JSON config file (default: built-in settings)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Random seed, overriding the config (default: from clock)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Directory holding `<name>.font` files (default: block text)
        #[arg(short, long)]
        assets: Option<PathBuf>,

        /// Frames per second, 10-240
        #[arg(long, default_value = "30")]
        fps: u32,

        /// Log file
        #[arg(long, default_value = "tilequest.log")]
        log: PathBuf,
    },

    /// Validate a config file and summarize the world it builds
    CheckConfig {
        /// JSON config file
        #[arg(required = true)]
        path: PathBuf,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();

    let result = match args.command {
        Commands::Play {
            config,
            seed,
            assets,
            fps,
            log,
        } => cli::play::execute(config, seed, assets, fps, log),

        Commands::CheckConfig { path } => cli::check::execute(path),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
