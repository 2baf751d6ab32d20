//! chesstty driver - exercises the rules engine without a graphical front end.
//!
//! The engine has no input or rendering of its own. This binary stands in
//! for the UI layer:
//!
//! 1. **`setup`**: builds the standard opening layout and prints every
//!    piece with its candidate types as JSON.
//! 2. **`replay`**: plays a JSON script of move attempts against the
//!    standard layout and prints the outcome of each attempt plus the final
//!    position.
//!
//! Logs go to stderr (or to daily files under `CHESSTTY_LOG_DIR`) so that
//! stdout stays machine-readable. See [`config`] for all tunables.

use std::path::PathBuf;

use anyhow::Context;
use chess::Game;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod config;
mod replay;

/// Top-level CLI arguments.
#[derive(Parser)]
#[command(name = "chesstty", about = "Chess rules engine for pieces of unknown type")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the standard opening layout.
    Setup {
        /// Pretty-print the JSON output.
        #[arg(short, long)]
        pretty: bool,
    },
    /// Replay a script of move attempts against the standard layout.
    Replay {
        /// Path to a JSON script. Reads stdin when omitted.
        script: Option<PathBuf>,

        /// Pretty-print the JSON output.
        #[arg(short, long)]
        pretty: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let _guard = init_tracing();

    match cli.command {
        Commands::Setup { pretty } => {
            let game: Game = Game::standard().context("failed to build standard layout")?;
            let position = replay::Position::from_game(&game)?;
            print_json(&position, pretty)?;
        }
        Commands::Replay { script, pretty } => {
            let steps = match script {
                Some(path) => replay::load_script_file(&path)?,
                None => replay::load_script(std::io::stdin().lock())
                    .context("failed to read script from stdin")?,
            };
            tracing::info!(steps = steps.len(), "replaying script");

            let mut game = Game::standard().context("failed to build standard layout")?;
            let report = replay::run(&mut game, &steps)?;
            print_json(&report, pretty)?;
        }
    }

    Ok(())
}

/// Install the global subscriber. The returned guard must live until exit
/// so buffered file logs are flushed.
fn init_tracing() -> Option<WorkerGuard> {
    let filter = EnvFilter::try_new(config::get_log_filter())
        .unwrap_or_else(|_| EnvFilter::new(config::DEFAULT_LOG_FILTER));

    match config::get_log_dir() {
        Some(dir) => {
            let file_appender = tracing_appender::rolling::daily(dir, "chesstty");
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_writer(non_blocking)
                        .with_ansi(false)
                        .with_target(true)
                        .with_line_number(true),
                )
                .with(filter)
                .init();
            Some(guard)
        }
        None => {
            tracing_subscriber::registry()
                .with(fmt::layer().with_writer(std::io::stderr))
                .with(filter)
                .init();
            None
        }
    }
}

fn print_json(value: &impl Serialize, pretty: bool) -> anyhow::Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{json}");
    Ok(())
}
