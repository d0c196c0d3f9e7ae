//! Command-line interface for turnclock.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use turnclock_board::Difficulty;
use turnclock_session::GameMode;

/// Turnclock - timed tic-tac-toe sessions on the console
#[derive(Parser, Debug)]
#[command(name = "turnclock")]
#[command(about = "Timed tic-tac-toe session manager", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play interactively: type commands on stdin, notifications print to stdout
    Play {
        /// Settings that override the config file
        #[command(flatten)]
        overrides: Overrides,

        /// Print notifications as JSON lines
        #[arg(long)]
        json: bool,
    },

    /// Run games headless under virtual time and print the tally
    Simulate {
        /// Settings that override the config file
        #[command(flatten)]
        overrides: Overrides,

        /// Number of games to finish
        #[arg(short, long, default_value = "10")]
        games: u32,

        /// Print the tally as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the effective configuration as TOML
    Config {
        /// Settings that override the config file
        #[command(flatten)]
        overrides: Overrides,
    },
}

/// Per-run overrides layered over the config file.
#[derive(Args, Debug, Default, Clone)]
pub struct Overrides {
    /// Game mode (duo, single-player)
    #[arg(long)]
    pub mode: Option<GameMode>,

    /// Opponent difficulty (easy, difficult, legendary)
    #[arg(long)]
    pub difficulty: Option<Difficulty>,

    /// Seconds allowed per turn
    #[arg(long)]
    pub max_turn_secs: Option<f64>,

    /// Seconds to stay on the finished screen
    #[arg(long)]
    pub finished_delay_secs: Option<f64>,

    /// Seconds the opponent thinks before moving
    #[arg(long)]
    pub think_secs: Option<f64>,

    /// Tick interval in milliseconds
    #[arg(long)]
    pub tick_ms: Option<u64>,

    /// Seed for forfeiture and opponent moves
    #[arg(long)]
    pub seed: Option<u64>,
}
