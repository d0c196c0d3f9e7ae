//! Turnclock - timed tic-tac-toe on the console
//!
//! Drives one session from stdin, or many headless under virtual time.

#![warn(missing_docs)]

mod cli;
mod config;
mod console;
mod runner;
mod simulate;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command, Overrides};
use config::AppConfig;
use std::path::Path;
use tracing::{debug, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Logs go to stderr; stdout carries the game.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Play { overrides, json } => {
            let config = load_config(cli.config.as_deref(), &overrides)?;
            runner::run_console(config, json).await
        }
        Command::Simulate {
            overrides,
            games,
            json,
        } => {
            let config = load_config(cli.config.as_deref(), &overrides)?;
            let tally = simulate::run_simulation(&config, games)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&tally)?);
            } else {
                println!("{tally}");
            }
            Ok(())
        }
        Command::Config { overrides } => {
            let config = load_config(cli.config.as_deref(), &overrides)?;
            print!("{}", config.to_toml()?);
            Ok(())
        }
    }
}

/// Reads the config file (or defaults) and applies command-line overrides.
#[instrument(skip(overrides))]
fn load_config(path: Option<&Path>, overrides: &Overrides) -> Result<AppConfig> {
    let config = AppConfig::load(path)?.with_overrides(overrides)?;
    debug!(?config, "Effective configuration");
    Ok(config)
}
