//! timefs CLI
//!
//! Command-line front end for the time-travelling file system.

use anyhow::{Context, Result};
use clap::Parser;
use timefs::cli::commands::{self, GlobalOptions};
use timefs::cli::{Cli, Commands};
use timefs::config::{ColorMode, GlobalConfig};
use timefs::TimefsError;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so shell output stays clean
    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    let options = GlobalOptions {
        quiet: cli.quiet,
        json: cli.json,
        color: cli
            .color
            .as_deref()
            .map(str::parse::<ColorMode>)
            .transpose()
            .context("Invalid --color value")?,
    };

    match cli.command.unwrap_or(Commands::Shell) {
        Commands::Shell => {
            let config = load_config(cli.config.as_deref())?;
            commands::shell::execute(&config, &options)
        },
        Commands::Run { script } => {
            let config = load_config(cli.config.as_deref())?;
            commands::run::execute(&script, &config, &options)
        },
        Commands::Config {
            key,
            value,
            list,
            show_origin,
        } => {
            let path = match cli.config {
                Some(path) => path,
                None => GlobalConfig::get_config_path()?,
            };
            commands::config::execute(&path, key, value, list, show_origin, cli.json)
        },
        Commands::Completion { shell } => commands::completion::execute(shell),
    }
}

/// Load the configuration file, falling back to defaults without a home directory
fn load_config(path: Option<&std::path::Path>) -> Result<GlobalConfig> {
    let config = match path {
        Some(path) => GlobalConfig::load_from(path)?,
        None => match GlobalConfig::load() {
            Ok(config) => config,
            Err(TimefsError::HomeDirectoryNotFound) => {
                tracing::warn!("home directory not found, using default configuration");
                GlobalConfig::default()
            },
            Err(e) => return Err(e.into()),
        },
    };
    Ok(config)
}
