//! Command-line interface for timefs

use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod command;
pub mod commands;
pub mod output;
pub mod session;

pub use command::{parse_line, Command, ParsedLine};
pub use output::Renderer;
pub use session::{Flow, Session};

/// timefs - Time-travelling file system
#[derive(Parser)]
#[command(
    name = "timefs",
    version,
    about = "An in-memory time-travelling file system",
    long_about = "timefs keeps a branching version tree per file: snapshots are immutable checkpoints, \
                  edits between them collapse into a single draft, and any version can be made active again."
)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress success confirmations
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output: auto, always, never
    #[arg(long, global = true)]
    pub color: Option<String>,

    /// Emit one JSON object per command result
    #[arg(long, global = true)]
    pub json: bool,

    /// Path to config file (default: ~/.timefs/config.toml)
    #[arg(long, global = true, env = "TIMEFS_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the interactive shell (default)
    Shell,

    /// Execute commands from a script file, or stdin with '-'
    Run {
        /// Script to execute
        script: PathBuf,
    },

    /// Get and set configuration options
    Config {
        /// Configuration key to get/set
        key: Option<String>,
        /// Configuration value to set
        value: Option<String>,
        /// List all configuration values
        #[arg(short, long)]
        list: bool,
        /// Show configuration file location
        #[arg(long)]
        show_origin: bool,
    },

    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completion for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}
