//! CLI command implementations

pub mod completion;
pub mod config;
pub mod run;
pub mod shell;

// Common utilities for commands
use crate::cli::output::Renderer;
use crate::config::{ColorMode, GlobalConfig};
use crate::core::clock::SystemClock;
use crate::storage::FileSystem;
use crate::cli::session::Session;

/// Global options shared by the commands
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    pub quiet: bool,
    pub json: bool,
    pub color: Option<ColorMode>,
}

/// Decide whether stdout gets ANSI colors
pub fn use_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => atty::is(atty::Stream::Stdout),
    }
}

/// Build a fresh session from configuration and command-line overrides
pub fn new_session(config: &GlobalConfig, options: &GlobalOptions) -> Session {
    let color = use_color(options.color.unwrap_or(config.shell.color));
    colored::control::set_override(color);

    let renderer = Renderer {
        color,
        json: options.json || config.shell.json,
        quiet: options.quiet,
    };
    let fs = FileSystem::with_clock(&config.engine, Box::new(SystemClock));
    tracing::debug!(
        registry_buckets = config.engine.registry_buckets,
        version_buckets = config.engine.version_buckets,
        "starting session"
    );
    Session::new(fs, renderer)
}
