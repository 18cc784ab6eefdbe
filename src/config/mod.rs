//! Configuration management for timefs
//!
//! Settings are stored as TOML in ~/.timefs/config.toml

pub mod global_config;

// Re-export commonly used items
pub use global_config::{ColorMode, ConfigKey, EngineConfig, GlobalConfig, ShellConfig};
