//! Global configuration management
//!
//! Settings live in `~/.timefs/config.toml` unless a path is given
//! explicitly. A missing file yields the defaults.

use crate::core::error::{Result, TimefsError};
use crate::storage::hash_table::DEFAULT_BUCKETS;
use directories::UserDirs;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Default bucket count of the file-name registry
pub const DEFAULT_REGISTRY_BUCKETS: usize = 256;

/// Global configuration for timefs
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalConfig {
    /// Engine sizing
    pub engine: EngineConfig,
    /// Interactive shell settings
    pub shell: ShellConfig,
}

/// Sizing of the in-memory structures
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Buckets in the name→file registry
    pub registry_buckets: usize,
    /// Buckets in each file's id→version index
    pub version_buckets: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            registry_buckets: DEFAULT_REGISTRY_BUCKETS,
            version_buckets: DEFAULT_BUCKETS,
        }
    }
}

/// Interactive shell settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    /// Prompt printed before each command
    pub prompt: String,
    /// Color output
    pub color: ColorMode,
    /// Emit JSON instead of text
    pub json: bool,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            prompt: "> ".to_string(),
            color: ColorMode::Auto,
            json: false,
        }
    }
}

/// When to colorize output
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

impl fmt::Display for ColorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorMode::Auto => write!(f, "auto"),
            ColorMode::Always => write!(f, "always"),
            ColorMode::Never => write!(f, "never"),
        }
    }
}

impl FromStr for ColorMode {
    type Err = TimefsError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "auto" => Ok(ColorMode::Auto),
            "always" => Ok(ColorMode::Always),
            "never" => Ok(ColorMode::Never),
            other => Err(TimefsError::configuration(format!(
                "color must be one of auto, always, never (got '{}')",
                other
            ))),
        }
    }
}

/// Configuration key for setting values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    EngineRegistryBuckets,
    EngineVersionBuckets,
    ShellPrompt,
    ShellColor,
    ShellJson,
}

impl ConfigKey {
    pub const ALL: [ConfigKey; 5] = [
        ConfigKey::EngineRegistryBuckets,
        ConfigKey::EngineVersionBuckets,
        ConfigKey::ShellPrompt,
        ConfigKey::ShellColor,
        ConfigKey::ShellJson,
    ];

    pub fn to_str(self) -> &'static str {
        match self {
            ConfigKey::EngineRegistryBuckets => "engine.registry_buckets",
            ConfigKey::EngineVersionBuckets => "engine.version_buckets",
            ConfigKey::ShellPrompt => "shell.prompt",
            ConfigKey::ShellColor => "shell.color",
            ConfigKey::ShellJson => "shell.json",
        }
    }
}

impl FromStr for ConfigKey {
    type Err = TimefsError;

    fn from_str(key: &str) -> Result<Self> {
        ConfigKey::ALL
            .into_iter()
            .find(|k| k.to_str() == key)
            .ok_or_else(|| TimefsError::configuration(format!("unknown config key '{}'", key)))
    }
}

impl GlobalConfig {
    /// Load configuration from the default location
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::get_config_path()?)
    }

    /// Load configuration from `path`, defaulting when the file is absent
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: GlobalConfig = toml::from_str(&content).map_err(|e| {
            TimefsError::configuration(format!("Failed to parse {}: {}", path.display(), e))
        })?;
        config.validate()?;

        Ok(config)
    }

    /// Save configuration to `path`, creating its directory
    pub fn save_to(&self, path: &Path) -> Result<()> {
        self.validate()?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| TimefsError::configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the path to the global configuration file
    pub fn get_config_path() -> Result<PathBuf> {
        let user_dirs = UserDirs::new().ok_or(TimefsError::HomeDirectoryNotFound)?;
        Ok(user_dirs.home_dir().join(".timefs").join("config.toml"))
    }

    /// Reject settings the engine cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.engine.registry_buckets == 0 {
            return Err(TimefsError::configuration(
                "engine.registry_buckets must be positive",
            ));
        }
        if self.engine.version_buckets == 0 {
            return Err(TimefsError::configuration(
                "engine.version_buckets must be positive",
            ));
        }
        Ok(())
    }

    /// Get a configuration value rendered as text
    pub fn get(&self, key: ConfigKey) -> String {
        match key {
            ConfigKey::EngineRegistryBuckets => self.engine.registry_buckets.to_string(),
            ConfigKey::EngineVersionBuckets => self.engine.version_buckets.to_string(),
            ConfigKey::ShellPrompt => self.shell.prompt.clone(),
            ConfigKey::ShellColor => self.shell.color.to_string(),
            ConfigKey::ShellJson => self.shell.json.to_string(),
        }
    }

    /// Set a configuration value from text
    pub fn set(&mut self, key: ConfigKey, value: &str) -> Result<()> {
        match key {
            ConfigKey::EngineRegistryBuckets => {
                self.engine.registry_buckets = parse_buckets(key, value)?;
            },
            ConfigKey::EngineVersionBuckets => {
                self.engine.version_buckets = parse_buckets(key, value)?;
            },
            ConfigKey::ShellPrompt => self.shell.prompt = value.to_string(),
            ConfigKey::ShellColor => self.shell.color = value.parse()?,
            ConfigKey::ShellJson => {
                self.shell.json = value.parse().map_err(|_| {
                    TimefsError::configuration(format!("{} must be true or false", key.to_str()))
                })?;
            },
        }
        Ok(())
    }

    /// Every key with its current value
    pub fn list(&self) -> Vec<(&'static str, String)> {
        ConfigKey::ALL
            .into_iter()
            .map(|key| (key.to_str(), self.get(key)))
            .collect()
    }
}

fn parse_buckets(key: ConfigKey, value: &str) -> Result<usize> {
    match value.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(TimefsError::configuration(format!(
            "{} must be a positive integer",
            key.to_str()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_creation_and_defaults() {
        let config = GlobalConfig::default();
        assert_eq!(config.engine.registry_buckets, 256);
        assert_eq!(config.engine.version_buckets, 16);
        assert_eq!(config.shell.prompt, "> ");
        assert_eq!(config.shell.color, ColorMode::Auto);
        assert!(!config.shell.json);
    }

    #[test]
    fn test_config_set_and_get() -> Result<()> {
        let mut config = GlobalConfig::default();
        config.set(ConfigKey::EngineRegistryBuckets, "1024")?;
        config.set(ConfigKey::ShellColor, "never")?;
        config.set(ConfigKey::ShellJson, "true")?;

        assert_eq!(config.get(ConfigKey::EngineRegistryBuckets), "1024");
        assert_eq!(config.shell.color, ColorMode::Never);
        assert!(config.shell.json);

        assert!(config.set(ConfigKey::EngineVersionBuckets, "0").is_err());
        assert!(config.set(ConfigKey::ShellColor, "sometimes").is_err());
        Ok(())
    }

    #[test]
    fn test_config_key_parsing() {
        assert_eq!(
            "engine.version_buckets".parse::<ConfigKey>().unwrap(),
            ConfigKey::EngineVersionBuckets
        );
        assert!("engine.unknown".parse::<ConfigKey>().is_err());
    }

    #[test]
    fn test_save_and_load_round_trip() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("nested").join("config.toml");

        let mut config = GlobalConfig::default();
        config.set(ConfigKey::ShellPrompt, "timefs> ")?;
        config.save_to(&path)?;

        assert_eq!(GlobalConfig::load_from(&path)?, config);
        Ok(())
    }

    #[test]
    fn test_missing_file_gives_defaults() -> Result<()> {
        let dir = TempDir::new()?;
        let config = GlobalConfig::load_from(&dir.path().join("absent.toml"))?;
        assert_eq!(config, GlobalConfig::default());
        Ok(())
    }

    #[test]
    fn test_partial_and_invalid_files() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("config.toml");

        std::fs::write(&path, "[shell]\njson = true\n")?;
        let config = GlobalConfig::load_from(&path)?;
        assert!(config.shell.json);
        assert_eq!(config.engine, EngineConfig::default());

        std::fs::write(&path, "[engine]\nregistry_buckets = 0\n")?;
        assert!(matches!(
            GlobalConfig::load_from(&path),
            Err(TimefsError::ConfigurationError { .. })
        ));

        std::fs::write(&path, "not toml at all [")?;
        assert!(GlobalConfig::load_from(&path).is_err());
        Ok(())
    }
}
