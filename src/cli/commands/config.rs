//! Configuration command implementation

use crate::config::{ConfigKey, GlobalConfig};
use anyhow::Result;
use colored::Colorize;
use std::path::Path;

/// Execute the config command
pub fn execute(
    config_path: &Path,
    key: Option<String>,
    value: Option<String>,
    list: bool,
    show_origin: bool,
    json: bool,
) -> Result<()> {
    let mut config = GlobalConfig::load_from(config_path)?;

    if show_origin {
        if json {
            println!(
                "{}",
                serde_json::json!({
                    "config_file": config_path.display().to_string(),
                    "exists": config_path.exists()
                })
            );
        } else {
            println!(
                "{}: {}",
                "Configuration file".bold(),
                config_path.display().to_string().cyan()
            );
            if config_path.exists() {
                println!("{}: {}", "Status".bold(), "exists".green());
            } else {
                println!("{}: {}", "Status".bold(), "not created yet".yellow());
            }
        }
        return Ok(());
    }

    match (key, value) {
        (Some(key), Some(value)) => {
            let config_key: ConfigKey = key.parse()?;
            config.set(config_key, &value)?;
            config.save_to(config_path)?;
            if !json {
                println!("{} {} = {}", "Set".green(), key.cyan(), value);
            }
        },
        (Some(key), None) => {
            let config_key: ConfigKey = key.parse()?;
            let value = config.get(config_key);
            if json {
                println!("{}", serde_json::json!({ "key": key, "value": value }));
            } else {
                println!("{}", value);
            }
        },
        (None, _) if list => list_configuration(&config, json),
        (None, _) => {
            println!("Usage: timefs config [--list] [--show-origin] [<key> [<value>]]");
        },
    }

    Ok(())
}

fn list_configuration(config: &GlobalConfig, json: bool) {
    let entries = config.list();
    if json {
        let map: serde_json::Map<String, serde_json::Value> = entries
            .into_iter()
            .map(|(k, v)| (k.to_string(), serde_json::Value::String(v)))
            .collect();
        println!("{}", serde_json::Value::Object(map));
        return;
    }
    for (key, value) in entries {
        println!("{}={}", key, value);
    }
}
