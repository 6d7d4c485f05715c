//! `config` subcommands over `config.toml`.

use clap::Subcommand;
use habit_tracker_core::{Config, ConfigError};

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print one value (e.g. "grid.weeks", "logging.filter")
    Get { key: String },
    /// Validate and store one value
    Set { key: String, value: String },
    /// Print the whole configuration as JSON
    List,
    /// Print the location of config.toml
    Path,
    /// Overwrite config.toml with the defaults
    Reset,
}

/// `config` is the result of loading config.toml at startup. `path` and
/// `reset` run even when loading failed, so a broken file can be repaired.
pub fn run(
    action: ConfigAction,
    config: Result<Config, ConfigError>,
) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ConfigAction::Get { key } => {
            let value = config?.get(&key).ok_or(ConfigError::UnknownKey(key))?;
            println!("{value}");
        }
        ConfigAction::Set { key, value } => {
            let mut config = config?;
            config.set(&key, &value)?;
            config.save()?;
            tracing::info!(%key, %value, "configuration updated");
            println!("{key} = {}", config.get(&key).unwrap_or(value));
        }
        ConfigAction::List => {
            println!("{}", serde_json::to_string_pretty(&config?)?);
        }
        ConfigAction::Path => {
            println!("{}", Config::path()?.display());
        }
        ConfigAction::Reset => {
            if let Err(e) = &config {
                tracing::warn!(error = %e, "replacing unreadable configuration");
            }
            Config::default().save()?;
            println!("configuration reset to defaults");
        }
    }
    Ok(())
}
