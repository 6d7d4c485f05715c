//! TOML-based application configuration.
//!
//! Stores user preferences including:
//! - Database file location
//! - Contribution grid width
//! - Checklist display options
//! - Log filter
//!
//! Configuration is stored at `~/.config/habit-tracker/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::error::ConfigError;
use crate::grid::{DEFAULT_WEEKS, MAX_GRID_WEEKS};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Database file; relative paths resolve against the data directory.
    #[serde(default = "default_database_file")]
    pub database_file: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridConfig {
    #[serde(default = "default_weeks")]
    pub weeks: u32,
    #[serde(default = "default_true")]
    pub show_notes: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChecklistConfig {
    #[serde(default = "default_true")]
    pub show_streak: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive used when HABIT_TRACKER_LOG is unset.
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/habit-tracker/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub grid: GridConfig,
    #[serde(default)]
    pub checklist: ChecklistConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_database_file() -> String {
    "habits.db".into()
}
fn default_weeks() -> u32 {
    DEFAULT_WEEKS
}
fn default_true() -> bool {
    true
}
fn default_log_filter() -> String {
    "warn".into()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_file: default_database_file(),
        }
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            weeks: DEFAULT_WEEKS,
            show_notes: true,
        }
    }
}

impl Default for ChecklistConfig {
    fn default() -> Self {
        Self { show_streak: true }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if parts.peek().map_or(true, |p| p.is_empty()) {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            if parts.peek().is_none() {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value
                            .parse::<bool>()
                            .map_err(|e| invalid(e.to_string()))?,
                    ),
                    serde_json::Value::Number(_) => serde_json::Value::Number(
                        value
                            .parse::<u64>()
                            .map_err(|_| invalid(format!("cannot parse '{value}' as number")))?
                            .into(),
                    ),
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        return Err(invalid("cannot set a whole section".to_string()));
                    }
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    /// Path of `config.toml` in the data directory.
    ///
    /// # Errors
    /// Returns an error if the data directory cannot be created.
    pub fn path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Check value ranges.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidValue`] for out-of-range settings.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid.weeks == 0 || self.grid.weeks > MAX_GRID_WEEKS {
            return Err(ConfigError::InvalidValue {
                key: "grid.weeks".to_string(),
                message: format!("must be between 1 and {MAX_GRID_WEEKS}"),
            });
        }
        if self.storage.database_file.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "storage.database_file".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Load from disk or return default.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    /// Load from `path`, writing the defaults there if the file is missing.
    ///
    /// # Errors
    ///
    /// Same as [`Config::load`].
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let cfg: Config = toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })?;
                cfg.validate()?;
                Ok(cfg)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
            Err(e) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
        }
    }

    /// Persist to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    /// Persist to `path`.
    ///
    /// # Errors
    ///
    /// Same as [`Config::save`].
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by key without saving.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value is invalid for it.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };
        let mut json = serde_json::to_value(&*self).map_err(|e| invalid(e.to_string()))?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config = serde_json::from_value(json).map_err(|e| invalid(e.to_string()))?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    /// Resolved database file path.
    ///
    /// # Errors
    /// Returns an error if a relative path is configured and the data
    /// directory cannot be created.
    pub fn database_path(&self) -> Result<PathBuf, ConfigError> {
        let file = Path::new(&self.storage.database_file);
        if file.is_absolute() {
            Ok(file.to_path_buf())
        } else {
            Ok(data_dir()?.join(file))
        }
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.grid.weeks, 53);
        assert_eq!(parsed.storage.database_file, "habits.db");
        assert_eq!(parsed.logging.filter, "warn");
    }

    #[test]
    fn partial_file_uses_defaults() {
        let parsed: Config = toml::from_str("[grid]\nweeks = 12\n").unwrap();
        assert_eq!(parsed.grid.weeks, 12);
        assert!(parsed.grid.show_notes);
        assert!(parsed.checklist.show_streak);
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("grid.weeks").as_deref(), Some("53"));
        assert_eq!(cfg.get("checklist.show_streak").as_deref(), Some("true"));
        assert_eq!(cfg.get("storage.database_file").as_deref(), Some("habits.db"));
        assert!(cfg.get("grid.missing_key").is_none());
        assert!(cfg.get("").is_none());
    }

    #[test]
    fn set_updates_values() {
        let mut cfg = Config::default();
        cfg.set("grid.weeks", "26").unwrap();
        cfg.set("grid.show_notes", "false").unwrap();
        cfg.set("logging.filter", "habit_tracker_core=debug").unwrap();
        assert_eq!(cfg.grid.weeks, 26);
        assert!(!cfg.grid.show_notes);
        assert_eq!(cfg.logging.filter, "habit_tracker_core=debug");
    }

    #[test]
    fn set_rejects_unknown_key() {
        let mut cfg = Config::default();
        assert!(matches!(
            cfg.set("grid.nonexistent_key", "1"),
            Err(ConfigError::UnknownKey(_))
        ));
        assert!(matches!(cfg.set("grid", "1"), Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn set_rejects_invalid_type_and_range() {
        let mut cfg = Config::default();
        assert!(cfg.set("grid.show_notes", "not_a_bool").is_err());
        assert!(cfg.set("grid.weeks", "many").is_err());
        assert!(cfg.set("grid.weeks", "0").is_err());
        assert!(cfg.set("grid.weeks", "1000").is_err());
        assert_eq!(cfg.grid.weeks, 53);
    }

    #[test]
    fn load_from_creates_default_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");

        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg.grid.weeks, 53);
        assert!(path.exists());

        let mut changed = cfg.clone();
        changed.set("grid.weeks", "10").unwrap();
        changed.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap().grid.weeks, 10);
    }

    #[test]
    fn load_from_rejects_garbage() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "grid = [").unwrap();
        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::LoadFailed { .. })
        ));
    }

    #[test]
    fn absolute_database_path_is_kept() {
        let dir = TempDir::new().unwrap();
        let db = dir.path().join("custom.db");
        let mut cfg = Config::default();
        cfg.storage.database_file = db.to_string_lossy().into_owned();
        assert_eq!(cfg.database_path().unwrap(), db);
    }
}
