//! Core error types for habit-tracker-core.
//!
//! Validation failures block record creation, persistence failures come from
//! the record store, and configuration failures from `config.toml`.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for habit-tracker-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Record store errors
    #[error("Persistence error: {0}")]
    Persistence(#[from] PersistenceError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

/// Record store errors.
#[derive(Error, Debug)]
pub enum PersistenceError {
    /// Failed to open database connection
    #[error("Failed to open database at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Migration failed
    #[error("Database migration failed: {0}")]
    MigrationFailed(String),

    /// Database is locked
    #[error("Database is locked")]
    Locked,

    /// The referenced record does not exist
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// A stored row could not be decoded
    #[error("Corrupt {entity} record {id}: {message}")]
    CorruptRecord {
        entity: &'static str,
        id: String,
        message: String,
    },
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown configuration key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Data directory could not be determined or created
    #[error("Data directory unavailable: {0}")]
    DataDir(String),
}

/// Validation errors raised while building a habit.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter a habit name.")]
    EmptyName,

    #[error("Please select at least one day.")]
    NoDaysSelected,

    #[error("Weekday code {0} is out of range (expected 0=Sunday..6=Saturday)")]
    InvalidWeekday(u8),

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

impl From<rusqlite::Error> for PersistenceError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(e, _msg)
                if matches!(
                    e.code,
                    rusqlite::ErrorCode::DatabaseLocked | rusqlite::ErrorCode::DatabaseBusy
                ) =>
            {
                PersistenceError::Locked
            }
            _ => PersistenceError::QueryFailed(err.to_string()),
        }
    }
}

impl From<rusqlite::Error> for CoreError {
    fn from(err: rusqlite::Error) -> Self {
        CoreError::Persistence(err.into())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_messages_are_user_facing() {
        assert_eq!(
            ValidationError::EmptyName.to_string(),
            "Please enter a habit name."
        );
        assert_eq!(
            ValidationError::NoDaysSelected.to_string(),
            "Please select at least one day."
        );
    }

    #[test]
    fn no_rows_maps_to_query_failed() {
        let err: PersistenceError = rusqlite::Error::QueryReturnedNoRows.into();
        assert!(matches!(err, PersistenceError::QueryFailed(_)));
    }

    #[test]
    fn core_error_wraps_persistence() {
        let err: CoreError = PersistenceError::NotFound {
            entity: "habit",
            id: "h1".into(),
        }
        .into();
        assert_eq!(err.to_string(), "Persistence error: habit not found: h1");
    }

    #[test]
    fn core_error_wraps_config_and_validation() {
        let err: CoreError = ConfigError::UnknownKey("grid.nope".into()).into();
        assert_eq!(
            err.to_string(),
            "Configuration error: Unknown configuration key: grid.nope"
        );

        let err: CoreError = ValidationError::EmptyName.into();
        assert!(matches!(err, CoreError::Validation(ValidationError::EmptyName)));
    }
}
