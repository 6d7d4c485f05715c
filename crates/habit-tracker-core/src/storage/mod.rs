mod config;
pub mod database;
pub mod memory;
pub mod migrations;

pub use config::{ChecklistConfig, Config, GridConfig, LoggingConfig, StorageConfig};
pub use database::HabitDb;
pub use memory::MemoryStore;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, PersistenceError};
use crate::habit::{Completion, Habit};

/// Sort key for habit listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HabitSort {
    /// Creation time; the streak board ordering.
    #[default]
    CreatedAt,
    /// Time of day; the daily checklist ordering.
    Time,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

/// Durable storage for habits and their completions.
///
/// Every mutating call is atomic and persisted when it returns `Ok`.
/// Deleting a habit deletes its completions.
pub trait RecordStore {
    fn insert_habit(&mut self, habit: &Habit) -> Result<(), PersistenceError>;

    /// Load a habit together with its completions.
    fn get_habit(&self, id: &str) -> Result<Option<Habit>, PersistenceError>;

    fn list_habits(&self, sort: HabitSort, order: SortOrder)
        -> Result<Vec<Habit>, PersistenceError>;

    /// Delete a habit and all of its completions.
    ///
    /// Returns the number of completions removed, or
    /// [`PersistenceError::NotFound`] if the habit does not exist.
    fn delete_habit(&mut self, id: &str) -> Result<usize, PersistenceError>;

    /// Insert a completion for an existing habit.
    fn insert_completion(&mut self, completion: &Completion) -> Result<(), PersistenceError>;

    fn delete_completion(&mut self, id: &str) -> Result<(), PersistenceError>;

    /// Total completion records across all habits.
    fn completion_count(&self) -> Result<usize, PersistenceError>;
}

/// Returns `~/.config/habit-tracker[-dev]/` based on HABIT_TRACKER_ENV.
///
/// Set HABIT_TRACKER_ENV=dev to use the development data directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("HABIT_TRACKER_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("habit-tracker-dev")
    } else {
        base_dir.join("habit-tracker")
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| ConfigError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
