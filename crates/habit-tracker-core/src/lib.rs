//! # Habit Tracker Core Library
//!
//! Core logic for a personal habit tracker: recurring habits scheduled by
//! weekday, one completion per habit and calendar day, streaks and a
//! contribution grid derived from them. The CLI binary is a thin layer over
//! this crate.
//!
//! ## Architecture
//!
//! - **Model**: [`Habit`] owns its [`Completion`]s; all days are
//!   [`chrono::NaiveDate`] calendar days
//! - **Derived views**: schedule evaluation, completion lookup, streak
//!   calculation and the contribution grid are free functions over `&Habit`
//! - **Storage**: the [`RecordStore`] contract, backed by SQLite
//!   ([`HabitDb`]) or memory ([`MemoryStore`]), and TOML configuration
//! - **Tracker**: [`Tracker`] combines the two for the presentation layer
//!
//! ## Key Components
//!
//! - [`calculate_streak`]: backward walk from a reference day
//! - [`ContributionGrid`]: week-by-weekday classification of past days
//! - [`Tracker`]: create/delete habits, toggle completions, checklists

pub mod completion;
pub mod error;
pub mod grid;
pub mod habit;
pub mod schedule;
pub mod storage;
pub mod streak;
pub mod tracker;

pub use completion::{find_completion, is_completed};
pub use error::{ConfigError, CoreError, PersistenceError, ValidationError};
pub use grid::{
    classify_cell, CellState, ContributionGrid, GridCell, GridSummary, DEFAULT_WEEKS, MAX_GRID_WEEKS,
};
pub use habit::{calendar_day, today, Completion, Habit, NewHabit};
pub use schedule::{
    due_on, is_due, is_scheduled, parse_days, weekday_code, weekday_label, weekday_letter,
};
pub use storage::{Config, HabitDb, HabitSort, MemoryStore, RecordStore, SortOrder};
pub use streak::{calculate_streak, current_streak};
pub use tracker::{ChecklistEntry, StreakCard, Tracker};
