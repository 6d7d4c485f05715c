//! Habit tracking operations over a [`RecordStore`].
//!
//! This is what the presentation layer talks to: creating and deleting
//! habits, toggling a day's completion, and building the daily checklist and
//! the streak board. Every mutation is one store call; on failure it is
//! logged, returned, and nothing in memory changes.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::completion::find_completion;
use crate::error::{PersistenceError, Result};
use crate::grid::ContributionGrid;
use crate::habit::{Completion, Habit, NewHabit};
use crate::schedule::is_due;
use crate::storage::{HabitSort, RecordStore, SortOrder};
use crate::streak::calculate_streak;

/// One row of the daily checklist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistEntry {
    pub habit_id: String,
    pub name: String,
    pub time: NaiveTime,
    pub has_notes: bool,
    pub completed: bool,
    /// Streak as of today, not as of the checklist date.
    pub streak: u32,
}

/// One habit on the streak board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakCard {
    pub habit_id: String,
    pub name: String,
    pub notes: String,
    pub selected_days: Vec<u8>,
    pub streak: u32,
    pub grid: ContributionGrid,
}

pub struct Tracker<S> {
    store: S,
}

impl<S: RecordStore> Tracker<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Validate and persist a new habit created now.
    ///
    /// # Errors
    /// Returns a validation error (nothing is stored) or a persistence error.
    pub fn create_habit(&mut self, draft: NewHabit) -> Result<Habit> {
        self.create_habit_at(draft, Utc::now())
    }

    /// Like [`Tracker::create_habit`] with an explicit creation timestamp.
    ///
    /// # Errors
    /// Same as [`Tracker::create_habit`].
    pub fn create_habit_at(&mut self, draft: NewHabit, created_at: DateTime<Utc>) -> Result<Habit> {
        let habit = Habit::from_draft(draft, created_at)?;
        self.store.insert_habit(&habit).inspect_err(|e| {
            tracing::error!(error = %e, name = %habit.name, "failed to save habit");
        })?;
        tracing::info!(habit_id = %habit.id, name = %habit.name, "created habit");
        Ok(habit)
    }

    /// Load one habit with its completions.
    ///
    /// # Errors
    /// [`PersistenceError::NotFound`] if no habit has this id.
    pub fn habit(&self, id: &str) -> Result<Habit> {
        self.store.get_habit(id)?.ok_or_else(|| {
            PersistenceError::NotFound {
                entity: "habit",
                id: id.to_string(),
            }
            .into()
        })
    }

    /// # Errors
    /// Returns a persistence error if the store cannot be read.
    pub fn habits(&self, sort: HabitSort, order: SortOrder) -> Result<Vec<Habit>> {
        Ok(self.store.list_habits(sort, order)?)
    }

    /// Delete a habit and its completions; returns how many completions went.
    ///
    /// # Errors
    /// Returns a persistence error, including `NotFound`.
    pub fn delete_habit(&mut self, id: &str) -> Result<usize> {
        let removed = self.store.delete_habit(id).inspect_err(|e| {
            tracing::error!(error = %e, habit_id = %id, "failed to delete habit");
        })?;
        tracing::info!(habit_id = %id, completions = removed, "deleted habit");
        Ok(removed)
    }

    /// Flip the completion state of `habit` on `date` and return the new state.
    ///
    /// `habit.completions` is updated only after the store accepted the
    /// change, so a failed save leaves the caller's view untouched.
    ///
    /// # Errors
    /// Returns the persistence error from the store.
    pub fn toggle_completion(&mut self, habit: &mut Habit, date: NaiveDate) -> Result<bool> {
        match find_completion(habit, date).map(|c| c.id.clone()) {
            Some(completion_id) => {
                self.store.delete_completion(&completion_id).inspect_err(|e| {
                    tracing::error!(error = %e, habit_id = %habit.id, %date, "failed to remove completion");
                })?;
                habit.completions.retain(|c| c.id != completion_id);
                tracing::debug!(habit_id = %habit.id, %date, "unchecked");
                Ok(false)
            }
            None => {
                let completion = Completion::new(&habit.id, date);
                self.store.insert_completion(&completion).inspect_err(|e| {
                    tracing::error!(error = %e, habit_id = %habit.id, %date, "failed to save completion");
                })?;
                habit.completions.push(completion);
                tracing::debug!(habit_id = %habit.id, %date, "checked");
                Ok(true)
            }
        }
    }

    /// Toggle by habit id, reading the current state from the store.
    ///
    /// # Errors
    /// `NotFound` for an unknown habit, otherwise the store's error.
    pub fn toggle_completion_by_id(&mut self, id: &str, date: NaiveDate) -> Result<bool> {
        let mut habit = self.habit(id)?;
        self.toggle_completion(&mut habit, date)
    }

    /// Habits due on `date`, ordered by time of day, with streaks as of `today`.
    ///
    /// # Errors
    /// Returns a persistence error if the store cannot be read.
    pub fn checklist(&self, date: NaiveDate, today: NaiveDate) -> Result<Vec<ChecklistEntry>> {
        let habits = self.store.list_habits(HabitSort::Time, SortOrder::Ascending)?;
        Ok(habits
            .iter()
            .filter(|h| is_due(h, date))
            .map(|h| ChecklistEntry {
                habit_id: h.id.clone(),
                name: h.name.clone(),
                time: h.time,
                has_notes: h.has_notes(),
                completed: h.is_completed(date),
                streak: calculate_streak(h, today),
            })
            .collect())
    }

    /// All habits in creation order with streak and contribution grid.
    ///
    /// # Errors
    /// Returns a persistence error if the store cannot be read.
    pub fn streak_board(&self, today: NaiveDate, weeks: u32) -> Result<Vec<StreakCard>> {
        let habits = self.store.list_habits(HabitSort::CreatedAt, SortOrder::Ascending)?;
        Ok(habits
            .iter()
            .map(|h| StreakCard {
                habit_id: h.id.clone(),
                name: h.name.clone(),
                notes: h.notes.clone(),
                selected_days: h.selected_days.clone(),
                streak: calculate_streak(h, today),
                grid: ContributionGrid::build(h, today, weeks),
            })
            .collect())
    }
}
