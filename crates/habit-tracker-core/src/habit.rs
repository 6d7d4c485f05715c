//! Habit and completion entities.
//!
//! A [`Habit`] owns its [`Completion`] records; a completion only carries the
//! owning habit's id as a lookup key. All dates are calendar days
//! ([`NaiveDate`]), so day equality never depends on time-of-day.

use chrono::{DateTime, Local, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::completion;
use crate::error::ValidationError;
use crate::schedule::{self, normalize_days};
use crate::streak;

/// Calendar day of a timestamp in its own time zone (time-of-day dropped).
pub fn calendar_day<Tz: TimeZone>(at: &DateTime<Tz>) -> NaiveDate {
    at.date_naive()
}

/// Today's calendar day in the local time zone.
pub fn today() -> NaiveDate {
    calendar_day(&Local::now())
}

/// A record that a habit was performed on a specific calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Completion {
    pub id: String,
    pub habit_id: String,
    pub date: NaiveDate,
}

impl Completion {
    pub fn new(habit_id: &str, date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            habit_id: habit_id.to_string(),
            date,
        }
    }
}

/// A recurring activity definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Habit {
    pub id: String,
    pub name: String,
    pub start_date: NaiveDate,
    /// Display/sort only; plays no part in scheduling.
    pub time: NaiveTime,
    pub notes: String,
    /// Weekday codes, 0=Sun ... 6=Sat, sorted and unique.
    pub selected_days: Vec<u8>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub completions: Vec<Completion>,
}

/// Unvalidated input for a new habit, as filled in by the creation form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewHabit {
    pub name: String,
    pub start_date: NaiveDate,
    pub time: NaiveTime,
    #[serde(default)]
    pub notes: String,
    pub selected_days: Vec<u8>,
}

impl NewHabit {
    /// Check the draft without consuming it.
    ///
    /// # Errors
    /// Returns [`ValidationError::EmptyName`] for a blank name,
    /// [`ValidationError::NoDaysSelected`] for an empty day set, and
    /// [`ValidationError::InvalidWeekday`] for codes outside 0..=6.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }
        normalize_days(&self.selected_days).map(|_| ())
    }
}

impl Habit {
    /// Build a habit from a validated draft, assigning a fresh id.
    ///
    /// # Errors
    /// Returns the first [`ValidationError`] the draft fails on.
    pub fn from_draft(draft: NewHabit, created_at: DateTime<Utc>) -> Result<Self, ValidationError> {
        draft.validate()?;
        let selected_days = normalize_days(&draft.selected_days)?;

        Ok(Self {
            id: Uuid::new_v4().to_string(),
            name: draft.name,
            start_date: draft.start_date,
            time: draft.time,
            notes: draft.notes,
            selected_days,
            created_at,
            completions: Vec::new(),
        })
    }

    pub fn is_scheduled_for_day(&self, weekday_code: u8) -> bool {
        self.selected_days.contains(&weekday_code)
    }

    pub fn is_scheduled(&self, date: NaiveDate) -> bool {
        schedule::is_scheduled(self, date)
    }

    pub fn is_due(&self, date: NaiveDate) -> bool {
        schedule::is_due(self, date)
    }

    pub fn is_completed(&self, date: NaiveDate) -> bool {
        completion::is_completed(self, date)
    }

    /// Streak as of `as_of`; see [`streak::calculate_streak`].
    pub fn streak(&self, as_of: NaiveDate) -> u32 {
        streak::calculate_streak(self, as_of)
    }

    pub fn has_notes(&self) -> bool {
        !self.notes.is_empty()
    }
}
