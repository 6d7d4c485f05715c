//! Schedule evaluation: is a habit scheduled, or due, on a given day.
//!
//! "Scheduled" depends only on the weekday; "due" additionally requires the
//! day to be on or after the habit's start date. Neither looks at whether the
//! day lies in the future.

pub mod weekday;

use chrono::NaiveDate;

use crate::habit::Habit;

pub use weekday::{normalize_days, parse_days, weekday_code, weekday_label, weekday_letter};

/// True iff the weekday of `date` is one of the habit's selected days.
pub fn is_scheduled(habit: &Habit, date: NaiveDate) -> bool {
    habit.is_scheduled_for_day(weekday_code(date))
}

/// Scheduled on `date` and `date` is not before the habit's start date.
pub fn is_due(habit: &Habit, date: NaiveDate) -> bool {
    is_scheduled(habit, date) && date >= habit.start_date
}

/// Habits due on `date`, in input order.
pub fn due_on(habits: &[Habit], date: NaiveDate) -> Vec<&Habit> {
    habits.iter().filter(|h| is_due(h, date)).collect()
}
