//! Completion lookup by calendar day.

use std::collections::HashSet;

use chrono::NaiveDate;

use crate::habit::{Completion, Habit};

/// True iff the habit has a completion on `date`'s calendar day.
pub fn is_completed(habit: &Habit, date: NaiveDate) -> bool {
    find_completion(habit, date).is_some()
}

/// The completion recorded for `date`, if any.
pub fn find_completion(habit: &Habit, date: NaiveDate) -> Option<&Completion> {
    habit.completions.iter().find(|c| c.date == date)
}

/// Set of days the habit was completed on, for repeated lookups.
pub fn completed_days(habit: &Habit) -> HashSet<NaiveDate> {
    habit.completions.iter().map(|c| c.date).collect()
}
