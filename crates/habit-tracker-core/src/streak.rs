//! Consecutive-completion streaks.
//!
//! The walk starts at the reference day and moves back one calendar day at a
//! time. Unscheduled days are skipped, completed scheduled days extend the
//! streak, and the first scheduled day without a completion ends it. The
//! reference day itself gets no grace: if it is scheduled and not yet
//! completed the streak is 0.

use chrono::NaiveDate;

use crate::completion::completed_days;
use crate::habit::{today, Habit};
use crate::schedule::is_scheduled;

/// Streak of `habit` as of the calendar day `as_of`.
///
/// Stops when the cursor passes `habit.start_date`, so a habit starting after
/// `as_of` always yields 0. Runs in O(days since start + completions).
pub fn calculate_streak(habit: &Habit, as_of: NaiveDate) -> u32 {
    let done = completed_days(habit);
    let mut streak = 0;
    let mut cursor = as_of;

    while cursor >= habit.start_date {
        if is_scheduled(habit, cursor) {
            if done.contains(&cursor) {
                streak += 1;
            } else {
                break;
            }
        }

        match cursor.pred_opt() {
            Some(previous) => cursor = previous,
            None => break,
        }
    }

    streak
}

/// Streak as of today's local calendar day.
pub fn current_streak(habit: &Habit) -> u32 {
    calculate_streak(habit, today())
}
