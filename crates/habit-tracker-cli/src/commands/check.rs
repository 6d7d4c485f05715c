use chrono::NaiveDate;
use habit_tracker_core::{current_streak, today, Config};

use super::open_tracker;

pub fn run(
    id: &str,
    date: Option<NaiveDate>,
    config: &Config,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut tracker = open_tracker(config)?;
    let date = date.unwrap_or_else(today);

    let mut habit = tracker.habit(id)?;
    if !habit.is_due(date) {
        tracing::warn!(habit_id = %habit.id, %date, "habit is not due on this day");
    }
    let completed = tracker.toggle_completion(&mut habit, date)?;
    let streak = current_streak(&habit);

    let state = if completed { "done" } else { "not done" };
    println!("{} on {date}: {state} (streak: {streak})", habit.name);
    Ok(())
}
