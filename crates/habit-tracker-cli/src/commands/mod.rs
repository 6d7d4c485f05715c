pub mod check;
pub mod config;
pub mod habit;
pub mod streaks;
pub mod today;

use chrono::{NaiveDate, NaiveTime};
use habit_tracker_core::{Config, HabitDb, Tracker};

/// Open the configured database.
pub fn open_tracker(config: &Config) -> Result<Tracker<HabitDb>, Box<dyn std::error::Error>> {
    let path = config.database_path()?;
    Ok(Tracker::new(HabitDb::open_at(&path)?))
}

pub fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| format!("expected YYYY-MM-DD: {e}"))
}

pub fn parse_time(s: &str) -> Result<NaiveTime, String> {
    NaiveTime::parse_from_str(s, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
        .map_err(|e| format!("expected HH:MM: {e}"))
}
