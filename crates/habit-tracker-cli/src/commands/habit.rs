//! Habit management commands for CLI.

use chrono::{NaiveDate, NaiveTime};
use clap::{Subcommand, ValueEnum};
use habit_tracker_core::{parse_days, today, Config, HabitSort, NewHabit, SortOrder};

use super::{open_tracker, parse_date, parse_time};

#[derive(Clone, Copy, ValueEnum)]
pub enum SortKey {
    /// Creation time
    Created,
    /// Time of day
    Time,
}

impl From<SortKey> for HabitSort {
    fn from(key: SortKey) -> Self {
        match key {
            SortKey::Created => HabitSort::CreatedAt,
            SortKey::Time => HabitSort::Time,
        }
    }
}

#[derive(Subcommand)]
pub enum HabitAction {
    /// Create a new habit
    Add {
        /// Habit name
        name: String,
        /// Days of week, e.g. "mon,wed,fri", "1,3,5", "weekdays" or "daily"
        #[arg(long)]
        days: String,
        /// Start date as YYYY-MM-DD (default: today)
        #[arg(long, value_parser = parse_date)]
        start: Option<NaiveDate>,
        /// Time of day as HH:MM (default: 09:00)
        #[arg(long, value_parser = parse_time)]
        time: Option<NaiveTime>,
        /// Free-text notes
        #[arg(long, default_value = "")]
        notes: String,
    },
    /// List all habits
    List {
        /// Sort key (default: created)
        #[arg(long, value_enum, default_value = "created")]
        sort: SortKey,
        /// Newest / latest first
        #[arg(long)]
        desc: bool,
    },
    /// Get habit details
    Show {
        /// Habit ID
        id: String,
    },
    /// Delete a habit and all of its completions
    Delete {
        /// Habit ID
        id: String,
    },
}

pub fn run(action: HabitAction, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let mut tracker = open_tracker(config)?;

    match action {
        HabitAction::Add {
            name,
            days,
            start,
            time,
            notes,
        } => {
            let draft = NewHabit {
                name,
                start_date: start.unwrap_or_else(today),
                time: time.unwrap_or(NaiveTime::from_hms_opt(9, 0, 0).ok_or("invalid default time")?),
                notes,
                selected_days: parse_days(&days)?,
            };
            let habit = tracker.create_habit(draft)?;
            println!("Habit created: {}", habit.id);
            println!("{}", serde_json::to_string_pretty(&habit)?);
        }
        HabitAction::List { sort, desc } => {
            let order = if desc {
                SortOrder::Descending
            } else {
                SortOrder::Ascending
            };
            let habits = tracker.habits(sort.into(), order)?;
            println!("{}", serde_json::to_string_pretty(&habits)?);
        }
        HabitAction::Show { id } => {
            let habit = tracker.habit(&id)?;
            println!("{}", serde_json::to_string_pretty(&habit)?);
        }
        HabitAction::Delete { id } => {
            let removed = tracker.delete_habit(&id)?;
            println!("Habit deleted: {id} ({removed} completions removed)");
        }
    }
    Ok(())
}
