//! SQLite-based habit storage.
//!
//! Provides persistent storage for:
//! - Habits (schedule, start date, reminder time, notes)
//! - Completions, one row per habit and calendar day

use std::collections::HashMap;
use std::path::Path;

use chrono::{DateTime, NaiveDate, NaiveTime, SecondsFormat, Utc};
use rusqlite::{params, Connection, OptionalExtension};

use super::migrations;
use super::{HabitSort, RecordStore, SortOrder};
use crate::error::PersistenceError;
use crate::habit::{Completion, Habit};

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M:%S";

fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

fn format_time(time: NaiveTime) -> String {
    time.format(TIME_FORMAT).to_string()
}

/// Fixed-width RFC 3339 so that text ordering matches time ordering.
fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn corrupt(entity: &'static str, id: &str, message: impl ToString) -> PersistenceError {
    PersistenceError::CorruptRecord {
        entity,
        id: id.to_string(),
        message: message.to_string(),
    }
}

/// Raw `habits` row, decoded after the statement finishes.
struct HabitRow {
    id: String,
    name: String,
    start_date: String,
    time: String,
    notes: String,
    selected_days: String,
    created_at: String,
}

impl HabitRow {
    const COLUMNS: &'static str = "id, name, start_date, time, notes, selected_days, created_at";

    fn from_row(row: &rusqlite::Row) -> Result<Self, rusqlite::Error> {
        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
            start_date: row.get(2)?,
            time: row.get(3)?,
            notes: row.get(4)?,
            selected_days: row.get(5)?,
            created_at: row.get(6)?,
        })
    }

    fn into_habit(self, completions: Vec<Completion>) -> Result<Habit, PersistenceError> {
        let start_date = NaiveDate::parse_from_str(&self.start_date, DATE_FORMAT)
            .map_err(|e| corrupt("habit", &self.id, e))?;
        let time = NaiveTime::parse_from_str(&self.time, TIME_FORMAT)
            .map_err(|e| corrupt("habit", &self.id, e))?;
        let selected_days: Vec<u8> = serde_json::from_str(&self.selected_days)
            .map_err(|e| corrupt("habit", &self.id, e))?;
        let created_at = DateTime::parse_from_rfc3339(&self.created_at)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| corrupt("habit", &self.id, e))?;

        Ok(Habit {
            id: self.id,
            name: self.name,
            start_date,
            time,
            notes: self.notes,
            selected_days,
            created_at,
            completions,
        })
    }
}

fn row_to_completion(row: &rusqlite::Row) -> Result<(String, String, String), rusqlite::Error> {
    Ok((row.get(0)?, row.get(1)?, row.get(2)?))
}

fn decode_completion(
    (id, habit_id, date): (String, String, String),
) -> Result<Completion, PersistenceError> {
    let date =
        NaiveDate::parse_from_str(&date, DATE_FORMAT).map_err(|e| corrupt("completion", &id, e))?;
    Ok(Completion { id, habit_id, date })
}

/// SQLite database for habit storage.
pub struct HabitDb {
    conn: Connection,
}

impl HabitDb {
    /// Get a reference to the underlying SQLite connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Open (or create) the database file at `path` and migrate it.
    ///
    /// # Errors
    /// Returns [`PersistenceError::OpenFailed`] if the file cannot be opened,
    /// or [`PersistenceError::MigrationFailed`] if the schema cannot be applied.
    pub fn open_at(path: &Path) -> Result<Self, PersistenceError> {
        let conn = Connection::open(path).map_err(|source| PersistenceError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "opened habit database");
        Self::init(conn)
    }

    /// Open an in-memory database.
    ///
    /// # Errors
    /// Returns an error if SQLite cannot allocate the database or migrate it.
    pub fn open_memory() -> Result<Self, PersistenceError> {
        let conn = Connection::open_in_memory()?;
        Self::init(conn)
    }

    fn init(conn: Connection) -> Result<Self, PersistenceError> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        migrations::migrate(&conn).map_err(|e| PersistenceError::MigrationFailed(e.to_string()))?;
        Ok(Self { conn })
    }

    fn load_completions(&self, habit_id: &str) -> Result<Vec<Completion>, PersistenceError> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, habit_id, date FROM completions WHERE habit_id = ?1 ORDER BY date")?;
        let rows = stmt
            .query_map(params![habit_id], row_to_completion)?
            .collect::<Result<Vec<_>, _>>()?;
        rows.into_iter().map(decode_completion).collect()
    }

    fn load_all_completions(&self) -> Result<HashMap<String, Vec<Completion>>, PersistenceError> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, habit_id, date FROM completions ORDER BY date")?;
        let rows = stmt
            .query_map([], row_to_completion)?
            .collect::<Result<Vec<_>, _>>()?;

        let mut by_habit: HashMap<String, Vec<Completion>> = HashMap::new();
        for row in rows {
            let completion = decode_completion(row)?;
            by_habit
                .entry(completion.habit_id.clone())
                .or_default()
                .push(completion);
        }
        Ok(by_habit)
    }

    fn habit_exists(&self, id: &str) -> Result<bool, PersistenceError> {
        let found = self
            .conn
            .query_row("SELECT 1 FROM habits WHERE id = ?1", params![id], |_| Ok(()))
            .optional()?;
        Ok(found.is_some())
    }
}

impl RecordStore for HabitDb {
    fn insert_habit(&mut self, habit: &Habit) -> Result<(), PersistenceError> {
        let days = serde_json::to_string(&habit.selected_days)
            .map_err(|e| PersistenceError::QueryFailed(e.to_string()))?;

        let tx = self.conn.transaction()?;
        tx.execute(
            "INSERT INTO habits (id, name, start_date, time, notes, selected_days, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                habit.id,
                habit.name,
                format_date(habit.start_date),
                format_time(habit.time),
                habit.notes,
                days,
                format_timestamp(habit.created_at),
            ],
        )?;
        for completion in &habit.completions {
            tx.execute(
                "INSERT INTO completions (id, habit_id, date) VALUES (?1, ?2, ?3)",
                params![completion.id, habit.id, format_date(completion.date)],
            )?;
        }
        tx.commit()?;

        tracing::debug!(habit_id = %habit.id, "inserted habit");
        Ok(())
    }

    fn get_habit(&self, id: &str) -> Result<Option<Habit>, PersistenceError> {
        let row = self
            .conn
            .query_row(
                &format!("SELECT {} FROM habits WHERE id = ?1", HabitRow::COLUMNS),
                params![id],
                HabitRow::from_row,
            )
            .optional()?;

        match row {
            Some(row) => {
                let completions = self.load_completions(id)?;
                row.into_habit(completions).map(Some)
            }
            None => Ok(None),
        }
    }

    fn list_habits(
        &self,
        sort: HabitSort,
        order: SortOrder,
    ) -> Result<Vec<Habit>, PersistenceError> {
        let direction = match order {
            SortOrder::Ascending => "ASC",
            SortOrder::Descending => "DESC",
        };
        let order_by = match sort {
            HabitSort::CreatedAt => format!("created_at {direction}, id {direction}"),
            HabitSort::Time => format!("time {direction}, created_at {direction}, id {direction}"),
        };

        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM habits ORDER BY {order_by}",
            HabitRow::COLUMNS
        ))?;
        let rows = stmt
            .query_map([], HabitRow::from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        let mut completions = self.load_all_completions()?;
        rows.into_iter()
            .map(|row| {
                let owned = completions.remove(&row.id).unwrap_or_default();
                row.into_habit(owned)
            })
            .collect()
    }

    fn delete_habit(&mut self, id: &str) -> Result<usize, PersistenceError> {
        let tx = self.conn.transaction()?;
        let removed = tx.execute("DELETE FROM completions WHERE habit_id = ?1", params![id])?;
        let deleted = tx.execute("DELETE FROM habits WHERE id = ?1", params![id])?;
        if deleted == 0 {
            // Dropping the transaction rolls it back.
            return Err(PersistenceError::NotFound {
                entity: "habit",
                id: id.to_string(),
            });
        }
        tx.commit()?;

        tracing::debug!(habit_id = %id, completions = removed, "deleted habit");
        Ok(removed)
    }

    fn insert_completion(&mut self, completion: &Completion) -> Result<(), PersistenceError> {
        if !self.habit_exists(&completion.habit_id)? {
            return Err(PersistenceError::NotFound {
                entity: "habit",
                id: completion.habit_id.clone(),
            });
        }

        self.conn.execute(
            "INSERT INTO completions (id, habit_id, date) VALUES (?1, ?2, ?3)",
            params![
                completion.id,
                completion.habit_id,
                format_date(completion.date)
            ],
        )?;
        tracing::debug!(habit_id = %completion.habit_id, date = %completion.date, "inserted completion");
        Ok(())
    }

    fn delete_completion(&mut self, id: &str) -> Result<(), PersistenceError> {
        let deleted = self
            .conn
            .execute("DELETE FROM completions WHERE id = ?1", params![id])?;
        if deleted == 0 {
            return Err(PersistenceError::NotFound {
                entity: "completion",
                id: id.to_string(),
            });
        }
        tracing::debug!(completion_id = %id, "deleted completion");
        Ok(())
    }

    fn completion_count(&self) -> Result<usize, PersistenceError> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM completions", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}
