//! Database schema migrations for habit-tracker.
//!
//! Migrations are versioned and applied automatically when opening the database.
//! The `schema_version` table tracks the current migration version.

use rusqlite::{Connection, Result as SqliteResult};

/// Current schema version.
pub const SCHEMA_VERSION: i32 = 2;

/// Apply all pending migrations to bring the database to the current schema version.
///
/// # Errors
/// Returns an error if migration fails.
pub fn migrate(conn: &Connection) -> SqliteResult<()> {
    create_schema_version_table(conn)?;

    let current_version = get_schema_version(conn);

    if current_version < 1 {
        migrate_v1(conn)?;
    }
    if current_version < 2 {
        migrate_v2(conn)?;
    }

    Ok(())
}

fn create_schema_version_table(conn: &Connection) -> SqliteResult<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY
        );",
    )
}

/// Get the current schema version from the database.
///
/// Returns 0 if no version is set (initial database).
pub fn get_schema_version(conn: &Connection) -> i32 {
    conn.query_row("SELECT version FROM schema_version", [], |row| {
        row.get::<_, i32>(0)
    })
    .unwrap_or_else(|e| {
        if !matches!(e, rusqlite::Error::QueryReturnedNoRows) {
            tracing::warn!(error = %e, "failed to read schema_version");
        }
        0
    })
}

fn set_schema_version(conn: &Connection, version: i32) -> SqliteResult<()> {
    conn.execute("DELETE FROM schema_version", [])?;
    conn.execute("INSERT INTO schema_version (version) VALUES (?1)", [version])?;
    Ok(())
}

/// Migration v1: habits and completions tables.
fn migrate_v1(conn: &Connection) -> SqliteResult<()> {
    let tx = conn.unchecked_transaction()?;

    tx.execute_batch(
        "CREATE TABLE IF NOT EXISTS habits (
            id            TEXT PRIMARY KEY,
            name          TEXT NOT NULL,
            start_date    TEXT NOT NULL,
            time          TEXT NOT NULL,
            notes         TEXT NOT NULL DEFAULT '',
            selected_days TEXT NOT NULL DEFAULT '[]',
            created_at    TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS completions (
            id       TEXT PRIMARY KEY,
            habit_id TEXT NOT NULL REFERENCES habits(id) ON DELETE CASCADE,
            date     TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_completions_habit_id ON completions(habit_id);
        CREATE INDEX IF NOT EXISTS idx_habits_created_at ON habits(created_at);
        CREATE INDEX IF NOT EXISTS idx_habits_time ON habits(time);",
    )?;

    set_schema_version(&tx, 1)?;
    tx.commit()
}

/// Migration v2: one completion per habit and day.
///
/// Removes duplicate (habit_id, date) rows, keeping the lowest rowid, and
/// replaces them with a unique index.
fn migrate_v2(conn: &Connection) -> SqliteResult<()> {
    let tx = conn.unchecked_transaction()?;

    let removed = tx.execute(
        "DELETE FROM completions
         WHERE rowid NOT IN (
             SELECT MIN(rowid) FROM completions GROUP BY habit_id, date
         )",
        [],
    )?;
    if removed > 0 {
        tracing::warn!(removed, "dropped duplicate completions during migration");
    }

    tx.execute_batch(
        "CREATE UNIQUE INDEX IF NOT EXISTS idx_completions_habit_date
             ON completions(habit_id, date);",
    )?;

    set_schema_version(&tx, 2)?;
    tx.commit()
}
