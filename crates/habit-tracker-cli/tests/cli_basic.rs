//! Basic CLI E2E tests.
//!
//! Each test runs the built binary against its own temporary home directory.

use std::path::Path;
use std::process::Command;

use tempfile::TempDir;

/// Run a CLI command and return (exit code, stdout, stderr).
fn run_cli(home: &Path, args: &[&str]) -> (i32, String, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_habit-tracker-cli"))
        .args(args)
        .env("HOME", home)
        .env_remove("HABIT_TRACKER_ENV")
        .env_remove("HABIT_TRACKER_LOG")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (code, stdout, stderr)
}

fn add_daily(home: &Path, name: &str) -> String {
    let (code, stdout, stderr) = run_cli(
        home,
        &["habit", "add", name, "--days", "daily", "--start", "2026-10-01"],
    );
    assert_eq!(code, 0, "habit add failed: {stderr}");
    let first = stdout.lines().next().unwrap();
    first
        .strip_prefix("Habit created: ")
        .expect("missing created line")
        .to_string()
}

#[test]
fn test_habit_add_and_list() {
    let home = TempDir::new().unwrap();
    let id = add_daily(home.path(), "Stretch");

    let (code, stdout, _) = run_cli(home.path(), &["habit", "list"]);
    assert_eq!(code, 0);
    let habits: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let habits = habits.as_array().unwrap();
    assert_eq!(habits.len(), 1);
    assert_eq!(habits[0]["id"], id.as_str());
    assert_eq!(habits[0]["name"], "Stretch");
}

#[test]
fn test_habit_add_rejects_blank_name() {
    let home = TempDir::new().unwrap();
    let (code, _, stderr) = run_cli(home.path(), &["habit", "add", "   ", "--days", "mon"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("Please enter a habit name."));
}

#[test]
fn test_check_toggles_completion() {
    let home = TempDir::new().unwrap();
    let id = add_daily(home.path(), "Journal");

    let (code, stdout, _) = run_cli(home.path(), &["check", &id, "--date", "2026-10-05"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("Journal on 2026-10-05: done"));

    let (code, stdout, _) = run_cli(home.path(), &["check", &id, "--date", "2026-10-05"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("Journal on 2026-10-05: not done"));
}

#[test]
fn test_today_json() {
    let home = TempDir::new().unwrap();
    let id = add_daily(home.path(), "Water plants");

    let (code, stdout, _) = run_cli(home.path(), &["today", "--date", "2026-10-05", "--json"]);
    assert_eq!(code, 0);
    let checklist: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(checklist["date"], "2026-10-05");
    assert_eq!(checklist["habits"][0]["habit_id"], id.as_str());
    assert_eq!(checklist["habits"][0]["completed"], false);
}

#[test]
fn test_habit_delete() {
    let home = TempDir::new().unwrap();
    let id = add_daily(home.path(), "Walk");
    run_cli(home.path(), &["check", &id, "--date", "2026-10-02"]);

    let (code, stdout, _) = run_cli(home.path(), &["habit", "delete", &id]);
    assert_eq!(code, 0);
    assert!(stdout.contains("1 completions removed"));

    let (code, _, _) = run_cli(home.path(), &["habit", "show", &id]);
    assert_eq!(code, 1);
}

#[test]
fn test_config_set_and_get() {
    let home = TempDir::new().unwrap();
    let (code, _, _) = run_cli(home.path(), &["config", "set", "grid.weeks", "12"]);
    assert_eq!(code, 0);

    let (code, stdout, _) = run_cli(home.path(), &["config", "get", "grid.weeks"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "12");

    let (code, _, _) = run_cli(home.path(), &["config", "set", "grid.weeks", "0"]);
    assert_eq!(code, 1);
}

fn write_config(home: &Path, content: &str) {
    let dir = home.join(".config").join("habit-tracker");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("config.toml"), content).unwrap();
}

#[test]
fn test_invalid_config_is_reported() {
    let home = TempDir::new().unwrap();
    let custom_db = home.path().join("mine.db");
    write_config(
        home.path(),
        &format!(
            "[storage]\ndatabase_file = '{}'\n\n[grid]\nweeks = 0\n",
            custom_db.display()
        ),
    );

    let (code, stdout, stderr) = run_cli(home.path(), &["habit", "add", "X", "--days", "daily"]);
    assert_eq!(code, 1);
    assert!(stdout.is_empty());
    assert!(stderr.starts_with("error: "), "stderr: {stderr}");
    assert!(stderr.contains("grid.weeks"), "stderr: {stderr}");

    let default_db = home.path().join(".config").join("habit-tracker").join("habits.db");
    assert!(!custom_db.exists());
    assert!(!default_db.exists());
}

#[test]
fn test_unparsable_config_can_be_reset() {
    let home = TempDir::new().unwrap();
    write_config(home.path(), "[grid\nweeks = ");

    let (code, _, stderr) = run_cli(home.path(), &["habit", "list"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("Failed to load configuration"), "stderr: {stderr}");

    let (code, _, _) = run_cli(home.path(), &["config", "reset"]);
    assert_eq!(code, 0);

    let (code, stdout, _) = run_cli(home.path(), &["habit", "list"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "[]");
}

#[test]
fn test_config_get_unknown_key() {
    let home = TempDir::new().unwrap();
    let (code, _, stderr) = run_cli(home.path(), &["config", "get", "grid.nope"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("Unknown configuration key: grid.nope"));
}

#[test]
fn test_streaks_weeks_out_of_range() {
    let home = TempDir::new().unwrap();
    add_daily(home.path(), "Read");

    for weeks in ["0", "261", "4000000000"] {
        let (code, _, stderr) = run_cli(home.path(), &["streaks", "--weeks", weeks]);
        assert_eq!(code, 2, "weeks={weeks} stderr: {stderr}");
        assert!(!stderr.contains("panicked"));
    }

    let (code, stdout, _) = run_cli(home.path(), &["streaks", "--weeks", "260", "--json"]);
    assert_eq!(code, 0);
    let board: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(board[0]["grid"]["weeks"].as_array().unwrap().len(), 260);
}

#[test]
fn test_completions() {
    let home = TempDir::new().unwrap();
    let (code, stdout, _) = run_cli(home.path(), &["completions", "bash"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("habit-tracker-cli"));
}
