use chrono::NaiveDate;
use habit_tracker_core::{today, ChecklistEntry, Config};
use serde::Serialize;

use super::open_tracker;

#[derive(Serialize)]
struct Checklist<'a> {
    date: NaiveDate,
    habits: &'a [ChecklistEntry],
}

pub fn run(
    date: Option<NaiveDate>,
    json: bool,
    config: &Config,
) -> Result<(), Box<dyn std::error::Error>> {
    let tracker = open_tracker(config)?;
    let today = today();
    let date = date.unwrap_or(today);
    let entries = tracker.checklist(date, today)?;

    if json {
        let checklist = Checklist {
            date,
            habits: &entries,
        };
        println!("{}", serde_json::to_string_pretty(&checklist)?);
        return Ok(());
    }

    println!("{}", date.format("%A, %b %-d"));
    if entries.is_empty() {
        println!("No habits due. Enjoy your free day or add habits for this day of the week!");
        return Ok(());
    }
    for entry in &entries {
        println!("{}", render_entry(entry, config.checklist.show_streak));
    }
    Ok(())
}

fn render_entry(entry: &ChecklistEntry, show_streak: bool) -> String {
    let mark = if entry.completed { "[x]" } else { "[ ]" };
    let mut line = format!("{mark} {} {}", entry.time.format("%H:%M"), entry.name);
    if entry.has_notes {
        line.push_str(" (notes)");
    }
    if show_streak {
        line.push_str(&format!("  streak {}", entry.streak));
    }
    line.push_str(&format!("  [{}]", entry.habit_id));
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    #[test]
    fn renders_checklist_row() {
        let entry = ChecklistEntry {
            habit_id: "abc".to_string(),
            name: "Read".to_string(),
            time: NaiveTime::from_hms_opt(7, 5, 0).unwrap(),
            has_notes: true,
            completed: true,
            streak: 4,
        };
        assert_eq!(
            render_entry(&entry, true),
            "[x] 07:05 Read (notes)  streak 4  [abc]"
        );
        assert_eq!(render_entry(&entry, false), "[x] 07:05 Read (notes)  [abc]");
    }
}
