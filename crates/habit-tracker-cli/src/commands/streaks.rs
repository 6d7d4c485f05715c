//! Streak board with text-rendered contribution grids.

use habit_tracker_core::schedule::weekday::DAYS_IN_WEEK;
use habit_tracker_core::{
    today, weekday_label, weekday_letter, CellState, Config, ContributionGrid, StreakCard,
};

use super::open_tracker;

pub fn run(weeks: Option<u32>, json: bool, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let tracker = open_tracker(config)?;
    let weeks = weeks.unwrap_or(config.grid.weeks);
    let board = tracker.streak_board(today(), weeks)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&board)?);
        return Ok(());
    }

    if board.is_empty() {
        println!("No habits yet. Start building your habits by adding one with `habit add`.");
        return Ok(());
    }
    for card in &board {
        println!("{}", render_card(card, config.grid.show_notes));
    }
    Ok(())
}

fn cell_char(state: CellState) -> char {
    match state {
        CellState::BeforeStart => ' ',
        CellState::Future => '_',
        CellState::Unscheduled => '.',
        CellState::Missed => '-',
        CellState::Done => '#',
    }
}

fn render_grid(grid: &ContributionGrid) -> String {
    (0..DAYS_IN_WEEK)
        .map(|day| {
            let cells: String = grid.row(day).map(|c| cell_char(c.state)).collect();
            format!("{} {}", weekday_label(day).unwrap_or("???"), cells)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Day picker line, e.g. "-M-W-F-" for Mon/Wed/Fri.
fn render_days(days: &[u8]) -> String {
    (0..DAYS_IN_WEEK)
        .map(|day| match weekday_letter(day) {
            Some(letter) if days.contains(&day) => letter,
            _ => '-',
        })
        .collect()
}

fn render_card(card: &StreakCard, show_notes: bool) -> String {
    let mut out = format!(
        "{}  {}  {} day streak  [{}]\n",
        card.name,
        render_days(&card.selected_days),
        card.streak,
        card.habit_id
    );
    out.push_str(&render_grid(&card.grid));
    if show_notes && !card.notes.is_empty() {
        out.push('\n');
        out.push_str(&card.notes);
    }
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime, Utc};
    use habit_tracker_core::{Completion, Habit};

    #[test]
    fn renders_rows_by_weekday() {
        let day = |d| NaiveDate::from_ymd_opt(2026, 10, d).unwrap();
        let habit = Habit {
            id: "h1".to_string(),
            name: "Run".to_string(),
            start_date: day(5),
            time: NaiveTime::from_hms_opt(6, 0, 0).unwrap(),
            notes: "Easy pace".to_string(),
            selected_days: vec![1, 3, 5],
            created_at: Utc::now(),
            completions: vec![Completion::new("h1", day(5)), Completion::new("h1", day(12))],
        };
        // 2026-10-14 is a Wednesday; two weeks starting Sunday 2026-10-04.
        let grid = ContributionGrid::build(&habit, day(14), 2);
        let text = render_grid(&grid);
        let rows: Vec<&str> = text.lines().collect();

        assert_eq!(rows.len(), 7);
        assert_eq!(rows[0], "Sun  .");
        assert_eq!(rows[1], "Mon ##");
        assert_eq!(rows[3], "Wed --");
        assert_eq!(rows[4], "Thu ._");
        assert_eq!(rows[5], "Fri -_");

        let card = StreakCard {
            habit_id: habit.id.clone(),
            name: habit.name.clone(),
            notes: habit.notes.clone(),
            selected_days: habit.selected_days.clone(),
            streak: 0,
            grid,
        };
        let rendered = render_card(&card, true);
        assert!(rendered.starts_with("Run  -M-W-F-  0 day streak  [h1]\n"));
        assert!(rendered.ends_with("Easy pace\n"));
        assert!(!render_card(&card, false).contains("Easy pace"));
    }

    #[test]
    fn day_picker_marks_selected_days() {
        assert_eq!(render_days(&[0, 6]), "S-----S");
        assert_eq!(render_days(&[0, 1, 2, 3, 4, 5, 6]), "SMTWTFS");
    }
}
