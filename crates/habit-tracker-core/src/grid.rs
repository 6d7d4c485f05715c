//! Contribution grid projection.
//!
//! The grid has one column per week (oldest first) and one row per weekday
//! code (Sunday first). The last column is the week containing `today`, so
//! the days after `today` in that week are present and classified as
//! [`CellState::Future`].

use std::collections::HashSet;

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::completion::completed_days;
use crate::habit::Habit;
use crate::schedule::weekday::{weekday_code, DAYS_IN_WEEK};

/// Weeks shown when no width is configured (about one year).
pub const DEFAULT_WEEKS: u32 = 53;

/// Widest grid built, in weeks (five years).
pub const MAX_GRID_WEEKS: u32 = 260;

/// Rendering class of a single day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellState {
    BeforeStart,
    Future,
    Unscheduled,
    Done,
    Missed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridCell {
    pub date: NaiveDate,
    pub state: CellState,
}

/// Cell counts per state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSummary {
    pub before_start: usize,
    pub future: usize,
    pub unscheduled: usize,
    pub done: usize,
    pub missed: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionGrid {
    pub today: NaiveDate,
    /// `weeks[w][d]` is weekday code `d` of week `w`.
    pub weeks: Vec<Vec<GridCell>>,
}

/// Classify `date` for `habit` relative to `today`.
///
/// Precedence: before start, then future, then unscheduled, then done/missed.
pub fn classify_cell(habit: &Habit, date: NaiveDate, today: NaiveDate) -> CellState {
    classify(habit, date, today, &completed_days(habit))
}

fn classify(
    habit: &Habit,
    date: NaiveDate,
    today: NaiveDate,
    done: &HashSet<NaiveDate>,
) -> CellState {
    if date < habit.start_date {
        CellState::BeforeStart
    } else if date > today {
        CellState::Future
    } else if !habit.is_scheduled_for_day(weekday_code(date)) {
        CellState::Unscheduled
    } else if done.contains(&date) {
        CellState::Done
    } else {
        CellState::Missed
    }
}

impl ContributionGrid {
    /// Project `weeks` weeks of history ending with the week of `today`.
    ///
    /// `weeks` is capped at [`MAX_GRID_WEEKS`]. Weeks that would fall outside
    /// the representable date range are left out.
    pub fn build(habit: &Habit, today: NaiveDate, weeks: u32) -> Self {
        let done = completed_days(habit);
        let weeks = weeks.min(MAX_GRID_WEEKS);
        let first_day = today
            .checked_sub_days(Days::new(u64::from(weekday_code(today))))
            .and_then(|week_start| {
                week_start.checked_sub_days(Days::new(7 * u64::from(weeks.saturating_sub(1))))
            });

        let columns = match first_day {
            Some(first_day) => (0..u64::from(weeks))
                .map_while(|w| {
                    (0..u64::from(DAYS_IN_WEEK))
                        .map(|d| {
                            let date = first_day.checked_add_days(Days::new(w * 7 + d))?;
                            Some(GridCell {
                                date,
                                state: classify(habit, date, today, &done),
                            })
                        })
                        .collect::<Option<Vec<_>>>()
                })
                .collect(),
            None => Vec::new(),
        };

        Self {
            today,
            weeks: columns,
        }
    }

    pub fn cell(&self, week: usize, weekday: u8) -> Option<&GridCell> {
        self.weeks.get(week)?.get(weekday as usize)
    }

    /// Cells of one weekday row, oldest first.
    pub fn row(&self, weekday: u8) -> impl Iterator<Item = &GridCell> + '_ {
        self.weeks
            .iter()
            .filter_map(move |week| week.get(weekday as usize))
    }

    pub fn cells(&self) -> impl Iterator<Item = &GridCell> + '_ {
        self.weeks.iter().flatten()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.cells().next().map(|c| c.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.cells().last().map(|c| c.date)
    }

    pub fn summary(&self) -> GridSummary {
        let mut summary = GridSummary::default();
        for cell in self.cells() {
            match cell.state {
                CellState::BeforeStart => summary.before_start += 1,
                CellState::Future => summary.future += 1,
                CellState::Unscheduled => summary.unscheduled += 1,
                CellState::Done => summary.done += 1,
                CellState::Missed => summary.missed += 1,
            }
        }
        summary
    }
}
