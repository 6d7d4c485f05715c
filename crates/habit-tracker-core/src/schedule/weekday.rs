//! Weekday codes: 0=Sunday ... 6=Saturday.

use chrono::{Datelike, NaiveDate};

use crate::error::ValidationError;

pub const DAYS_IN_WEEK: u8 = 7;

const LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
const LETTERS: [char; 7] = ['S', 'M', 'T', 'W', 'T', 'F', 'S'];

/// Weekday code of a calendar day.
pub fn weekday_code(date: NaiveDate) -> u8 {
    date.weekday().num_days_from_sunday() as u8
}

/// Three-letter label ("Sun".."Sat").
pub fn weekday_label(code: u8) -> Option<&'static str> {
    LABELS.get(code as usize).copied()
}

/// Single-letter label as shown on the day picker.
pub fn weekday_letter(code: u8) -> Option<char> {
    LETTERS.get(code as usize).copied()
}

/// Validate a day set and return it sorted without duplicates.
///
/// # Errors
/// [`ValidationError::NoDaysSelected`] when empty,
/// [`ValidationError::InvalidWeekday`] for the first code above 6.
pub fn normalize_days(days: &[u8]) -> Result<Vec<u8>, ValidationError> {
    if days.is_empty() {
        return Err(ValidationError::NoDaysSelected);
    }
    if let Some(&bad) = days.iter().find(|&&d| d >= DAYS_IN_WEEK) {
        return Err(ValidationError::InvalidWeekday(bad));
    }

    let mut normalized = days.to_vec();
    normalized.sort_unstable();
    normalized.dedup();
    Ok(normalized)
}

/// Parse a comma-separated day list.
///
/// Accepts numeric codes (`1,3,5`), English names or prefixes (`mon,wed`,
/// `Friday`), and the shorthands `daily`, `weekdays` and `weekends`.
///
/// # Errors
/// Returns [`ValidationError::InvalidValue`] for an unknown token and the
/// [`normalize_days`] errors for the resulting set.
pub fn parse_days(input: &str) -> Result<Vec<u8>, ValidationError> {
    let mut days = Vec::new();

    for token in input.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        let lower = token.to_ascii_lowercase();
        match lower.as_str() {
            "daily" | "everyday" | "all" => days.extend(0..DAYS_IN_WEEK),
            "weekdays" => days.extend(1..=5),
            "weekends" => days.extend([0, 6]),
            _ => days.push(parse_day_token(&lower)?),
        }
    }

    normalize_days(&days)
}

fn parse_day_token(token: &str) -> Result<u8, ValidationError> {
    if let Ok(code) = token.parse::<u8>() {
        return Ok(code);
    }

    const NAMES: [&str; 7] = [
        "sunday",
        "monday",
        "tuesday",
        "wednesday",
        "thursday",
        "friday",
        "saturday",
    ];
    if token.len() >= 2 {
        let matches: Vec<usize> = NAMES
            .iter()
            .enumerate()
            .filter(|(_, name)| name.starts_with(token))
            .map(|(i, _)| i)
            .collect();
        if let [only] = matches.as_slice() {
            return Ok(*only as u8);
        }
    }

    Err(ValidationError::InvalidValue {
        field: "days".to_string(),
        message: format!("unknown day '{token}'"),
    })
}
