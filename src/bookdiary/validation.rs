//! Input checks the front-end runs before handing values to the core.
//!
//! The entities accept anything; these helpers turn raw user input into the typed
//! values the repository expects, or into a [`BookDiaryError`] the UI can show.

use crate::error::{BookDiaryError, Result};
use chrono::NaiveDate;

/// Trims `value` and fails with `MissingField(field)` if nothing is left.
pub fn require(field: &'static str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(BookDiaryError::MissingField(field));
    }
    Ok(trimmed.to_string())
}

pub fn parse_year(input: &str) -> Result<i32> {
    input
        .trim()
        .parse::<i32>()
        .map_err(|_| BookDiaryError::InvalidYear(input.to_string()))
}

/// Strict `YYYY-MM-DD`, surrounding whitespace ignored.
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    crate::model::parse_date(input.trim())
}
