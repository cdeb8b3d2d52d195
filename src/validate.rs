use chrono::{Duration, Local, NaiveDateTime};
use lazy_static::lazy_static;
use regex::Regex;

use crate::error::Error;

pub const DATE_INPUT_FORMAT: &str = "%Y-%m-%d %H:%M";

lazy_static! {
    static ref DATE_INPUT: Regex = Regex::new(r"^\d{4}-\d{2}-\d{2} \d{2}:\d{2}$").unwrap();
}

/// Checks a `YYYY-MM-DD HH:mm` form input and expands it to the
/// `YYYY-MM-DD HH:mm:ss` shape the backend parses.
pub fn parse_date_input(input: &str) -> Result<String, Error> {
    let input = input.trim();
    if !DATE_INPUT.is_match(input) {
        return Error::new_validation_error(format!("Please enter dates as YYYY-MM-DD HH:mm (got {input:?})"));
    }
    NaiveDateTime::parse_from_str(input, DATE_INPUT_FORMAT)
        .or_else(|err| Error::new_validation_error(format!("Invalid date {input:?}: {err}")))?;
    Ok(format!("{input}:00"))
}

/// Validates a date range, defaulting to the last 24 hours when a bound is
/// not given. The dashboard pre-filled its date inputs the same way.
pub fn resolve_date_range(start: Option<&str>, end: Option<&str>) -> Result<(String, String), Error> {
    let now = Local::now().naive_local();
    let default_start = (now - Duration::hours(24)).format(DATE_INPUT_FORMAT).to_string();
    let default_end = now.format(DATE_INPUT_FORMAT).to_string();
    Ok((
        parse_date_input(start.unwrap_or(&default_start))?,
        parse_date_input(end.unwrap_or(&default_end))?,
    ))
}
