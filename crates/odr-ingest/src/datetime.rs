//! Source date parsing.
//!
//! Source tables mix plain dates (`1989-05-25`) with UTC timestamps
//! (`2010-01-23T17:45:28Z`). Only the calendar date is kept; for timestamps
//! with an offset, the date is taken in that offset.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use thiserror::Error;

/// A non-blank date cell in no accepted format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("unrecognized date format")]
pub struct UnrecognizedDate;

const DATE_FORMATS: [&str; 1] = ["%Y-%m-%d"];

const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parse a source date cell.
///
/// Returns `Ok(None)` for a blank cell. Callers attach file and line context
/// to the error.
pub fn parse_source_date(value: &str) -> Result<Option<NaiveDate>, UnrecognizedDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    try_parse_date(trimmed)
        .or_else(|| try_parse_timestamp(trimmed))
        .map(Some)
        .ok_or(UnrecognizedDate)
}

fn try_parse_date(value: &str) -> Option<NaiveDate> {
    // %Y-%m-%d also accepts unpadded months and days ("1999-7-15").
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
}

fn try_parse_timestamp(value: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.date_naive());
    }
    DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .map(|dt| dt.date())
}
