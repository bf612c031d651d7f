//! Cell-level helpers for string frames.

use std::path::Path;

use polars::prelude::DataFrame;

use crate::error::{IngestError, Result};

/// Collect a string column, trimming values and mapping blanks to `None`.
pub fn string_column<'a>(
    df: &'a DataFrame,
    name: &str,
    path: &Path,
) -> Result<Vec<Option<&'a str>>> {
    let column = df.column(name).map_err(|_| IngestError::MissingColumn {
        column: name.to_string(),
        path: path.to_path_buf(),
    })?;
    let values = column.str()?;
    Ok(values
        .into_iter()
        .map(|value| value.map(str::trim).filter(|value| !value.is_empty()))
        .collect())
}

/// Parse an integer code cell.
///
/// Codes are sometimes rendered as floats (`55680006.0`) by upstream tools;
/// a zero fractional part is accepted.
pub fn parse_code(value: &str) -> Option<u64> {
    let trimmed = value.trim();
    if let Ok(code) = trimmed.parse::<u64>() {
        return Some(code);
    }
    let (whole, fraction) = trimmed.split_once('.')?;
    if !fraction.is_empty() && fraction.chars().all(|ch| ch == '0') {
        whole.parse::<u64>().ok()
    } else {
        None
    }
}

/// Line number in the source file of the data row at `idx` (header is line 1).
pub(crate) fn source_line(idx: usize) -> usize {
    idx + 2
}
