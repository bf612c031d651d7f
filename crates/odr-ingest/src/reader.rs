//! CSV file reading.
//!
//! The header row is inspected with the `csv` crate so that missing columns
//! are reported before the full read. The body is loaded with polars, every
//! column as a string; typing happens during row extraction.

use std::path::Path;

use csv::ReaderBuilder;
use polars::prelude::{CsvReadOptions, DataFrame, SerReader};

use crate::error::{IngestError, Result};

/// Header row of a CSV file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvHeaders {
    pub columns: Vec<String>,
}

impl CsvHeaders {
    pub fn contains(&self, column: &str) -> bool {
        self.columns.iter().any(|name| name == column)
    }
}

fn normalize_header(raw: &str) -> String {
    raw.trim().trim_start_matches('\u{feff}').trim().to_string()
}

/// Read only the header row of a CSV file.
pub fn read_csv_schema(path: &Path) -> Result<CsvHeaders> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(|source| IngestError::CsvHeader {
            path: path.to_path_buf(),
            source,
        })?;
    let record = reader.headers().map_err(|source| IngestError::CsvHeader {
        path: path.to_path_buf(),
        source,
    })?;
    let columns: Vec<String> = record.iter().map(normalize_header).collect();
    if columns.iter().all(String::is_empty) {
        return Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
        });
    }
    Ok(CsvHeaders { columns })
}

/// Fail with the first required column that is absent from `headers`.
pub fn require_columns(headers: &CsvHeaders, required: &[&str], path: &Path) -> Result<()> {
    match required.iter().find(|column| !headers.contains(column)) {
        Some(column) => Err(IngestError::MissingColumn {
            column: (*column).to_string(),
            path: path.to_path_buf(),
        }),
        None => Ok(()),
    }
}

/// Read a whole CSV file into a DataFrame of string columns.
pub fn read_csv_frame(path: &Path) -> Result<DataFrame> {
    let mut df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .finish()
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    // A UTF-8 BOM can survive into the first column name.
    let first = df
        .get_column_names()
        .first()
        .map(|name| name.to_string())
        .filter(|name| name.starts_with('\u{feff}'));
    if let Some(raw) = first {
        df.rename(&raw, normalize_header(&raw).into())?;
    }

    tracing::debug!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        "read csv"
    );
    Ok(df)
}
