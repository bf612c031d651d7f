//! Error types for source table ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading the source tables.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Data directory not found or not a directory.
    #[error("data directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// Neither `<name>` nor `<name>.csv` exists in the data directory.
    #[error("table '{table}' not found in {dir} (looked for '{table}' and '{table}.csv')")]
    TableNotFound { table: String, dir: PathBuf },

    // === CSV Parsing Errors ===
    /// Failed to read the header row.
    #[error("failed to read CSV header of {path}: {source}")]
    CsvHeader {
        path: PathBuf,
        #[source]
        source: ::csv::Error,
    },

    /// Failed to parse CSV with Polars.
    #[error("failed to parse CSV {path}: {message}")]
    CsvParse { path: PathBuf, message: String },

    /// CSV file has no header row.
    #[error("CSV file is empty: {path}")]
    EmptyCsv { path: PathBuf },

    /// Required column missing from the header row.
    #[error("required column '{column}' not found in {path}")]
    MissingColumn { column: String, path: PathBuf },

    // === Value Errors ===
    /// A non-empty date cell that matches no accepted format.
    #[error("invalid date '{value}' in column {column} at line {line} of {path}")]
    InvalidDate {
        path: PathBuf,
        column: String,
        line: usize,
        value: String,
    },

    /// A non-empty code cell that is not an integer code.
    #[error("invalid code '{value}' in column {column} at line {line} of {path}")]
    InvalidCode {
        path: PathBuf,
        column: String,
        line: usize,
        value: String,
    },

    /// A required identifier cell is empty.
    #[error("empty {column} at line {line} of {path}")]
    MissingIdentifier {
        path: PathBuf,
        column: String,
        line: usize,
    },

    // === DataFrame Errors ===
    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for IngestError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IngestError::TableNotFound {
            table: "patients".to_string(),
            dir: PathBuf::from("/data"),
        };
        assert_eq!(
            err.to_string(),
            "table 'patients' not found in /data (looked for 'patients' and 'patients.csv')"
        );
    }

    #[test]
    fn test_error_from_polars() {
        let polars_err = polars::prelude::PolarsError::ColumnNotFound("START".into());
        let ingest_err: IngestError = polars_err.into();
        assert!(matches!(ingest_err, IngestError::DataFrame { .. }));
    }
}
