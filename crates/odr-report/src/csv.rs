//! CSV output.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use polars::prelude::{CsvWriter, DataFrame, SerWriter};
use sha2::{Digest, Sha256};
use tracing::info;

use odr_model::CohortRecord;
use odr_transform::cohort_frame;

use crate::error::{ReportError, Result};

/// A written output file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenOutput {
    pub path: PathBuf,
    pub rows: usize,
    /// Hex-encoded SHA-256 digest of the file contents.
    pub sha256: String,
}

/// Write the cohort records to `path` as CSV.
pub fn write_cohort_csv(path: &Path, records: &[CohortRecord]) -> Result<WrittenOutput> {
    let mut df = cohort_frame(records)?;
    write_frame_csv(path, &mut df)
}

/// Write a frame to `path` as CSV with a header row, creating parent
/// directories as needed. Nulls are written as empty cells.
pub fn write_frame_csv(path: &Path, df: &mut DataFrame) -> Result<WrittenOutput> {
    let io_error = |source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_error)?;
    }

    let file = File::create(path).map_err(io_error)?;
    let mut writer = BufWriter::new(file);
    CsvWriter::new(&mut writer)
        .include_header(true)
        .finish(df)
        .map_err(|source| ReportError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
    writer.flush().map_err(io_error)?;

    let sha256 = file_sha256(path)?;
    info!(
        path = %path.display(),
        rows = df.height(),
        sha256 = %sha256,
        "output written"
    );
    Ok(WrittenOutput {
        path: path.to_path_buf(),
        rows: df.height(),
        sha256,
    })
}

/// Hex-encoded SHA-256 digest of a file.
pub fn file_sha256(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(hex::encode(Sha256::digest(&bytes)))
}
