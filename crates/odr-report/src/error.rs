use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to serialize CSV {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: polars::prelude::PolarsError,
    },
    #[error(transparent)]
    Transform(#[from] odr_transform::TransformError),
}

pub type Result<T> = std::result::Result<T, ReportError>;
