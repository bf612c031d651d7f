use odr_model::ModelError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransformError {
    #[error("invalid cohort options: {0}")]
    Options(#[from] ModelError),
    #[error("failed to build output frame: {0}")]
    Frame(#[from] polars::prelude::PolarsError),
}

pub type Result<T> = std::result::Result<T, TransformError>;
