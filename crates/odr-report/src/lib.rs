//! Output generation.
//!
//! The cohort is written as a single CSV file with a header row and the
//! columns of [`odr_model::OUTPUT_COLUMNS`], in that order.

pub mod csv;
pub mod error;

pub use csv::{WrittenOutput, file_sha256, write_cohort_csv, write_frame_csv};
pub use error::{ReportError, Result};
