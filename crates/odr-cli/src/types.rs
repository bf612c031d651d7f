use std::path::PathBuf;

use odr_model::{CohortOptions, CohortRecord, CohortStats};
use odr_report::WrittenOutput;

#[derive(Debug)]
pub struct RunResult {
    pub data_dir: PathBuf,
    pub options: CohortOptions,
    pub stats: CohortStats,
    /// `None` on a dry run.
    pub output: Option<WrittenOutput>,
    /// Leading output rows for display.
    pub preview: Vec<CohortRecord>,
}
