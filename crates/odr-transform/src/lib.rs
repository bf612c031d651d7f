//! Cohort derivation for overdose encounters.
//!
//! Stages run strictly forward:
//!
//! - **cohort**: overdose encounters after the cutoff, joined to patient
//!   demographics and restricted by age at visit
//! - **medications**: medications active on each visit date, and opioids
//!   among them
//! - **readmission**: forward-looking 30/90-day readmission per patient
//! - **pipeline**: the stages chained together with run statistics
//! - **frame**: the output DataFrame in final column order
//! - **reasons**: encounter counts per reason description

pub mod cohort;
pub mod error;
pub mod frame;
pub mod medications;
pub mod pipeline;
pub mod readmission;
pub mod reasons;

pub use cohort::{CohortSelection, age_in_years, select_cohort};
pub use error::{Result, TransformError};
pub use frame::cohort_frame;
pub use medications::count_active_medications;
pub use pipeline::{CohortOutput, build_cohort};
pub use readmission::{assign_readmissions, next_in_partition};
pub use reasons::{ReasonCount, count_reasons};
