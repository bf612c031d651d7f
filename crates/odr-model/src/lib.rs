//! Data model for the overdose readmission cohort.
//!
//! - **records**: source rows (encounters, patients, medications) and the
//!   derived per-encounter record written to the output file
//! - **tables**: the five source tables and the columns each must carry
//! - **schema**: output column names and order
//! - **options**: cohort constants, overridable from the CLI
//! - **summary**: run statistics reported after the pipeline finishes

pub mod error;
pub mod options;
pub mod records;
pub mod schema;
pub mod summary;
pub mod tables;

pub use error::{ModelError, Result};
pub use options::{CohortOptions, ReadmissionWindows};
pub use records::{CohortEncounter, CohortRecord, Encounter, Medication, MedicationCounts, Patient};
pub use schema::{OUTPUT_COLUMNS, OUTPUT_DATE_FORMAT, OutputColumn, output_header};
pub use summary::{CohortStats, TableCounts};
pub use tables::SourceTable;
