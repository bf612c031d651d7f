//! Loading of the five source tables.
//!
//! - **discovery**: resolve each table to a file inside the data directory
//! - **reader**: header inspection with `csv`, full reads with polars
//! - **datetime**: source date parsing
//! - **values**: code parsing and frame column access
//! - **tables**: typed row extraction and the one-call loader

pub mod datetime;
pub mod discovery;
pub mod error;
pub mod reader;
pub mod tables;
pub mod values;

pub use datetime::{UnrecognizedDate, parse_source_date};
pub use discovery::{TablePaths, discover_tables, resolve_table};
pub use error::{IngestError, Result};
pub use reader::{CsvHeaders, read_csv_frame, read_csv_schema, require_columns};
pub use tables::{
    SourceTables, encounters_from_frame, load_encounters, load_source_tables,
    medications_from_frame, patients_from_frame,
};
pub use values::{parse_code, string_column};
