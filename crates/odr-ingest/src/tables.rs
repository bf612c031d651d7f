//! Typed row extraction and table loading.

use std::path::Path;
use std::time::Instant;

use chrono::NaiveDate;
use polars::prelude::DataFrame;
use tracing::{debug, info};

use odr_model::{Encounter, Medication, Patient, SourceTable, TableCounts};

use crate::datetime::parse_source_date;
use crate::discovery::discover_tables;
use crate::error::{IngestError, Result};
use crate::reader::{read_csv_frame, read_csv_schema, require_columns};
use crate::values::{parse_code, source_line, string_column};

/// All five source tables held in memory.
#[derive(Debug, Clone)]
pub struct SourceTables {
    pub encounters: Vec<Encounter>,
    pub patients: Vec<Patient>,
    pub medications: Vec<Medication>,
    /// Loaded for completeness; only the row count is used.
    pub allergies: DataFrame,
    /// Loaded for completeness; only the row count is used.
    pub procedures: DataFrame,
    pub counts: TableCounts,
}

fn date_cell(
    value: Option<&str>,
    column: &str,
    idx: usize,
    path: &Path,
) -> Result<Option<NaiveDate>> {
    let Some(value) = value else {
        return Ok(None);
    };
    parse_source_date(value).map_err(|_| IngestError::InvalidDate {
        path: path.to_path_buf(),
        column: column.to_string(),
        line: source_line(idx),
        value: value.to_string(),
    })
}

fn code_cell(value: Option<&str>, column: &str, idx: usize, path: &Path) -> Result<Option<u64>> {
    let Some(value) = value else {
        return Ok(None);
    };
    parse_code(value)
        .map(Some)
        .ok_or_else(|| IngestError::InvalidCode {
            path: path.to_path_buf(),
            column: column.to_string(),
            line: source_line(idx),
            value: value.to_string(),
        })
}

fn id_cell(value: Option<&str>, column: &str, idx: usize, path: &Path) -> Result<String> {
    value
        .map(str::to_string)
        .ok_or_else(|| IngestError::MissingIdentifier {
            path: path.to_path_buf(),
            column: column.to_string(),
            line: source_line(idx),
        })
}

/// Convert an encounters frame into typed rows.
pub fn encounters_from_frame(df: &DataFrame, path: &Path) -> Result<Vec<Encounter>> {
    let ids = string_column(df, "Id", path)?;
    let patients = string_column(df, "PATIENT", path)?;
    let reason_codes = string_column(df, "REASONCODE", path)?;
    let reasons = string_column(df, "REASONDESCRIPTION", path)?;
    let starts = string_column(df, "START", path)?;
    let stops = string_column(df, "STOP", path)?;

    let mut rows = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        rows.push(Encounter {
            id: id_cell(ids[idx], "Id", idx, path)?,
            patient_id: id_cell(patients[idx], "PATIENT", idx, path)?,
            reason_code: code_cell(reason_codes[idx], "REASONCODE", idx, path)?,
            reason_description: reasons[idx].map(str::to_string),
            start: date_cell(starts[idx], "START", idx, path)?,
            stop: date_cell(stops[idx], "STOP", idx, path)?,
        });
    }
    Ok(rows)
}

/// Convert a patients frame into typed rows.
pub fn patients_from_frame(df: &DataFrame, path: &Path) -> Result<Vec<Patient>> {
    let ids = string_column(df, "Id", path)?;
    let births = string_column(df, "BIRTHDATE", path)?;
    let deaths = string_column(df, "DEATHDATE", path)?;

    let mut rows = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        rows.push(Patient {
            id: id_cell(ids[idx], "Id", idx, path)?,
            birth_date: date_cell(births[idx], "BIRTHDATE", idx, path)?,
            death_date: date_cell(deaths[idx], "DEATHDATE", idx, path)?,
        });
    }
    Ok(rows)
}

/// Convert a medications frame into typed rows.
pub fn medications_from_frame(df: &DataFrame, path: &Path) -> Result<Vec<Medication>> {
    let patients = string_column(df, "PATIENT", path)?;
    let encounters = string_column(df, "ENCOUNTER", path)?;
    let codes = string_column(df, "CODE", path)?;
    let descriptions = string_column(df, "DESCRIPTION", path)?;
    let starts = string_column(df, "START", path)?;
    let stops = string_column(df, "STOP", path)?;

    let mut rows = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        rows.push(Medication {
            patient_id: id_cell(patients[idx], "PATIENT", idx, path)?,
            encounter_id: encounters[idx].map(str::to_string),
            code: code_cell(codes[idx], "CODE", idx, path)?,
            description: descriptions[idx].map(str::to_string),
            start: date_cell(starts[idx], "START", idx, path)?,
            stop: date_cell(stops[idx], "STOP", idx, path)?,
        });
    }
    Ok(rows)
}

/// Check the header of `path` and read the whole table.
fn load_frame(table: SourceTable, path: &Path) -> Result<DataFrame> {
    let headers = read_csv_schema(path)?;
    require_columns(&headers, table.required_columns(), path)?;
    read_csv_frame(path)
}

/// Load and type the encounters table on its own.
pub fn load_encounters(path: &Path) -> Result<Vec<Encounter>> {
    let df = load_frame(SourceTable::Encounters, path)?;
    encounters_from_frame(&df, path)
}

/// Discover and load all five source tables from `dir`.
///
/// Every table is read fully before returning; any unreadable file, missing
/// column, or malformed date aborts the load.
pub fn load_source_tables(dir: &Path) -> Result<SourceTables> {
    let start = Instant::now();
    let paths = discover_tables(dir)?;
    let mut counts = TableCounts::default();

    let allergies = load_frame(
        SourceTable::Allergies,
        paths.require(SourceTable::Allergies, dir)?,
    )?;
    counts.record(SourceTable::Allergies, allergies.height());

    let encounters_path = paths.require(SourceTable::Encounters, dir)?;
    let encounters_df = load_frame(SourceTable::Encounters, encounters_path)?;
    counts.record(SourceTable::Encounters, encounters_df.height());
    let encounters = encounters_from_frame(&encounters_df, encounters_path)?;

    let medications_path = paths.require(SourceTable::Medications, dir)?;
    let medications_df = load_frame(SourceTable::Medications, medications_path)?;
    counts.record(SourceTable::Medications, medications_df.height());
    let medications = medications_from_frame(&medications_df, medications_path)?;

    let patients_path = paths.require(SourceTable::Patients, dir)?;
    let patients_df = load_frame(SourceTable::Patients, patients_path)?;
    counts.record(SourceTable::Patients, patients_df.height());
    let patients = patients_from_frame(&patients_df, patients_path)?;

    let procedures = load_frame(
        SourceTable::Procedures,
        paths.require(SourceTable::Procedures, dir)?,
    )?;
    counts.record(SourceTable::Procedures, procedures.height());

    for (table, rows) in &counts.rows {
        debug!(table = %table, rows, "loaded table");
    }
    info!(
        dir = %dir.display(),
        encounters = encounters.len(),
        patients = patients.len(),
        medications = medications.len(),
        duration_ms = start.elapsed().as_millis(),
        "source tables loaded"
    );

    Ok(SourceTables {
        encounters,
        patients,
        medications,
        allergies,
        procedures,
        counts,
    })
}
