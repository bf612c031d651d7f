//! Row types flowing through the pipeline.
//!
//! Source rows keep dates as `Option<NaiveDate>`: a blank cell in the input
//! becomes `None` and is carried forward rather than rejected.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One row of the encounters table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Encounter {
    pub id: String,
    pub patient_id: String,
    pub reason_code: Option<u64>,
    pub reason_description: Option<String>,
    pub start: Option<NaiveDate>,
    pub stop: Option<NaiveDate>,
}

/// One row of the patients table, reduced to the demographic dates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patient {
    pub id: String,
    pub birth_date: Option<NaiveDate>,
    pub death_date: Option<NaiveDate>,
}

/// One row of the medications table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Medication {
    pub patient_id: String,
    pub encounter_id: Option<String>,
    pub code: Option<u64>,
    pub description: Option<String>,
    pub start: Option<NaiveDate>,
    pub stop: Option<NaiveDate>,
}

impl Medication {
    /// Returns true if the medication window `[start, stop]` contains `date`.
    ///
    /// A missing stop date is replaced by `open_ended_stop`. A medication
    /// without a start date is never active.
    pub fn is_active_on(&self, date: NaiveDate, open_ended_stop: NaiveDate) -> bool {
        let Some(start) = self.start else {
            return false;
        };
        let stop = self.stop.unwrap_or(open_ended_stop);
        start <= date && date <= stop
    }
}

/// An overdose encounter that passed the cohort filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CohortEncounter {
    pub encounter_id: String,
    pub patient_id: String,
    pub visit_date: NaiveDate,
    pub stop_date: Option<NaiveDate>,
    pub age_at_visit: i64,
    /// True when the patient's death date equals the encounter stop date.
    pub death_at_visit: bool,
}

/// Medication exposure at a single visit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicationCounts {
    /// Medications active on the visit date.
    pub current_meds: i64,
    /// Opioid medications active on the visit date.
    pub current_opioids: i64,
}

/// Final per-encounter record, one output row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CohortRecord {
    pub patient_id: String,
    pub encounter_id: String,
    pub encounter_date: NaiveDate,
    pub age_at_visit: i64,
    pub death_at_visit: bool,
    pub medications: MedicationCounts,
    pub readmission_90_day: bool,
    pub readmission_30_day: bool,
    pub first_readmission_date: Option<NaiveDate>,
}

impl CohortRecord {
    /// Start a record from a cohort encounter with no readmission yet.
    pub fn from_encounter(encounter: CohortEncounter, medications: MedicationCounts) -> Self {
        Self {
            patient_id: encounter.patient_id,
            encounter_id: encounter.encounter_id,
            encounter_date: encounter.visit_date,
            age_at_visit: encounter.age_at_visit,
            death_at_visit: encounter.death_at_visit,
            medications,
            readmission_90_day: false,
            readmission_30_day: false,
            first_readmission_date: None,
        }
    }
}
