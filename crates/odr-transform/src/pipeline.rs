//! Cohort pipeline with explicit stages.
//!
//! 1. **Cohort**: select overdose encounters and attach age and death flags
//! 2. **Medications**: count medications active at each visit
//! 3. **Readmission**: order by patient and date, derive readmission flags
//!
//! Table loading and output writing live in `odr-ingest` and `odr-report`.

use std::collections::BTreeSet;
use std::time::Instant;

use tracing::{info, info_span};

use odr_model::{CohortOptions, CohortRecord, CohortStats, Encounter, Medication, Patient};

use crate::cohort::select_cohort;
use crate::error::Result;
use crate::medications::count_active_medications;
use crate::readmission::assign_readmissions;

/// Final records, ordered by patient then encounter date, with run counts.
#[derive(Debug, Clone, Default)]
pub struct CohortOutput {
    pub records: Vec<CohortRecord>,
    /// Counts of the derivation; `tables` is left for the loader to fill.
    pub stats: CohortStats,
}

/// Run the cohort, medication, and readmission stages.
///
/// # Errors
///
/// Returns an error if `options` fails validation.
pub fn build_cohort(
    encounters: &[Encounter],
    patients: &[Patient],
    medications: &[Medication],
    options: &CohortOptions,
) -> Result<CohortOutput> {
    options.validate()?;
    let mut stats = CohortStats::default();

    let selection = info_span!("cohort").in_scope(|| {
        let start = Instant::now();
        let selection = select_cohort(encounters, patients, options);
        info!(
            overdose_encounters = selection.overdose_encounters,
            cohort_encounters = selection.encounters.len(),
            cutoff = %options.cutoff_date,
            min_age = options.min_age,
            max_age = options.max_age,
            duration_ms = start.elapsed().as_millis(),
            "cohort selected"
        );
        selection
    });
    stats.overdose_encounters = selection.overdose_encounters;
    stats.cohort_encounters = selection.encounters.len();

    let counts = info_span!("medications").in_scope(|| {
        let start = Instant::now();
        let counts = count_active_medications(&selection.encounters, medications, options);
        let without_meds = counts.iter().filter(|c| c.current_meds == 0).count();
        info!(
            medications = medications.len(),
            without_current_meds = without_meds,
            duration_ms = start.elapsed().as_millis(),
            "medication exposure counted"
        );
        counts
    });

    let mut records: Vec<CohortRecord> = selection
        .encounters
        .into_iter()
        .zip(counts)
        .map(|(encounter, counts)| CohortRecord::from_encounter(encounter, counts))
        .collect();

    info_span!("readmission").in_scope(|| {
        let start = Instant::now();
        assign_readmissions(&mut records, options.windows);
        info!(
            readmissions_90_day = records.iter().filter(|r| r.readmission_90_day).count(),
            readmissions_30_day = records.iter().filter(|r| r.readmission_30_day).count(),
            duration_ms = start.elapsed().as_millis(),
            "readmissions derived"
        );
    });

    stats.distinct_patients = records
        .iter()
        .map(|r| r.patient_id.as_str())
        .collect::<BTreeSet<_>>()
        .len();
    stats.deaths_at_visit = records.iter().filter(|r| r.death_at_visit).count();
    stats.without_current_meds = records
        .iter()
        .filter(|r| r.medications.current_meds == 0)
        .count();
    stats.readmissions_90_day = records.iter().filter(|r| r.readmission_90_day).count();
    stats.readmissions_30_day = records.iter().filter(|r| r.readmission_30_day).count();

    Ok(CohortOutput { records, stats })
}
