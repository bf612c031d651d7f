//! Medication exposure at each cohort visit.
//!
//! Medications join to the cohort by patient only; the medication's own
//! encounter reference is not used. Exposure depends on the patient and the
//! visit date alone, so counts are aggregated once per (patient, visit date)
//! key and shared by every encounter with that key.

use std::collections::HashMap;

use chrono::NaiveDate;

use odr_model::{CohortEncounter, CohortOptions, Medication, MedicationCounts};

/// Count medications active on each encounter's visit date.
///
/// Returns one entry per cohort encounter, in the same order. Encounters whose
/// patient has no medications, or none active on the visit date, get zero
/// counts.
pub fn count_active_medications(
    cohort: &[CohortEncounter],
    medications: &[Medication],
    options: &CohortOptions,
) -> Vec<MedicationCounts> {
    let mut by_patient: HashMap<&str, Vec<&Medication>> = HashMap::new();
    for medication in medications {
        by_patient
            .entry(medication.patient_id.as_str())
            .or_default()
            .push(medication);
    }

    let mut by_key: HashMap<(&str, NaiveDate), MedicationCounts> = HashMap::new();
    cohort
        .iter()
        .map(|encounter| {
            let key = (encounter.patient_id.as_str(), encounter.visit_date);
            *by_key.entry(key).or_insert_with(|| {
                by_patient
                    .get(key.0)
                    .map(|meds| counts_on(meds, key.1, options))
                    .unwrap_or_default()
            })
        })
        .collect()
}

fn counts_on(
    medications: &[&Medication],
    date: NaiveDate,
    options: &CohortOptions,
) -> MedicationCounts {
    let mut counts = MedicationCounts::default();
    for medication in medications {
        if !medication.is_active_on(date, options.open_ended_stop) {
            continue;
        }
        counts.current_meds += 1;
        if options.is_opioid(medication.code) {
            counts.current_opioids += 1;
        }
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn visit(id: &str, patient: &str, visit_date: NaiveDate) -> CohortEncounter {
        CohortEncounter {
            encounter_id: id.to_string(),
            patient_id: patient.to_string(),
            visit_date,
            stop_date: Some(visit_date),
            age_at_visit: 25,
            death_at_visit: false,
        }
    }

    fn medication(
        patient: &str,
        code: u64,
        start: NaiveDate,
        stop: Option<NaiveDate>,
    ) -> Medication {
        Medication {
            patient_id: patient.to_string(),
            encounter_id: None,
            code: Some(code),
            description: None,
            start: Some(start),
            stop,
        }
    }

    #[test]
    fn open_ended_opioid_counts_as_current() {
        let options = CohortOptions::default();
        let cohort = vec![visit("E1", "P", date(2000, 6, 1))];
        let meds = vec![medication("P", 316_049, date(2000, 1, 1), None)];

        let counts = count_active_medications(&cohort, &meds, &options);

        assert_eq!(
            counts,
            vec![MedicationCounts {
                current_meds: 1,
                current_opioids: 1
            }]
        );
    }

    #[test]
    fn counts_only_active_medications_of_same_patient() {
        let options = CohortOptions::default();
        let cohort = vec![
            visit("E1", "P1", date(2001, 3, 1)),
            visit("E2", "P2", date(2001, 3, 1)),
            visit("E3", "P3", date(2001, 3, 1)),
        ];
        let meds = vec![
            medication("P1", 316_049, date(2001, 1, 1), Some(date(2001, 2, 1))),
            medication("P1", 834_061, date(2001, 1, 1), Some(date(2001, 12, 1))),
            medication("P1", 429_503, date(2001, 3, 1), Some(date(2001, 3, 1))),
            medication("P2", 406_022, date(2002, 1, 1), None),
        ];

        let counts = count_active_medications(&cohort, &meds, &options);

        assert_eq!(counts[0].current_meds, 2);
        assert_eq!(counts[0].current_opioids, 1);
        assert_eq!(counts[1], MedicationCounts::default());
        assert_eq!(counts[2], MedicationCounts::default());
    }

    #[test]
    fn encounters_sharing_a_key_share_counts() {
        let options = CohortOptions::default();
        let cohort = vec![
            visit("E1", "P1", date(2001, 3, 1)),
            visit("E2", "P1", date(2001, 3, 1)),
        ];
        let meds = vec![medication("P1", 316_049, date(2001, 1, 1), None)];

        let counts = count_active_medications(&cohort, &meds, &options);

        assert_eq!(counts[0], counts[1]);
        assert_eq!(counts[0].current_meds, 1);
    }
}
