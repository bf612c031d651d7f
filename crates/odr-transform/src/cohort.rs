//! Cohort selection.
//!
//! An encounter enters the cohort when its reason is a drug overdose, it
//! started on or after the cutoff date, and the patient's age at the visit
//! lies within the configured range. Encounters whose patient is unknown or
//! has no birth date have no age and never pass the age filter.

use std::collections::HashMap;

use chrono::NaiveDate;
use tracing::debug;

use odr_model::{CohortEncounter, CohortOptions, Encounter, Patient};

/// Mean Gregorian year length in days.
const DAYS_PER_YEAR: f64 = 365.2425;

/// Encounters selected for the cohort, with the count before the age filter.
#[derive(Debug, Clone, Default)]
pub struct CohortSelection {
    pub encounters: Vec<CohortEncounter>,
    /// Overdose encounters on or after the cutoff, before the age filter.
    pub overdose_encounters: usize,
}

/// Whole years between `birth` and `visit`, using the mean Gregorian year.
pub fn age_in_years(birth: NaiveDate, visit: NaiveDate) -> i64 {
    let days = (visit - birth).num_days() as f64;
    (days / DAYS_PER_YEAR).floor() as i64
}

/// Select cohort encounters, preserving the input order.
pub fn select_cohort(
    encounters: &[Encounter],
    patients: &[Patient],
    options: &CohortOptions,
) -> CohortSelection {
    let mut by_id: HashMap<&str, &Patient> = HashMap::with_capacity(patients.len());
    for patient in patients {
        by_id.entry(patient.id.as_str()).or_insert(patient);
    }

    let mut selection = CohortSelection::default();
    for encounter in encounters {
        if encounter.reason_code != Some(options.reason_code) {
            continue;
        }
        let Some(visit_date) = encounter.start.filter(|start| *start >= options.cutoff_date) else {
            continue;
        };
        selection.overdose_encounters += 1;

        let patient = by_id.get(encounter.patient_id.as_str()).copied();
        let age = patient
            .and_then(|patient| patient.birth_date)
            .map(|birth| age_in_years(birth, visit_date));
        let Some(age_at_visit) = age.filter(|age| options.age_in_range(*age)) else {
            debug!(encounter_id = %encounter.id, age = ?age, "outside age range");
            continue;
        };

        let death_date = patient.and_then(|patient| patient.death_date);
        let death_at_visit = matches!(
            (death_date, encounter.stop),
            (Some(death), Some(stop)) if death == stop
        );

        selection.encounters.push(CohortEncounter {
            encounter_id: encounter.id.clone(),
            patient_id: encounter.patient_id.clone(),
            visit_date,
            stop_date: encounter.stop,
            age_at_visit,
            death_at_visit,
        });
    }
    selection
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn encounter(id: &str, patient: &str, code: Option<u64>, start: NaiveDate) -> Encounter {
        Encounter {
            id: id.to_string(),
            patient_id: patient.to_string(),
            reason_code: code,
            reason_description: None,
            start: Some(start),
            stop: Some(start),
        }
    }

    fn patient(id: &str, birth: Option<NaiveDate>, death: Option<NaiveDate>) -> Patient {
        Patient {
            id: id.to_string(),
            birth_date: birth,
            death_date: death,
        }
    }

    #[test]
    fn age_floors_partial_years() {
        assert_eq!(age_in_years(date(1980, 1, 1), date(1998, 1, 1)), 18);
        assert_eq!(age_in_years(date(1980, 1, 2), date(1998, 1, 1)), 17);
        assert_eq!(age_in_years(date(1970, 1, 1), date(2006, 1, 1)), 36);
    }

    #[test]
    fn filters_reason_cutoff_and_age() {
        let options = CohortOptions::default();
        let encounters = vec![
            encounter("E1", "P1", Some(55_680_006), date(2005, 1, 1)),
            encounter("E2", "P1", Some(185_349_003), date(2005, 2, 1)),
            encounter("E3", "P1", Some(55_680_006), date(1999, 7, 14)),
            encounter("E4", "P1", Some(55_680_006), date(1999, 7, 15)),
            encounter("E5", "P2", Some(55_680_006), date(2005, 1, 1)),
            encounter("E6", "P3", Some(55_680_006), date(2005, 1, 1)),
        ];
        let patients = vec![
            patient("P1", Some(date(1975, 1, 1)), None),
            patient("P2", Some(date(1950, 1, 1)), None),
        ];

        let selection = select_cohort(&encounters, &patients, &options);

        let ids: Vec<&str> = selection
            .encounters
            .iter()
            .map(|e| e.encounter_id.as_str())
            .collect();
        assert_eq!(ids, vec!["E1", "E4"]);
        assert_eq!(selection.overdose_encounters, 4);
        assert_eq!(selection.encounters[0].age_at_visit, 30);
        assert_eq!(selection.encounters[1].age_at_visit, 24);
    }

    #[test]
    fn death_at_visit_matches_stop_date() {
        let options = CohortOptions::default();
        let mut died = encounter("E1", "P1", Some(55_680_006), date(2005, 1, 1));
        died.stop = Some(date(2005, 1, 2));
        let survived = encounter("E2", "P2", Some(55_680_006), date(2005, 1, 1));
        let no_stop = Encounter {
            stop: None,
            ..encounter("E3", "P3", Some(55_680_006), date(2005, 1, 1))
        };
        let patients = vec![
            patient("P1", Some(date(1980, 1, 1)), Some(date(2005, 1, 2))),
            patient("P2", Some(date(1980, 1, 1)), Some(date(2010, 1, 1))),
            patient("P3", Some(date(1980, 1, 1)), Some(date(2005, 1, 1))),
        ];

        let selection = select_cohort(&[died, survived, no_stop], &patients, &options);

        let flags: Vec<bool> = selection
            .encounters
            .iter()
            .map(|e| e.death_at_visit)
            .collect();
        assert_eq!(flags, vec![true, false, false]);
    }

    #[test]
    fn missing_birth_date_is_excluded() {
        let options = CohortOptions::default();
        let encounters = vec![encounter("E1", "P1", Some(55_680_006), date(2005, 1, 1))];
        let patients = vec![patient("P1", None, None)];
        let selection = select_cohort(&encounters, &patients, &options);
        assert!(selection.encounters.is_empty());
        assert_eq!(selection.overdose_encounters, 1);
    }
}
