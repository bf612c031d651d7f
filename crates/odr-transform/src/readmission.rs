//! Forward-looking readmission flags.
//!
//! Records are ordered by patient then encounter date, and each record is
//! compared with its immediate successor only when the successor belongs to
//! the same patient. The last encounter of a patient never gets a flag.

use odr_model::{CohortRecord, ReadmissionWindows};

/// Index of the next row in the same partition, for rows already ordered by
/// partition key.
pub fn next_in_partition<T, F>(rows: &[T], same_partition: F) -> Vec<Option<usize>>
where
    F: Fn(&T, &T) -> bool,
{
    rows.iter()
        .enumerate()
        .map(|(idx, row)| {
            let next = idx + 1;
            rows.get(next)
                .filter(|successor| same_partition(row, *successor))
                .map(|_| next)
        })
        .collect()
}

/// Sort records by patient and date, then set readmission flags and the
/// first-readmission date.
///
/// The sort is stable, so encounters of one patient on the same date keep
/// their input order.
pub fn assign_readmissions(records: &mut [CohortRecord], windows: ReadmissionWindows) {
    records.sort_by(|a, b| {
        a.patient_id
            .cmp(&b.patient_id)
            .then(a.encounter_date.cmp(&b.encounter_date))
    });

    let successors = next_in_partition(records, |a, b| a.patient_id == b.patient_id);
    for (idx, successor) in successors.into_iter().enumerate() {
        let next_date = successor.map(|next| records[next].encounter_date);
        let record = &mut records[idx];
        record.readmission_90_day = false;
        record.readmission_30_day = false;
        record.first_readmission_date = None;

        let Some(next_date) = next_date else {
            continue;
        };
        let gap = (next_date - record.encounter_date).num_days();
        if gap <= windows.long_days {
            record.readmission_90_day = true;
            record.first_readmission_date = Some(next_date);
        }
        if gap <= windows.short_days {
            record.readmission_30_day = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use odr_model::MedicationCounts;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn record(encounter: &str, patient: &str, day: NaiveDate) -> CohortRecord {
        CohortRecord {
            patient_id: patient.to_string(),
            encounter_id: encounter.to_string(),
            encounter_date: day,
            age_at_visit: 25,
            death_at_visit: false,
            medications: MedicationCounts::default(),
            readmission_90_day: false,
            readmission_30_day: false,
            first_readmission_date: None,
        }
    }

    #[test]
    fn successor_stays_within_partition() {
        let rows = ["a", "a", "b", "c", "c", "c"];
        let next = next_in_partition(&rows, |a, b| a == b);
        assert_eq!(next, vec![Some(1), None, None, Some(4), Some(5), None]);
    }

    #[test]
    fn forty_five_day_gap() {
        let mut records = vec![
            record("E2", "P", date(2000, 2, 15)),
            record("E1", "P", date(2000, 1, 1)),
        ];
        assign_readmissions(&mut records, ReadmissionWindows::default());

        assert_eq!(records[0].encounter_id, "E1");
        assert!(records[0].readmission_90_day);
        assert!(!records[0].readmission_30_day);
        assert_eq!(records[0].first_readmission_date, Some(date(2000, 2, 15)));

        assert!(!records[1].readmission_90_day);
        assert!(!records[1].readmission_30_day);
        assert_eq!(records[1].first_readmission_date, None);
    }

    #[test]
    fn window_edges_are_inclusive() {
        let mut records = vec![
            record("E1", "P", date(2000, 1, 1)),
            record("E2", "P", date(2000, 1, 31)),
            record("E3", "P", date(2000, 4, 30)),
            record("E4", "P", date(2000, 7, 30)),
        ];
        assign_readmissions(&mut records, ReadmissionWindows::default());

        // 30 days, then 90 days, then 91 days.
        assert!(records[0].readmission_30_day && records[0].readmission_90_day);
        assert!(!records[1].readmission_30_day && records[1].readmission_90_day);
        assert!(!records[2].readmission_90_day);
        assert_eq!(records[2].first_readmission_date, None);
    }

    #[test]
    fn no_readmission_across_patients() {
        let mut records = vec![
            record("E1", "P1", date(2000, 1, 1)),
            record("E2", "P2", date(2000, 1, 5)),
        ];
        assign_readmissions(&mut records, ReadmissionWindows::default());
        assert!(records.iter().all(|r| !r.readmission_90_day));
        assert!(records.iter().all(|r| r.first_readmission_date.is_none()));
    }

    #[test]
    fn same_day_encounters_keep_input_order() {
        let mut records = vec![
            record("E-late", "P", date(2000, 3, 1)),
            record("E-b", "P", date(2000, 1, 1)),
            record("E-a", "P", date(2000, 1, 1)),
        ];
        assign_readmissions(&mut records, ReadmissionWindows::default());

        let ids: Vec<&str> = records.iter().map(|r| r.encounter_id.as_str()).collect();
        assert_eq!(ids, vec!["E-b", "E-a", "E-late"]);
        assert_eq!(records[0].first_readmission_date, Some(date(2000, 1, 1)));
        assert!(records[0].readmission_30_day);
    }
}
