//! Output DataFrame construction.

use polars::prelude::{Column, DataFrame};

use odr_model::{CohortRecord, OUTPUT_DATE_FORMAT, OutputColumn};

use crate::error::Result;

fn indicator(flag: bool) -> i32 {
    i32::from(flag)
}

/// Build the output frame, one row per record, columns in output order.
///
/// Dates are rendered as `YYYY-MM-DD` strings; a missing first-readmission
/// date is null and written as an empty cell.
pub fn cohort_frame(records: &[CohortRecord]) -> Result<DataFrame> {
    let patient_ids: Vec<&str> = records.iter().map(|r| r.patient_id.as_str()).collect();
    let encounter_ids: Vec<&str> = records.iter().map(|r| r.encounter_id.as_str()).collect();
    let encounter_dates: Vec<String> = records
        .iter()
        .map(|r| r.encounter_date.format(OUTPUT_DATE_FORMAT).to_string())
        .collect();
    let ages: Vec<i64> = records.iter().map(|r| r.age_at_visit).collect();
    let deaths: Vec<i32> = records.iter().map(|r| indicator(r.death_at_visit)).collect();
    let current_meds: Vec<i64> = records.iter().map(|r| r.medications.current_meds).collect();
    let current_opioids: Vec<i64> = records
        .iter()
        .map(|r| r.medications.current_opioids)
        .collect();
    let readmit_90: Vec<i32> = records
        .iter()
        .map(|r| indicator(r.readmission_90_day))
        .collect();
    let readmit_30: Vec<i32> = records
        .iter()
        .map(|r| indicator(r.readmission_30_day))
        .collect();
    let first_readmission: Vec<Option<String>> = records
        .iter()
        .map(|r| {
            r.first_readmission_date
                .map(|d| d.format(OUTPUT_DATE_FORMAT).to_string())
        })
        .collect();

    let columns = vec![
        Column::new(OutputColumn::PatientId.name().into(), patient_ids),
        Column::new(OutputColumn::EncounterId.name().into(), encounter_ids),
        Column::new(
            OutputColumn::HospitalEncounterDate.name().into(),
            encounter_dates,
        ),
        Column::new(OutputColumn::AgeAtVisit.name().into(), ages),
        Column::new(OutputColumn::DeathAtVisitInd.name().into(), deaths),
        Column::new(OutputColumn::CountCurrentMeds.name().into(), current_meds),
        Column::new(OutputColumn::CurrentOpioidInd.name().into(), current_opioids),
        Column::new(OutputColumn::Readmission90DayInd.name().into(), readmit_90),
        Column::new(OutputColumn::Readmission30DayInd.name().into(), readmit_30),
        Column::new(
            OutputColumn::FirstReadmissionDate.name().into(),
            first_readmission,
        ),
    ];
    Ok(DataFrame::new(columns)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use odr_model::{MedicationCounts, output_header};

    #[test]
    fn frame_has_output_columns_in_order() {
        let record = CohortRecord {
            patient_id: "P1".to_string(),
            encounter_id: "E1".to_string(),
            encounter_date: NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(),
            age_at_visit: 22,
            death_at_visit: true,
            medications: MedicationCounts {
                current_meds: 3,
                current_opioids: 1,
            },
            readmission_90_day: true,
            readmission_30_day: false,
            first_readmission_date: NaiveDate::from_ymd_opt(2000, 2, 15),
        };

        let df = cohort_frame(&[record]).unwrap();

        let names: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|name| name.to_string())
            .collect();
        assert_eq!(names, output_header());
        assert_eq!(df.height(), 1);
        let first = df.column("FIRST_READMISSION_DATE").unwrap().str().unwrap();
        assert_eq!(first.get(0), Some("2000-02-15"));
        let deaths = df.column("DEATH_AT_VISIT_IND").unwrap().i32().unwrap();
        assert_eq!(deaths.get(0), Some(1));
    }

    #[test]
    fn empty_records_give_empty_frame() {
        let df = cohort_frame(&[]).unwrap();
        assert_eq!(df.height(), 0);
        assert_eq!(df.width(), 10);
    }
}
