//! End-to-end tests for the `run` and `reasons` commands.

use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use odr_cli::cli::{ReasonsArgs, RunArgs};
use odr_cli::commands::{run_cohort, run_reasons};
use odr_model::SourceTable;
use odr_report::file_sha256;
use tempfile::TempDir;

const ENCOUNTERS: &str = "\
Id,START,STOP,PATIENT,CODE,DESCRIPTION,REASONCODE,REASONDESCRIPTION
E0,1998-01-01T08:00:00Z,1998-01-01T09:00:00Z,P1,50849002,Emergency,55680006,Drug overdose
E1,2005-03-01T10:00:00Z,2005-03-01T14:00:00Z,P1,50849002,Emergency,55680006,Drug overdose
E2,2005-04-15T10:00:00Z,2005-04-15T12:00:00Z,P1,50849002,Emergency,55680006,Drug overdose
E3,2005-06-01T10:00:00Z,2005-06-01T12:00:00Z,P2,50849002,Emergency,55680006,Drug overdose
E4,2006-05-01T22:00:00Z,2006-05-01T23:30:00Z,P3,50849002,Emergency,55680006,Drug overdose
E5,2006-06-01T09:00:00Z,2006-06-01T09:30:00Z,P1,185349003,Checkup,,
E6,2006-07-01T09:00:00Z,2006-07-01T09:30:00Z,P1,185349003,Checkup,,Routine checkup
";

const PATIENTS: &str = "\
Id,BIRTHDATE,DEATHDATE
P1,1980-06-15,
P2,1950-02-01,
P3,1985-01-01,2006-05-01
";

const MEDICATIONS: &str = "\
START,STOP,PATIENT,ENCOUNTER,CODE,DESCRIPTION
2004-01-01T00:00:00Z,,P1,E0,316049,Hydrocodone
2001-01-01T00:00:00Z,2002-01-01T00:00:00Z,P3,E4,834061,Penicillin
";

fn write_tables(dir: &Path) {
    let files = [
        ("allergies.csv", "START,STOP,PATIENT,CODE\n"),
        ("encounters.csv", ENCOUNTERS),
        ("medications.csv", MEDICATIONS),
        ("patients.csv", PATIENTS),
        ("procedures.csv", "DATE,PATIENT,CODE\n2005-03-01,P1,1\n"),
    ];
    for (name, contents) in files {
        fs::write(dir.join(name), contents).expect("write table");
    }
}

#[test]
fn run_writes_cohort_csv() {
    let dir = TempDir::new().unwrap();
    write_tables(dir.path());
    let mut args = RunArgs::new(dir.path());
    args.output = dir.path().join("out").join("cohort.csv");
    args.preview = 2;

    let result = run_cohort(&args).expect("run cohort");

    let contents = fs::read_to_string(&args.output).unwrap();
    assert_eq!(
        contents,
        "PATIENT_ID,ENCOUNTER_ID,HOSPITAL_ENCOUNTER_DATE,AGE_AT_VISIT,DEATH_AT_VISIT_IND,\
COUNT_CURRENT_MEDS,CURRENT_OPIOID_IND,READMISSION_90_DAY_IND,READMISSION_30_DAY_IND,\
FIRST_READMISSION_DATE\n\
P1,E1,2005-03-01,24,0,1,1,1,0,2005-04-15\n\
P1,E2,2005-04-15,24,0,1,1,0,0,\n\
P3,E4,2006-05-01,21,1,0,0,0,0,\n"
    );

    let stats = &result.stats;
    assert_eq!(stats.tables.get(SourceTable::Encounters), Some(7));
    assert_eq!(stats.tables.get(SourceTable::Procedures), Some(1));
    assert_eq!(stats.tables.get(SourceTable::Allergies), Some(0));
    assert_eq!(stats.overdose_encounters, 4);
    assert_eq!(stats.cohort_encounters, 3);
    assert_eq!(stats.distinct_patients, 2);
    assert_eq!(stats.deaths_at_visit, 1);
    assert_eq!(stats.without_current_meds, 1);
    assert_eq!(stats.readmissions_90_day, 1);
    assert_eq!(stats.readmissions_30_day, 0);

    let output = result.output.expect("output written");
    assert_eq!(output.rows, 3);
    assert_eq!(output.sha256, file_sha256(&args.output).unwrap());
    assert_eq!(result.preview.len(), 2);
    assert_eq!(result.preview[0].encounter_id, "E1");
}

#[test]
fn dry_run_skips_output() {
    let dir = TempDir::new().unwrap();
    write_tables(dir.path());
    let mut args = RunArgs::new(dir.path());
    args.output = dir.path().join("cohort.csv");
    args.dry_run = true;

    let result = run_cohort(&args).expect("run cohort");

    assert!(result.output.is_none());
    assert!(!args.output.exists());
    assert_eq!(result.stats.cohort_encounters, 3);
}

#[test]
fn flags_override_defaults() {
    let dir = TempDir::new().unwrap();
    write_tables(dir.path());
    let mut args = RunArgs::new(dir.path());
    args.dry_run = true;
    args.cutoff = NaiveDate::from_ymd_opt(2006, 1, 1);
    args.max_age = Some(60);

    let result = run_cohort(&args).expect("run cohort");

    assert_eq!(result.options.max_age, 60);
    assert_eq!(result.stats.overdose_encounters, 1);
    assert_eq!(result.stats.cohort_encounters, 1);
}

#[test]
fn options_file_is_applied() {
    let dir = TempDir::new().unwrap();
    write_tables(dir.path());
    let options = dir.path().join("options.json");
    fs::write(&options, r#"{"min_age": 40, "max_age": 60}"#).unwrap();
    let mut args = RunArgs::new(dir.path());
    args.dry_run = true;
    args.options = Some(options);

    let result = run_cohort(&args).expect("run cohort");

    assert_eq!(result.stats.cohort_encounters, 1);
    assert_eq!(result.preview[0].patient_id, "P2");
    assert_eq!(result.preview[0].age_at_visit, 55);
}

#[test]
fn invalid_age_range_fails() {
    let dir = TempDir::new().unwrap();
    write_tables(dir.path());
    let mut args = RunArgs::new(dir.path());
    args.dry_run = true;
    args.min_age = Some(40);
    args.max_age = Some(20);

    assert!(run_cohort(&args).is_err());
}

#[test]
fn missing_table_fails_without_output() {
    let dir = TempDir::new().unwrap();
    write_tables(dir.path());
    fs::remove_file(dir.path().join("procedures.csv")).unwrap();
    let mut args = RunArgs::new(dir.path());
    args.output = dir.path().join("cohort.csv");

    let error = run_cohort(&args).unwrap_err();

    assert!(format!("{error:#}").contains("procedures"));
    assert!(!args.output.exists());
}

#[test]
fn reasons_are_counted() {
    let dir = TempDir::new().unwrap();
    write_tables(dir.path());
    let args = ReasonsArgs {
        data_dir: dir.path().to_path_buf(),
        top: None,
    };

    let reasons = run_reasons(&args).expect("count reasons");

    assert_eq!(reasons.len(), 2);
    assert_eq!(reasons[0].description, "Drug overdose");
    assert_eq!(reasons[0].code, Some(55_680_006));
    assert_eq!(reasons[0].count, 5);
    assert_eq!(reasons[1].description, "Routine checkup");

    let top = run_reasons(&ReasonsArgs { top: Some(1), ..args }).unwrap();
    assert_eq!(top.len(), 1);
}
