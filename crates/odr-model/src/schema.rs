//! Output file schema.

/// Columns of the output file, in write order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputColumn {
    PatientId,
    EncounterId,
    HospitalEncounterDate,
    AgeAtVisit,
    DeathAtVisitInd,
    CountCurrentMeds,
    CurrentOpioidInd,
    Readmission90DayInd,
    Readmission30DayInd,
    FirstReadmissionDate,
}

impl OutputColumn {
    /// Header name written to the output file.
    pub const fn name(self) -> &'static str {
        match self {
            Self::PatientId => "PATIENT_ID",
            Self::EncounterId => "ENCOUNTER_ID",
            Self::HospitalEncounterDate => "HOSPITAL_ENCOUNTER_DATE",
            Self::AgeAtVisit => "AGE_AT_VISIT",
            Self::DeathAtVisitInd => "DEATH_AT_VISIT_IND",
            Self::CountCurrentMeds => "COUNT_CURRENT_MEDS",
            Self::CurrentOpioidInd => "CURRENT_OPIOID_IND",
            Self::Readmission90DayInd => "READMISSION_90_DAY_IND",
            Self::Readmission30DayInd => "READMISSION_30_DAY_IND",
            Self::FirstReadmissionDate => "FIRST_READMISSION_DATE",
        }
    }
}

/// Output columns in the order they are written.
pub const OUTPUT_COLUMNS: [OutputColumn; 10] = [
    OutputColumn::PatientId,
    OutputColumn::EncounterId,
    OutputColumn::HospitalEncounterDate,
    OutputColumn::AgeAtVisit,
    OutputColumn::DeathAtVisitInd,
    OutputColumn::CountCurrentMeds,
    OutputColumn::CurrentOpioidInd,
    OutputColumn::Readmission90DayInd,
    OutputColumn::Readmission30DayInd,
    OutputColumn::FirstReadmissionDate,
];

/// Date format used for every date column in the output.
pub const OUTPUT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Header names in write order.
pub fn output_header() -> Vec<&'static str> {
    OUTPUT_COLUMNS.iter().map(|column| column.name()).collect()
}
