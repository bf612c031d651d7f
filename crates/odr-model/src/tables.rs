//! The five source tables read by the loader.

use std::fmt;

/// A source table, identified by the file stem it is read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SourceTable {
    Allergies,
    Encounters,
    Medications,
    Patients,
    Procedures,
}

impl SourceTable {
    /// All tables in load order.
    pub const ALL: [SourceTable; 5] = [
        SourceTable::Allergies,
        SourceTable::Encounters,
        SourceTable::Medications,
        SourceTable::Patients,
        SourceTable::Procedures,
    ];

    /// File stem of the table (`encounters` for `encounters` or `encounters.csv`).
    pub const fn file_stem(self) -> &'static str {
        match self {
            Self::Allergies => "allergies",
            Self::Encounters => "encounters",
            Self::Medications => "medications",
            Self::Patients => "patients",
            Self::Procedures => "procedures",
        }
    }

    /// Columns the pipeline reads from this table.
    pub const fn required_columns(self) -> &'static [&'static str] {
        match self {
            Self::Encounters => &[
                "Id",
                "START",
                "STOP",
                "PATIENT",
                "REASONCODE",
                "REASONDESCRIPTION",
            ],
            Self::Patients => &["Id", "BIRTHDATE", "DEATHDATE"],
            Self::Medications => &["START", "STOP", "PATIENT", "ENCOUNTER", "CODE", "DESCRIPTION"],
            Self::Allergies | Self::Procedures => &[],
        }
    }
}

impl fmt::Display for SourceTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_stem())
    }
}
