//! Run statistics.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::tables::SourceTable;

/// Row counts of the loaded source tables.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableCounts {
    pub rows: BTreeMap<String, usize>,
}

impl TableCounts {
    pub fn record(&mut self, table: SourceTable, rows: usize) {
        self.rows.insert(table.file_stem().to_string(), rows);
    }

    pub fn get(&self, table: SourceTable) -> Option<usize> {
        self.rows.get(table.file_stem()).copied()
    }
}

/// Counts collected while building the cohort.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CohortStats {
    pub tables: TableCounts,
    /// Overdose encounters on or after the cutoff date.
    pub overdose_encounters: usize,
    /// Encounters remaining after the age filter.
    pub cohort_encounters: usize,
    pub distinct_patients: usize,
    pub deaths_at_visit: usize,
    /// Encounters with no medication active on the visit date.
    pub without_current_meds: usize,
    pub readmissions_90_day: usize,
    pub readmissions_30_day: usize,
}
