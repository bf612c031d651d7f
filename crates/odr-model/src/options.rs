//! Configuration options for cohort selection and enrichment.
//!
//! The defaults reproduce the fixed analysis: drug-overdose encounters
//! (SNOMED 55680006) from 1999-07-15 onward, patients aged 18 to 35 at the
//! visit, three opioid medication codes, and open-ended prescriptions treated
//! as ongoing through 2021-12-31.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// SNOMED CT code for "Drug overdose" used as the encounter reason.
pub const DRUG_OVERDOSE_REASON_CODE: u64 = 55_680_006;

/// RxNorm codes counted as opioid medications.
pub const OPIOID_MEDICATION_CODES: [u64; 3] = [316_049, 429_503, 406_022];

/// Readmission look-ahead windows in days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadmissionWindows {
    /// Short window (30 days by default).
    pub short_days: i64,
    /// Long window (90 days by default). Also gates the first-readmission date.
    pub long_days: i64,
}

impl Default for ReadmissionWindows {
    fn default() -> Self {
        Self {
            short_days: 30,
            long_days: 90,
        }
    }
}

/// Options controlling cohort selection and derived indicators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CohortOptions {
    /// Encounter reason code that marks a drug overdose.
    pub reason_code: u64,

    /// Earliest encounter start date included in the cohort (inclusive).
    pub cutoff_date: NaiveDate,

    /// Minimum age at visit, inclusive.
    pub min_age: i64,

    /// Maximum age at visit, inclusive.
    pub max_age: i64,

    /// Medication codes flagged as opioids.
    pub opioid_codes: Vec<u64>,

    /// Stop date substituted for medications without one.
    pub open_ended_stop: NaiveDate,

    pub windows: ReadmissionWindows,
}

impl Default for CohortOptions {
    fn default() -> Self {
        Self {
            reason_code: DRUG_OVERDOSE_REASON_CODE,
            cutoff_date: ymd(1999, 7, 15),
            min_age: 18,
            max_age: 35,
            opioid_codes: OPIOID_MEDICATION_CODES.to_vec(),
            open_ended_stop: ymd(2021, 12, 31),
            windows: ReadmissionWindows::default(),
        }
    }
}

impl CohortOptions {
    #[must_use]
    pub fn with_age_range(mut self, min_age: i64, max_age: i64) -> Self {
        self.min_age = min_age;
        self.max_age = max_age;
        self
    }

    /// Returns true if the medication code is one of the configured opioids.
    pub fn is_opioid(&self, code: Option<u64>) -> bool {
        code.is_some_and(|code| self.opioid_codes.contains(&code))
    }

    /// Returns true if the age lies within the inclusive age range.
    pub fn age_in_range(&self, age: i64) -> bool {
        (self.min_age..=self.max_age).contains(&age)
    }

    /// Check that the ranges are ordered.
    ///
    /// # Errors
    ///
    /// Returns an error if `min_age > max_age` or the short readmission
    /// window is longer than the long one.
    pub fn validate(&self) -> Result<()> {
        if self.min_age > self.max_age {
            return Err(ModelError::InvalidAgeRange {
                min: self.min_age,
                max: self.max_age,
            });
        }
        if self.windows.short_days > self.windows.long_days {
            return Err(ModelError::InvalidWindows {
                short: self.windows.short_days,
                long: self.windows.long_days,
            });
        }
        Ok(())
    }
}

// Only called with literal calendar dates.
fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(NaiveDate::MIN)
}
