use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("invalid age range: min {min} is greater than max {max}")]
    InvalidAgeRange { min: i64, max: i64 },
    #[error("invalid readmission windows: short {short} days exceeds long {long} days")]
    InvalidWindows { short: i64, long: i64 },
}

pub type Result<T> = std::result::Result<T, ModelError>;
