//! Cohort options from the `--options` file and CLI overrides.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use odr_model::CohortOptions;

use crate::cli::RunArgs;

/// Load cohort options from a JSON file. Omitted fields keep their defaults.
pub fn load_options_file(path: &Path) -> Result<CohortOptions> {
    let text = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parse options {}", path.display()))
}

/// Resolve the options for a run: defaults, then the options file, then flags.
pub fn resolve_options(args: &RunArgs) -> Result<CohortOptions> {
    let mut options = match &args.options {
        Some(path) => load_options_file(path)?,
        None => CohortOptions::default(),
    };
    if let Some(cutoff) = args.cutoff {
        options.cutoff_date = cutoff;
    }
    if let Some(min_age) = args.min_age {
        options.min_age = min_age;
    }
    if let Some(max_age) = args.max_age {
        options.max_age = max_age;
    }
    options.validate().context("invalid cohort options")?;
    Ok(options)
}
