//! CLI argument definitions.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

/// Default output file name, written relative to the working directory.
pub const DEFAULT_OUTPUT: &str = "overdose_readmissions.csv";

#[derive(Parser)]
#[command(
    name = "odr",
    version,
    about = "Overdose readmission cohort - derive readmission indicators from encounter data",
    long_about = "Build a cohort of drug-overdose encounters for patients aged 18-35,\n\
                  count medications active at each visit, and flag 30/90-day\n\
                  readmissions. Reads allergies, encounters, medications, patients,\n\
                  and procedures tables and writes one CSV file."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow patient identifiers in trace-level logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Build the cohort and write the output file.
    Run(RunArgs),

    /// List encounter reason descriptions by frequency.
    Reasons(ReasonsArgs),
}

#[derive(Parser, Debug, Clone)]
pub struct RunArgs {
    /// Directory containing the five source tables.
    #[arg(long = "data-dir", value_name = "DIR", default_value = ".")]
    pub data_dir: PathBuf,

    /// Output CSV path.
    #[arg(long = "output", short = 'o', value_name = "PATH", default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// JSON file with cohort options; omitted fields keep their defaults.
    #[arg(long = "options", value_name = "FILE")]
    pub options: Option<PathBuf>,

    /// Earliest encounter start date included (YYYY-MM-DD).
    #[arg(long = "cutoff", value_name = "DATE")]
    pub cutoff: Option<NaiveDate>,

    /// Minimum age at visit, inclusive.
    #[arg(long = "min-age", value_name = "YEARS")]
    pub min_age: Option<i64>,

    /// Maximum age at visit, inclusive.
    #[arg(long = "max-age", value_name = "YEARS")]
    pub max_age: Option<i64>,

    /// Build the cohort and print the summary without writing the output file.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Number of output rows to print after the run (0 to disable).
    #[arg(long = "preview", value_name = "ROWS", default_value_t = 10)]
    pub preview: usize,
}

impl RunArgs {
    /// Arguments for a run over `data_dir` with all defaults.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            output: PathBuf::from(DEFAULT_OUTPUT),
            options: None,
            cutoff: None,
            min_age: None,
            max_age: None,
            dry_run: false,
            preview: 10,
        }
    }
}

#[derive(Parser, Debug, Clone)]
pub struct ReasonsArgs {
    /// Directory containing the encounters table.
    #[arg(long = "data-dir", value_name = "DIR", default_value = ".")]
    pub data_dir: PathBuf,

    /// Show only the most frequent reasons.
    #[arg(long = "top", value_name = "N")]
    pub top: Option<usize>,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
