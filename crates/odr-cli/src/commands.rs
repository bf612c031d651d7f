use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{info, info_span, trace};

use odr_ingest::{load_encounters, load_source_tables, resolve_table};
use odr_model::SourceTable;
use odr_report::write_cohort_csv;
use odr_transform::{ReasonCount, build_cohort, count_reasons};

use crate::cli::{ReasonsArgs, RunArgs};
use crate::config::resolve_options;
use crate::logging::redact_value;
use crate::types::RunResult;

pub fn run_cohort(args: &RunArgs) -> Result<RunResult> {
    let run_span = info_span!("run", data_dir = %args.data_dir.display());
    let _run_guard = run_span.enter();
    let run_start = Instant::now();

    let options = resolve_options(args)?;

    let tables = info_span!("load")
        .in_scope(|| load_source_tables(&args.data_dir))
        .with_context(|| format!("load tables from {}", args.data_dir.display()))?;

    let mut cohort = build_cohort(
        &tables.encounters,
        &tables.patients,
        &tables.medications,
        &options,
    )
    .context("build cohort")?;
    cohort.stats.tables = tables.counts;

    for record in cohort.records.iter().filter(|r| r.readmission_90_day) {
        trace!(
            patient_id = redact_value(&record.patient_id),
            encounter_id = %record.encounter_id,
            encounter_date = %record.encounter_date,
            readmission_date = ?record.first_readmission_date,
            "readmission"
        );
    }

    let output = if args.dry_run {
        info!("dry run: output not written");
        None
    } else {
        let written = info_span!("write")
            .in_scope(|| write_cohort_csv(&args.output, &cohort.records))
            .with_context(|| format!("write {}", args.output.display()))?;
        Some(written)
    };

    info!(
        records = cohort.records.len(),
        duration_ms = run_start.elapsed().as_millis(),
        "run complete"
    );

    let preview = cohort.records.iter().take(args.preview).cloned().collect();
    Ok(RunResult {
        data_dir: args.data_dir.clone(),
        options,
        stats: cohort.stats,
        output,
        preview,
    })
}

pub fn run_reasons(args: &ReasonsArgs) -> Result<Vec<ReasonCount>> {
    let path = resolve_table(&args.data_dir, SourceTable::Encounters)?;
    let encounters =
        load_encounters(&path).with_context(|| format!("load {}", path.display()))?;
    let mut counts = count_reasons(&encounters);
    if let Some(top) = args.top {
        counts.truncate(top);
    }
    Ok(counts)
}
