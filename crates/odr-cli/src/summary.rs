use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use odr_model::{CohortRecord, OUTPUT_DATE_FORMAT, SourceTable, output_header};
use odr_transform::ReasonCount;

use crate::types::RunResult;

pub fn print_summary(result: &RunResult) {
    println!("Data: {}", result.data_dir.display());
    match &result.output {
        Some(output) => {
            println!("Output: {}", output.path.display());
            println!("SHA-256: {}", output.sha256);
        }
        None => println!("Output: (dry run, not written)"),
    }
    println!(
        "Cohort: reason {} from {}, ages {}-{}",
        result.options.reason_code,
        result.options.cutoff_date,
        result.options.min_age,
        result.options.max_age
    );

    let mut table = Table::new();
    table.set_header(vec![header_cell("Table"), header_cell("Rows")]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for source in SourceTable::ALL {
        let rows = result.stats.tables.get(source);
        table.add_row(vec![
            Cell::new(source.file_stem()),
            rows.map_or_else(|| dim_cell("-"), Cell::new),
        ]);
    }
    println!("{table}");

    let stats = &result.stats;
    let mut table = Table::new();
    table.set_header(vec![header_cell("Cohort"), header_cell("Count")]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    table.add_row(vec![
        Cell::new("Overdose encounters after cutoff"),
        Cell::new(stats.overdose_encounters),
    ]);
    table.add_row(vec![
        Cell::new("Encounters in age range")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(stats.cohort_encounters).add_attribute(Attribute::Bold),
    ]);
    table.add_row(vec![
        Cell::new("Distinct patients"),
        Cell::new(stats.distinct_patients),
    ]);
    table.add_row(vec![
        Cell::new("Deaths at visit"),
        count_cell(stats.deaths_at_visit, Color::Red),
    ]);
    table.add_row(vec![
        Cell::new("Without current medications"),
        count_cell(stats.without_current_meds, Color::Yellow),
    ]);
    table.add_row(vec![
        Cell::new("90-day readmissions"),
        count_cell(stats.readmissions_90_day, Color::Yellow),
    ]);
    table.add_row(vec![
        Cell::new("30-day readmissions"),
        count_cell(stats.readmissions_30_day, Color::Yellow),
    ]);
    println!("{table}");

    if !result.preview.is_empty() {
        println!();
        println!(
            "First {} of {} rows:",
            result.preview.len(),
            stats.cohort_encounters
        );
        println!("{}", preview_table(&result.preview));
    }
}

pub fn print_reasons(reasons: &[ReasonCount]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Reason"),
        header_cell("Code"),
        header_cell("Encounters"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    for reason in reasons {
        table.add_row(vec![
            Cell::new(&reason.description),
            reason.code.map_or_else(|| dim_cell("-"), Cell::new),
            Cell::new(reason.count),
        ]);
    }
    println!("{table}");
}

fn preview_table(records: &[CohortRecord]) -> Table {
    let mut table = Table::new();
    table.set_header(output_header().into_iter().map(header_cell));
    apply_table_style(&mut table);
    for column in 3..10 {
        align_column(&mut table, column, CellAlignment::Right);
    }
    for record in records {
        table.add_row(vec![
            Cell::new(&record.patient_id),
            Cell::new(&record.encounter_id),
            Cell::new(record.encounter_date.format(OUTPUT_DATE_FORMAT)),
            Cell::new(record.age_at_visit),
            indicator_cell(record.death_at_visit),
            Cell::new(record.medications.current_meds),
            Cell::new(record.medications.current_opioids),
            indicator_cell(record.readmission_90_day),
            indicator_cell(record.readmission_30_day),
            record.first_readmission_date.map_or_else(
                || dim_cell("-"),
                |d| Cell::new(d.format(OUTPUT_DATE_FORMAT)),
            ),
        ]);
    }
    table
}

fn indicator_cell(flag: bool) -> Cell {
    if flag {
        Cell::new(1).fg(Color::Green).add_attribute(Attribute::Bold)
    } else {
        dim_cell(0)
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(80);
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value.to_string()).add_attribute(Attribute::Dim)
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}
