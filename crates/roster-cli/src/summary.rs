use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use roster_cli::pipeline::{SourceOutcome, SourceStatus};

use crate::types::RunResult;

pub fn print_summary(result: &RunResult) {
    println!("Source folder: {}", result.source_dir.display());
    if result.written {
        println!("Output: {}", result.output_path.display());
    } else {
        println!("Output: {} (dry run, not written)", result.output_path.display());
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Source"),
        header_cell("Records"),
        header_cell("Status"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Center);
    for outcome in &result.sources {
        table.add_row(vec![
            Cell::new(&outcome.source),
            records_cell(outcome),
            status_cell(&outcome.status),
        ]);
    }
    let failed = result.sources.iter().filter(|o| o.is_failed()).count();
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(result.total_records).add_attribute(Attribute::Bold),
        if failed > 0 {
            Cell::new(format!("{failed} failed"))
                .fg(Color::Red)
                .add_attribute(Attribute::Bold)
        } else {
            dim_cell(format!("{} sources", result.sources.len()))
        },
    ]);
    println!("{table}");

    if failed > 0 {
        eprintln!("Errors:");
        for outcome in &result.sources {
            if let SourceStatus::Failed { reason } = &outcome.status {
                eprintln!("- {}: {reason}", outcome.source);
            }
        }
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn records_cell(outcome: &SourceOutcome) -> Cell {
    match outcome.status {
        SourceStatus::Extracted { records: 0 } => dim_cell(0),
        SourceStatus::Extracted { records } => Cell::new(records),
        SourceStatus::Failed { .. } => dim_cell("-"),
    }
}

fn status_cell(status: &SourceStatus) -> Cell {
    match status {
        SourceStatus::Extracted { records: 0 } => Cell::new("empty").fg(Color::Yellow),
        SourceStatus::Extracted { .. } => Cell::new("✓")
            .fg(Color::Green)
            .add_attribute(Attribute::Bold),
        SourceStatus::Failed { .. } => Cell::new("failed")
            .fg(Color::Red)
            .add_attribute(Attribute::Bold),
    }
}

pub fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
