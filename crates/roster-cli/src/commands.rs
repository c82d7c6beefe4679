use anyhow::Result;
use comfy_table::{Cell, Table};
use tracing::{info, info_span};

use roster_cli::config::RosterConfig;
use roster_cli::pipeline::{discover, extract_all, write_output};
use roster_core::RecordExtractor;
use roster_model::column_letters;

use crate::cli::{ExtractArgs, LayoutArgs};
use crate::summary::{apply_table_style, header_cell};
use crate::types::RunResult;

pub fn run_layout(args: &LayoutArgs) -> Result<()> {
    let config = RosterConfig::load(args.config.as_deref())?;
    print_layout(&config);
    Ok(())
}

pub fn run_extract(args: &ExtractArgs) -> Result<RunResult> {
    let source_dir = &args.source_dir;
    let run_span = info_span!("run", dir = %source_dir.display());
    let _run_guard = run_span.enter();

    let config = effective_config(args)?;
    let output_path = args
        .output
        .clone()
        .unwrap_or_else(|| source_dir.join(&config.output_file));

    let paths = discover(source_dir, &output_path)?;
    let extractor = RecordExtractor::new(config.form.clone());
    let batch = extract_all(&paths, &extractor);

    let written = if args.dry_run {
        info!("dry run, output not written");
        false
    } else {
        let rows = write_output(
            &output_path,
            &config.sheet_name,
            &batch.result_set,
            &config.output,
        )?;
        info!(path = %output_path.display(), rows, "roster written");
        true
    };

    Ok(RunResult {
        source_dir: source_dir.clone(),
        output_path,
        written,
        total_records: batch.record_count(),
        has_errors: batch.has_failures(),
        sources: batch.sources,
    })
}

/// Loaded configuration with command-line overrides applied.
fn effective_config(args: &ExtractArgs) -> Result<RosterConfig> {
    let mut config = RosterConfig::load(args.config.as_deref())?;
    if let Some(name) = &args.sheet_name {
        config.sheet_name.clone_from(name);
    }
    if args.header {
        config.output.include_header = true;
    }
    config.validate()?;
    Ok(config)
}

fn print_layout(config: &RosterConfig) {
    let form = &config.form;
    println!("Anchor label: {}", form.anchor_label);

    let mut input = Table::new();
    input.set_header(vec![
        header_cell("Field"),
        header_cell("Row offset"),
        header_cell("Column offset"),
        header_cell("Role"),
    ]);
    apply_table_style(&mut input);
    for entry in form.layout.iter() {
        let role = if entry.field == form.name_field {
            "name"
        } else if entry.field == form.id_field {
            "ID number"
        } else {
            ""
        };
        input.add_row(vec![
            Cell::new(&entry.field),
            Cell::new(entry.row_offset),
            Cell::new(entry.col_offset),
            Cell::new(role),
        ]);
    }
    for derived in [
        &form.derived.document_type,
        &form.derived.nationality,
        &form.derived.sex,
        &form.derived.birth_date,
    ] {
        input.add_row(vec![
            Cell::new(derived),
            Cell::new("-"),
            Cell::new("-"),
            Cell::new("derived"),
        ]);
    }
    println!("{input}");

    let layout = &config.output;
    println!(
        "Output sheet: {} (column base {}, header {})",
        config.sheet_name,
        layout.base.offset(),
        if layout.include_header { "on" } else { "off" }
    );
    let mut output = Table::new();
    output.set_header(vec![
        header_cell("Field"),
        header_cell("Column"),
        header_cell("Sheet column"),
    ]);
    apply_table_style(&mut output);
    for entry in &layout.columns {
        let sheet_column = u32::from(layout.sheet_column(entry.column)) + 1;
        output.add_row(vec![
            Cell::new(&entry.field),
            Cell::new(entry.column),
            Cell::new(column_letters(sheet_column)),
        ]);
    }
    println!("{output}");
}

