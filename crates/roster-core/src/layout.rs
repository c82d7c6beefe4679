//! Placement of record fields into output rows.

use roster_model::{OutputLayout, OutputRow, Record};

/// Places each configured field of `record` at its column.
///
/// Fields the record lacks are written as empty strings; columns the layout
/// does not mention stay unset.
pub fn to_row(record: &Record, layout: &OutputLayout) -> OutputRow {
    let mut row = OutputRow::new();
    for entry in &layout.columns {
        row.set(layout.sheet_column(entry.column), record.value(&entry.field));
    }
    row
}

/// Field names at their configured columns, filled in declaration order.
pub fn header_row(layout: &OutputLayout) -> OutputRow {
    let mut row = OutputRow::new();
    for entry in &layout.columns {
        row.set(layout.sheet_column(entry.column), entry.field.clone());
    }
    row
}

/// Reads a record back out of a row built by [`to_row`].
///
/// Only fields the layout maps are recovered.
pub fn from_row(row: &OutputRow, layout: &OutputLayout) -> Record {
    layout
        .columns
        .iter()
        .map(|entry| {
            let value = row.get(layout.sheet_column(entry.column)).unwrap_or("");
            (entry.field.clone(), value.to_string())
        })
        .collect()
}
