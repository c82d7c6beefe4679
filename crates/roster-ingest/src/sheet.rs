//! Cell grid over the first worksheet of an `.xlsx` or `.xls` workbook.

use std::path::Path;

use calamine::{Data, Dimensions, ExcelDateTime, Range, Reader, Sheets, open_workbook_auto};
use chrono::NaiveTime;
use roster_model::{CellGrid, CellRef, CellValue};
use tracing::debug;

use crate::error::{IngestError, Result};

/// First worksheet of a workbook, with its merged-region anchors.
///
/// calamine addresses cells from `(0, 0)`; the grid exposes them 1-indexed.
#[derive(Debug, Clone)]
pub struct SheetGrid {
    sheet_name: String,
    range: Range<Data>,
    anchors: Vec<CellRef>,
}

impl SheetGrid {
    pub fn new(sheet_name: impl Into<String>, range: Range<Data>, merged: &[Dimensions]) -> Self {
        let anchors = merged
            .iter()
            .map(|region| CellRef::new(region.start.0 + 1, region.start.1 + 1))
            .collect();
        Self {
            sheet_name: sheet_name.into(),
            range,
            anchors,
        }
    }

    pub fn sheet_name(&self) -> &str {
        &self.sheet_name
    }
}

impl CellGrid for SheetGrid {
    fn cell(&self, at: CellRef) -> CellValue {
        let (Some(row), Some(col)) = (at.row.checked_sub(1), at.col.checked_sub(1)) else {
            return CellValue::Missing;
        };
        self.range
            .get_value((row, col))
            .and_then(cell_text)
            .into()
    }

    fn merged_anchors(&self) -> &[CellRef] {
        &self.anchors
    }
}

/// Text of a calamine cell. Empty and error cells have none.
///
/// Numbers use Rust's shortest float formatting, so a phone number stored as a
/// number reads back without a trailing `.0`. Date cells read as `YYYY/M/D`,
/// the same shape as a birth date derived from an ID number.
pub fn cell_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty | Data::Error(_) => None,
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => Some(s.clone()),
        Data::Float(v) => Some(format!("{v}")),
        Data::Int(v) => Some(format!("{v}")),
        Data::Bool(v) => Some(if *v { "TRUE" } else { "FALSE" }.to_string()),
        Data::DateTime(value) => Some(datetime_text(value)),
    }
}

/// Calendar value of a date cell; the time of day is kept only when set.
/// Durations and serials outside the calendar fall back to the raw number.
fn datetime_text(value: &ExcelDateTime) -> String {
    if value.is_duration() {
        return format!("{}", value.as_f64());
    }
    match value.as_datetime() {
        Some(at) if at.time() == NaiveTime::MIN => at.format("%Y/%-m/%-d").to_string(),
        Some(at) => at.format("%Y/%-m/%-d %H:%M:%S").to_string(),
        None => format!("{}", value.as_f64()),
    }
}

/// Opens `path` and returns a grid over its first worksheet.
pub fn read_first_sheet(path: &Path) -> Result<SheetGrid> {
    let mut workbook = open_workbook_auto(path).map_err(|e| IngestError::OpenWorkbook {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let sheet = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| IngestError::NoWorksheet {
            path: path.to_path_buf(),
        })?;

    let range = workbook
        .worksheet_range(&sheet)
        .map_err(|e| IngestError::SheetRead {
            path: path.to_path_buf(),
            sheet: sheet.clone(),
            message: e.to_string(),
        })?;

    let merged = merged_regions(&mut workbook, &sheet).map_err(|message| {
        IngestError::MergedCells {
            path: path.to_path_buf(),
            sheet: sheet.clone(),
            message,
        }
    })?;
    debug!(
        path = %path.display(),
        sheet = %sheet,
        merged_count = merged.len(),
        "worksheet loaded"
    );

    Ok(SheetGrid::new(sheet, range, &merged))
}

/// Merged regions of `sheet` in the order the workbook stores them.
fn merged_regions<RS>(
    workbook: &mut Sheets<RS>,
    sheet: &str,
) -> std::result::Result<Vec<Dimensions>, String>
where
    RS: std::io::Read + std::io::Seek,
{
    match workbook {
        Sheets::Xlsx(xlsx) => xlsx
            .worksheet_merge_cells(sheet)
            .unwrap_or(Ok(Vec::new()))
            .map_err(|e| e.to_string()),
        Sheets::Xls(xls) => Ok(xls.worksheet_merge_cells(sheet).unwrap_or_default()),
        // Neither format is discovered as a source; no anchors.
        _ => Ok(Vec::new()),
    }
}
