//! Consolidated workbook writer.

use std::path::Path;

use roster_model::OutputRow;
use rust_xlsxwriter::Workbook;
use tracing::{debug, info};

use crate::error::{OutputError, Result};

/// Default name of the consolidated sheet.
pub const DEFAULT_SHEET_NAME: &str = "人员信息";

/// Builds a single-sheet workbook holding `rows` from the first sheet row down.
///
/// Unset and empty cells are left blank.
pub fn build_workbook(sheet_name: &str, rows: &[OutputRow]) -> Result<Workbook> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name(sheet_name)
        .map_err(|source| OutputError::SheetName {
            name: sheet_name.to_string(),
            source,
        })?;

    for (index, row) in rows.iter().enumerate() {
        let sheet_row = u32::try_from(index).unwrap_or(u32::MAX);
        for (column, value) in row.cells() {
            if value.is_empty() {
                continue;
            }
            worksheet
                .write_string(sheet_row, column, value)
                .map_err(|source| OutputError::Cell {
                    row: index,
                    column,
                    source,
                })?;
        }
    }
    debug!(sheet = %sheet_name, rows = rows.len(), "worksheet built");
    Ok(workbook)
}

/// Writes `rows` to a new workbook at `path`, replacing any existing file.
pub fn write_workbook(path: &Path, sheet_name: &str, rows: &[OutputRow]) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.is_dir()
    {
        return Err(OutputError::DirectoryNotFound {
            path: parent.to_path_buf(),
        });
    }

    let mut workbook = build_workbook(sheet_name, rows)?;
    workbook.save(path).map_err(|source| OutputError::Save {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), rows = rows.len(), "workbook written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_invalid_sheet_name() {
        let result = build_workbook("bad[name]", &[]);
        assert!(matches!(result, Err(OutputError::SheetName { .. })));
    }

    #[test]
    fn missing_parent_directory_is_reported() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("missing").join("output.xlsx");
        let result = write_workbook(&path, DEFAULT_SHEET_NAME, &[OutputRow::label("a")]);
        assert!(matches!(result, Err(OutputError::DirectoryNotFound { .. })));
        assert!(!path.exists());
    }
}
