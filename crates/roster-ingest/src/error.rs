//! Error types for source discovery and workbook reading.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while finding or reading source workbooks.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Directory not found or not a directory.
    #[error("directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// Failed to read directory entries.
    #[error("failed to read directory {path}: {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === Workbook Errors ===
    /// The workbook could not be opened or is not a spreadsheet.
    #[error("failed to open workbook {path}: {message}")]
    OpenWorkbook { path: PathBuf, message: String },

    /// The workbook contains no worksheets.
    #[error("workbook has no worksheet: {path}")]
    NoWorksheet { path: PathBuf },

    /// The first worksheet could not be read.
    #[error("failed to read sheet '{sheet}' in {path}: {message}")]
    SheetRead {
        path: PathBuf,
        sheet: String,
        message: String,
    },

    /// The merged-cell list of the first worksheet could not be read.
    #[error("failed to read merged cells of sheet '{sheet}' in {path}: {message}")]
    MergedCells {
        path: PathBuf,
        sheet: String,
        message: String,
    },
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IngestError::NoWorksheet {
            path: PathBuf::from("/data/form.xlsx"),
        };
        assert_eq!(err.to_string(), "workbook has no worksheet: /data/form.xlsx");
    }
}
