use std::path::PathBuf;

use rust_xlsxwriter::XlsxError;
use thiserror::Error;

/// Errors raised while building or saving the consolidated workbook.
#[derive(Debug, Error)]
pub enum OutputError {
    /// The destination's parent directory does not exist.
    #[error("output directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// The sheet name was rejected (too long, or contains `[]:*?/\`).
    #[error("invalid sheet name '{name}': {source}")]
    SheetName {
        name: String,
        #[source]
        source: XlsxError,
    },

    /// A row has more rows or columns than a worksheet allows.
    #[error("cannot write cell at row {row}, column {column}: {source}")]
    Cell {
        row: usize,
        column: u16,
        #[source]
        source: XlsxError,
    },

    /// Saving the workbook failed.
    #[error("failed to save workbook {path}: {source}")]
    Save {
        path: PathBuf,
        #[source]
        source: XlsxError,
    },
}

pub type Result<T> = std::result::Result<T, OutputError>;
