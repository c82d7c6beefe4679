//! Source ingestion for the roster consolidator.
//!
//! # Features
//!
//! - **Discovery**: list `.xlsx`/`.xls` workbooks in a folder, skipping lock
//!   files and the run's own output workbook
//! - **Sheet grids**: expose the first worksheet of a workbook, with its
//!   merged-region anchors, as a [`roster_model::CellGrid`]
//!
//! # Example
//!
//! ```ignore
//! use std::ffi::OsStr;
//! use std::path::Path;
//! use roster_ingest::{list_workbook_files, read_first_sheet};
//!
//! for path in list_workbook_files(Path::new("."), Some(OsStr::new("output.xlsx")))? {
//!     let grid = read_first_sheet(&path)?;
//! }
//! ```

mod discovery;
mod error;
mod sheet;

// === Error Types ===
pub use error::{IngestError, Result};

// === File Discovery ===
pub use discovery::{WORKBOOK_EXTENSIONS, is_workbook_path, list_workbook_files, source_name};

// === Worksheet Grids ===
pub use sheet::{SheetGrid, cell_text, read_first_sheet};
