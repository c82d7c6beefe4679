//! Output generation for the roster consolidator: a single-sheet `.xlsx`
//! workbook built from sparse [`roster_model::OutputRow`]s.

pub mod error;
pub mod writer;

pub use error::{OutputError, Result};
pub use writer::{DEFAULT_SHEET_NAME, build_workbook, write_workbook};
