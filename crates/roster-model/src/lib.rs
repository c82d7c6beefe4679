//! Data model for the expert roster consolidator.
//!
//! Holds the types every other crate speaks: the [`CellGrid`] read
//! abstraction, extracted [`Record`]s, the input [`FormConfig`] and output
//! [`OutputLayout`] configuration, and the [`ResultSet`] that groups records by
//! source file.

pub mod error;
pub mod fields;
pub mod form;
pub mod grid;
pub mod output;
pub mod record;
pub mod result_set;

pub use error::{ModelError, Result};
pub use form::{DerivedFieldNames, FieldOffset, FormConfig, LayoutDescriptor};
pub use grid::{CellGrid, CellRef, CellValue, MemoryGrid, column_letters};
pub use output::{ColumnBase, OutputColumn, OutputLayout, OutputRow};
pub use record::Record;
pub use result_set::{ResultSet, SourceGroup};
