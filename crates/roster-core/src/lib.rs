//! Core logic of the expert roster consolidator.
//!
//! - [`text`]: whitespace/control stripping applied to every cell value
//! - [`id_number`]: document type, nationality, sex and birth date from a
//!   resident ID number
//! - [`extract`]: anchor search and offset reads over a [`roster_model::CellGrid`]
//! - [`layout`]: record to sparse output row placement
//! - [`aggregate`]: per-source grouping and consolidated row assembly
//!
//! Nothing in this crate performs I/O.

pub mod aggregate;
pub mod extract;
pub mod id_number;
pub mod layout;
pub mod text;

pub use aggregate::{aggregate, build_rows};
pub use extract::{RecordExtractor, enrich, find_anchors, read_record};
pub use id_number::IdDerived;
pub use layout::{from_row, header_row, to_row};
pub use text::{normalize, normalize_cell};
