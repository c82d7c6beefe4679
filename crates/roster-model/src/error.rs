//! Error types for roster configuration values.

use thiserror::Error;

/// Errors raised when a form or output layout is internally inconsistent.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    /// The anchor label is empty after trimming.
    #[error("anchor label must not be empty")]
    EmptyAnchorLabel,

    /// The same field appears twice in an input layout.
    #[error("field '{field}' appears more than once in the input layout")]
    DuplicateLayoutField { field: String },

    /// A field the extractor depends on has no offset in the input layout.
    #[error("{role} field '{field}' is not part of the input layout")]
    MissingLayoutField { role: &'static str, field: String },

    /// Two output fields share one column.
    #[error("output column {column} is assigned to both '{first}' and '{second}'")]
    DuplicateColumn {
        column: u16,
        first: String,
        second: String,
    },

    /// The same field is mapped to more than one output column.
    #[error("field '{field}' is mapped to more than one output column")]
    DuplicateOutputField { field: String },

    /// A one-based layout references column 0.
    #[error("output column {column} for '{field}' is below the layout's column base")]
    ColumnBelowBase { field: String, column: u16 },
}

/// Result type for model validation.
pub type Result<T> = std::result::Result<T, ModelError>;
