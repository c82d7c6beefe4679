//! Cell grid abstraction shared by readers and the extractor.
//!
//! Coordinates are 1-indexed, matching the row/column numbers a person reads
//! off a spreadsheet. Readers translate from their own indexing at the edge.

use std::collections::BTreeMap;
use std::fmt;

/// A 1-indexed cell position.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct CellRef {
    pub row: u32,
    pub col: u32,
}

impl CellRef {
    pub const fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }

    /// Returns the cell displaced by the given offsets.
    ///
    /// `None` when the result would fall before row 1 / column 1 or overflow.
    pub fn offset(self, row_offset: i32, col_offset: i32) -> Option<Self> {
        let row = self.row.checked_add_signed(row_offset)?;
        let col = self.col.checked_add_signed(col_offset)?;
        if row == 0 || col == 0 {
            return None;
        }
        Some(Self { row, col })
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", column_letters(self.col), self.row)
    }
}

/// Spreadsheet column letters for a 1-indexed column (1 = A, 27 = AA).
pub fn column_letters(col: u32) -> String {
    let mut letters = Vec::new();
    let mut n = col;
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push(char::from(b'A' + rem as u8));
        n = (n - 1) / 26;
    }
    letters.iter().rev().collect()
}

/// Raw value of a single cell.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum CellValue {
    Text(String),
    #[default]
    Missing,
}

impl CellValue {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value),
            Self::Missing => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Option<String>> for CellValue {
    fn from(value: Option<String>) -> Self {
        value.map_or(Self::Missing, Self::Text)
    }
}

/// Read access to one worksheet.
pub trait CellGrid {
    /// Value at `at`; cells outside the used area are [`CellValue::Missing`].
    fn cell(&self, at: CellRef) -> CellValue;

    /// Top-left cells of every merged region, in the order the sheet lists them.
    fn merged_anchors(&self) -> &[CellRef];
}

/// In-memory grid, used for tests and for sheets assembled by hand.
#[derive(Debug, Clone, Default)]
pub struct MemoryGrid {
    cells: BTreeMap<CellRef, String>,
    anchors: Vec<CellRef>,
}

impl MemoryGrid {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, row: u32, col: u32, value: impl Into<String>) {
        self.cells.insert(CellRef::new(row, col), value.into());
    }

    /// Registers `(row, col)` as the top-left cell of a merged region.
    pub fn add_merged_anchor(&mut self, row: u32, col: u32) {
        self.anchors.push(CellRef::new(row, col));
    }

    #[must_use]
    pub fn with_cell(mut self, row: u32, col: u32, value: impl Into<String>) -> Self {
        self.set(row, col, value);
        self
    }

    /// Writes `value` into `(row, col)` and registers it as a merged anchor.
    #[must_use]
    pub fn with_merged(mut self, row: u32, col: u32, value: impl Into<String>) -> Self {
        self.set(row, col, value);
        self.add_merged_anchor(row, col);
        self
    }
}

impl CellGrid for MemoryGrid {
    fn cell(&self, at: CellRef) -> CellValue {
        self.cells
            .get(&at)
            .map_or(CellValue::Missing, |value| CellValue::Text(value.clone()))
    }

    fn merged_anchors(&self) -> &[CellRef] {
        &self.anchors
    }
}
