//! Output-side configuration and the sparse rows handed to writers.

use std::collections::BTreeMap;

use crate::error::{ModelError, Result};
use crate::fields;

/// Whether configured column numbers count from 0 or from 1.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnBase {
    Zero,
    #[default]
    One,
}

impl ColumnBase {
    pub fn offset(self) -> u16 {
        match self {
            Self::Zero => 0,
            Self::One => 1,
        }
    }
}

/// One field placed at a fixed output column.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct OutputColumn {
    pub field: String,
    pub column: u16,
}

impl OutputColumn {
    pub fn new(field: impl Into<String>, column: u16) -> Self {
        Self {
            field: field.into(),
            column,
        }
    }
}

/// Ordered field-to-column mapping for the consolidated sheet.
///
/// Column numbers need not be contiguous; gaps stay empty in the output.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct OutputLayout {
    pub columns: Vec<OutputColumn>,
    pub base: ColumnBase,
    /// Emit a row of field names before the first source group.
    pub include_header: bool,
}

impl OutputLayout {
    /// Validated constructor.
    pub fn new(columns: Vec<OutputColumn>, base: ColumnBase, include_header: bool) -> Result<Self> {
        let layout = Self {
            columns,
            base,
            include_header,
        };
        layout.validate()?;
        Ok(layout)
    }

    /// The roster sheet layout: one-based columns, no header row.
    pub fn expert_roster() -> Self {
        Self {
            columns: vec![
                OutputColumn::new(fields::NAME, 2),
                OutputColumn::new(fields::DOCUMENT_TYPE, 3),
                OutputColumn::new(fields::ID_NUMBER, 4),
                OutputColumn::new(fields::NATIONALITY, 5),
                OutputColumn::new(fields::SEX, 6),
                OutputColumn::new(fields::BIRTH_DATE, 7),
                OutputColumn::new(fields::PHONE, 11),
                OutputColumn::new(fields::BANK, 44),
                OutputColumn::new(fields::BANK_ACCOUNT, 45),
            ],
            base: ColumnBase::One,
            include_header: false,
        }
    }

    #[must_use]
    pub fn with_header(mut self, include_header: bool) -> Self {
        self.include_header = include_header;
        self
    }

    pub fn validate(&self) -> Result<()> {
        let mut by_column: BTreeMap<u16, &str> = BTreeMap::new();
        let mut fields_seen: BTreeMap<&str, u16> = BTreeMap::new();
        for entry in &self.columns {
            if entry.column < self.base.offset() {
                return Err(ModelError::ColumnBelowBase {
                    field: entry.field.clone(),
                    column: entry.column,
                });
            }
            if let Some(first) = by_column.insert(entry.column, &entry.field) {
                return Err(ModelError::DuplicateColumn {
                    column: entry.column,
                    first: first.to_string(),
                    second: entry.field.clone(),
                });
            }
            if fields_seen.insert(&entry.field, entry.column).is_some() {
                return Err(ModelError::DuplicateOutputField {
                    field: entry.field.clone(),
                });
            }
        }
        Ok(())
    }

    /// Zero-based sheet column for a configured column number.
    pub fn sheet_column(&self, column: u16) -> u16 {
        column.saturating_sub(self.base.offset())
    }

    /// Configured column number for `field`, if mapped.
    pub fn column_of(&self, field: &str) -> Option<u16> {
        self.columns
            .iter()
            .find(|entry| entry.field == field)
            .map(|entry| entry.column)
    }
}

impl Default for OutputLayout {
    fn default() -> Self {
        Self::expert_roster()
    }
}

/// A sparse output row indexed by zero-based sheet column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputRow {
    cells: Vec<Option<String>>,
}

impl OutputRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// A row holding only `label` in the first column.
    pub fn label(label: impl Into<String>) -> Self {
        let mut row = Self::new();
        row.set(0, label);
        row
    }

    pub fn set(&mut self, column: u16, value: impl Into<String>) {
        let index = usize::from(column);
        if self.cells.len() <= index {
            self.cells.resize(index + 1, None);
        }
        self.cells[index] = Some(value.into());
    }

    pub fn get(&self, column: u16) -> Option<&str> {
        self.cells
            .get(usize::from(column))
            .and_then(|cell| cell.as_deref())
    }

    /// Number of columns up to and including the last set cell.
    pub fn width(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(Option::is_none)
    }

    /// Set cells in column order.
    pub fn cells(&self) -> impl Iterator<Item = (u16, &str)> {
        self.cells.iter().enumerate().filter_map(|(index, cell)| {
            let value = cell.as_deref()?;
            let column = u16::try_from(index).ok()?;
            Some((column, value))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expert_roster_is_valid() {
        assert_eq!(OutputLayout::expert_roster().validate(), Ok(()));
    }

    #[test]
    fn rejects_shared_column() {
        let result = OutputLayout::new(
            vec![OutputColumn::new("a", 3), OutputColumn::new("b", 3)],
            ColumnBase::Zero,
            false,
        );
        assert_eq!(
            result,
            Err(ModelError::DuplicateColumn {
                column: 3,
                first: "a".to_string(),
                second: "b".to_string(),
            })
        );
    }

    #[test]
    fn rejects_column_zero_when_one_based() {
        let result = OutputLayout::new(vec![OutputColumn::new("a", 0)], ColumnBase::One, false);
        assert!(matches!(result, Err(ModelError::ColumnBelowBase { .. })));
        assert!(OutputLayout::new(vec![OutputColumn::new("a", 0)], ColumnBase::Zero, false).is_ok());
    }

    #[test]
    fn sheet_column_honours_base() {
        let one = OutputLayout::expert_roster();
        assert_eq!(one.sheet_column(2), 1);
        let zero = OutputLayout {
            base: ColumnBase::Zero,
            ..OutputLayout::expert_roster()
        };
        assert_eq!(zero.sheet_column(2), 2);
    }

    #[test]
    fn output_row_is_sparse() {
        let mut row = OutputRow::new();
        row.set(3, "x");
        row.set(1, "y");
        assert_eq!(row.width(), 4);
        assert_eq!(row.get(0), None);
        assert_eq!(row.get(3), Some("x"));
        assert_eq!(row.cells().collect::<Vec<_>>(), vec![(1, "y"), (3, "x")]);
        assert!(OutputRow::new().is_empty());
    }
}
