//! Input-side configuration: the anchor label and the offsets of each field
//! relative to it.

use std::collections::BTreeSet;

use crate::error::{ModelError, Result};
use crate::fields;

/// Position of one field relative to the anchor cell.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FieldOffset {
    pub field: String,
    pub row_offset: i32,
    pub col_offset: i32,
}

impl FieldOffset {
    pub fn new(field: impl Into<String>, row_offset: i32, col_offset: i32) -> Self {
        Self {
            field: field.into(),
            row_offset,
            col_offset,
        }
    }
}

/// Ordered field offsets for one form version.
#[derive(Debug, Clone, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct LayoutDescriptor {
    pub fields: Vec<FieldOffset>,
}

impl LayoutDescriptor {
    pub fn new(fields: Vec<FieldOffset>) -> Self {
        Self { fields }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FieldOffset> {
        self.fields.iter()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.iter().any(|entry| entry.field == field)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Names under which the ID-derived values are stored on each record.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct DerivedFieldNames {
    pub document_type: String,
    pub nationality: String,
    pub sex: String,
    pub birth_date: String,
}

impl Default for DerivedFieldNames {
    fn default() -> Self {
        Self {
            document_type: fields::DOCUMENT_TYPE.to_string(),
            nationality: fields::NATIONALITY.to_string(),
            sex: fields::SEX.to_string(),
            birth_date: fields::BIRTH_DATE.to_string(),
        }
    }
}

/// Everything the extractor needs to know about one form version.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct FormConfig {
    /// Normalized text of the merged cell that opens a record block.
    pub anchor_label: String,
    pub layout: LayoutDescriptor,
    /// Records whose value for this field is empty are discarded.
    pub name_field: String,
    /// Field holding the resident ID number used for derived values.
    pub id_field: String,
    pub derived: DerivedFieldNames,
}

impl FormConfig {
    /// The expert registration form: the anchor label cell is followed by the
    /// ID number one row down, the name two rows down, and the bank and phone
    /// details on the third row.
    pub fn expert_form() -> Self {
        Self {
            anchor_label: fields::NAME.to_string(),
            layout: LayoutDescriptor::new(vec![
                FieldOffset::new(fields::NAME, 2, 0),
                FieldOffset::new(fields::ID_NUMBER, 1, 1),
                FieldOffset::new(fields::BANK, 3, 1),
                FieldOffset::new(fields::BANK_ACCOUNT, 3, 3),
                FieldOffset::new(fields::PHONE, 3, 5),
            ]),
            name_field: fields::NAME.to_string(),
            id_field: fields::ID_NUMBER.to_string(),
            derived: DerivedFieldNames::default(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.anchor_label.trim().is_empty() {
            return Err(ModelError::EmptyAnchorLabel);
        }
        let mut seen = BTreeSet::new();
        for entry in self.layout.iter() {
            if !seen.insert(entry.field.as_str()) {
                return Err(ModelError::DuplicateLayoutField {
                    field: entry.field.clone(),
                });
            }
        }
        if !self.layout.contains(&self.name_field) {
            return Err(ModelError::MissingLayoutField {
                role: "name",
                field: self.name_field.clone(),
            });
        }
        if !self.layout.contains(&self.id_field) {
            return Err(ModelError::MissingLayoutField {
                role: "ID number",
                field: self.id_field.clone(),
            });
        }
        Ok(())
    }
}

impl Default for FormConfig {
    fn default() -> Self {
        Self::expert_form()
    }
}
