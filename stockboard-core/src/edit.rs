//! Hand edits of single fields, coerced like an upload

use crate::dataset::{DashboardDataset, Section};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EditError {
    #[error("unknown section '{0}'")]
    UnknownSection(String),
    #[error("section {section} has no field '{field}' (expected one of: {expected})")]
    UnknownField {
        section: Section,
        field: String,
        expected: String,
    },
    #[error("section {section} has {len} rows, no row {index}")]
    IndexOutOfRange {
        section: Section,
        index: usize,
        len: usize,
    },
}

/// Set one field of one row to a value typed by the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldEdit {
    pub section: Section,
    pub index: usize,
    /// Canonical key, e.g. `sold` or `trendUp`
    pub field: String,
    pub value: String,
}

impl FieldEdit {
    pub fn new(
        section: Section,
        index: usize,
        field: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            section,
            index,
            field: field.into(),
            value: value.into(),
        }
    }
}

/// Produce the dataset with `edit` applied.
///
/// The row is re-exported with canonical keys, the field overwritten with the
/// text value, and the row normalized again, so `"abc"` typed into `sold`
/// becomes 0 just as it would on import.
pub fn apply_edit(
    dataset: &DashboardDataset,
    edit: &FieldEdit,
) -> Result<DashboardDataset, EditError> {
    let section = edit.section;
    if !section.fields().contains(&edit.field.as_str()) {
        return Err(EditError::UnknownField {
            section,
            field: edit.field.clone(),
            expected: section.fields().join(", "),
        });
    }

    let mut rows = dataset.rows(section);
    let len = rows.len();
    let row = rows.get_mut(edit.index).ok_or(EditError::IndexOutOfRange {
        section,
        index: edit.index,
        len,
    })?;
    row.insert(edit.field.as_str(), edit.value.as_str());

    let mut edited = dataset.clone();
    edited.set_rows(section, &rows);
    Ok(edited)
}
