//! Raw rows to typed dashboard records
//!
//! Every logical field has a fixed, ordered list of candidate header keys. The
//! first key present in the row with a non-empty value supplies the field;
//! otherwise a per-field default is used. Coercion never fails: a malformed
//! cell degrades to the default instead of rejecting the sheet.

use crate::dataset::{DashboardDataset, Section};
use crate::reader::{RawRow, RawValue, RawWorkbook};
use regex::Regex;
use std::sync::OnceLock;

mod records;

/// A record type that can be built from any raw row
pub trait Record: Sized {
    /// Canonical keys, as written when the record is serialized
    const FIELDS: &'static [&'static str];

    /// Build the record, resolving and coercing every field
    fn from_row(row: &RawRow) -> Self;
}

/// One normalized record per input row, in input order
pub fn normalize_rows<T: Record>(rows: &[RawRow]) -> Vec<T> {
    rows.iter().map(T::from_row).collect()
}

/// Text field: the resolved cell rendered as text, or `default`
pub fn text_field(row: &RawRow, candidates: &[&str], default: &str) -> String {
    row.resolve(candidates)
        .map(RawValue::to_text)
        .unwrap_or_else(|| default.to_string())
}

/// Integer field: leading base-10 integer of the resolved cell, 0 when there is none
pub fn integer_field(row: &RawRow, candidates: &[&str]) -> u64 {
    row.resolve(candidates).map_or(0, parse_integer)
}

/// Flag field: native booleans pass through, only the text `"true"` is true
pub fn flag_field(row: &RawRow, candidates: &[&str]) -> bool {
    match row.resolve(candidates) {
        Some(RawValue::Boolean(b)) => *b,
        Some(RawValue::Text(s)) => s == "true",
        _ => false,
    }
}

/// Parse a cell the way an integer column reads it.
///
/// Numbers truncate toward zero. Text yields its leading integer after optional
/// whitespace and sign (`"85 pcs"` is 85, `"12.7"` is 12). Negative,
/// overflowing and non-numeric values are 0.
pub fn parse_integer(value: &RawValue) -> u64 {
    match value {
        RawValue::Number(n) if n.is_finite() && *n >= 0.0 && *n < u64::MAX as f64 => {
            n.trunc() as u64
        }
        RawValue::Text(s) => parse_leading_integer(s),
        _ => 0,
    }
}

fn parse_leading_integer(text: &str) -> u64 {
    static LEADING_INT: OnceLock<Regex> = OnceLock::new();
    let re = LEADING_INT.get_or_init(|| {
        Regex::new(r"^\s*(?P<sign>[+-]?)(?P<digits>[0-9]+)").expect("static pattern")
    });

    let Some(caps) = re.captures(text) else {
        return 0;
    };
    let parsed = caps["digits"].parse::<u64>().unwrap_or(0);
    if &caps["sign"] == "-" { 0 } else { parsed }
}

/// Outcome of merging an uploaded workbook into the dataset
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportReport {
    /// Sections replaced, with the number of rows each received
    pub applied: Vec<(Section, usize)>,
    /// Sheets whose name matched no section
    pub ignored: Vec<String>,
}

impl ImportReport {
    pub fn is_empty(&self) -> bool {
        self.applied.is_empty()
    }
}

/// Replace every section whose sheet is present; leave the others untouched
pub fn apply_workbook(dataset: &mut DashboardDataset, workbook: &RawWorkbook) -> ImportReport {
    let mut report = ImportReport::default();

    for sheet in &workbook.sheets {
        match Section::from_sheet_name(&sheet.name) {
            Some(section) => {
                dataset.set_rows(section, &sheet.rows);
                tracing::debug!(%section, rows = sheet.rows.len(), "normalized sheet");
                report.applied.push((section, sheet.rows.len()));
            }
            None => {
                tracing::warn!(sheet = %sheet.name, "ignoring sheet with unrecognized name");
                report.ignored.push(sheet.name.clone());
            }
        }
    }

    report
}
