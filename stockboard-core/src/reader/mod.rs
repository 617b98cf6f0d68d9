//! Excel/ODS/CSV reader using calamine

use calamine::{Data, Range, Reader, open_workbook_auto_from_rs};
use std::collections::HashMap;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub mod csv_table;
pub mod row;

pub use csv_table::read_csv;
pub use row::{RawRow, RawSheet, RawValue, RawWorkbook};

/// Header used for blank header cells
const EMPTY_HEADER: &str = "__EMPTY";

/// Failure to turn uploaded bytes into rows
#[derive(Debug, Error)]
pub enum ReadError {
    #[error("failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("not a readable spreadsheet: {0}")]
    Decode(#[source] calamine::Error),
    #[error("failed to read sheet '{name}': {source}")]
    Sheet {
        name: String,
        #[source]
        source: calamine::Error,
    },
    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),
}

/// Read a workbook from a file path
pub fn read_workbook<P: AsRef<Path>>(path: P) -> Result<RawWorkbook, ReadError> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|source| ReadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    read_workbook_bytes(&bytes)
}

/// Decode an in-memory spreadsheet into rows keyed by header text, one entry per sheet
pub fn read_workbook_bytes(bytes: &[u8]) -> Result<RawWorkbook, ReadError> {
    // calamine needs an owned, cloneable reader to sniff the container format
    let mut excel =
        open_workbook_auto_from_rs(Cursor::new(bytes.to_vec())).map_err(ReadError::Decode)?;

    let mut sheets = Vec::new();
    for name in excel.sheet_names() {
        let range = excel
            .worksheet_range(&name)
            .map_err(|source| ReadError::Sheet {
                name: name.clone(),
                source,
            })?;
        let rows = parse_rows(&range);
        tracing::debug!(sheet = %name, rows = rows.len(), "decoded sheet");
        sheets.push(RawSheet { name, rows });
    }

    Ok(RawWorkbook { sheets })
}

fn parse_rows(range: &Range<Data>) -> Vec<RawRow> {
    let mut rows = range.rows();
    let Some(header_row) = rows.next() else {
        return Vec::new();
    };
    let headers = header_keys(header_row.iter().map(header_text));

    rows.filter_map(|cells| {
        let row: RawRow = headers
            .iter()
            .zip(cells)
            .filter_map(|(key, data)| parse_cell_value(data).map(|value| (key.clone(), value)))
            .collect();
        (!row.is_empty()).then_some(row)
    })
    .collect()
}

/// Blank headers become `__EMPTY`; repeats get `_1`, `_2`, ... appended
pub(crate) fn header_keys<I: IntoIterator<Item = String>>(texts: I) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    let mut keys = Vec::new();

    for text in texts {
        let base = if text.is_empty() {
            EMPTY_HEADER.to_string()
        } else {
            text
        };
        let count = seen.entry(base.clone()).or_insert(0);
        let key = if *count == 0 {
            base.clone()
        } else {
            format!("{}_{}", base, count)
        };
        *count += 1;
        keys.push(key);
    }

    keys
}

fn header_text(data: &Data) -> String {
    parse_cell_value(data)
        .map(|value| value.to_text())
        .unwrap_or_default()
}

fn parse_cell_value(data: &Data) -> Option<RawValue> {
    let value = match data {
        Data::Int(i) => RawValue::Number(*i as f64),
        Data::Float(f) => RawValue::Number(*f),
        Data::String(s) => RawValue::Text(s.clone()),
        Data::Bool(b) => RawValue::Boolean(*b),
        Data::Error(e) => RawValue::Text(e.to_string()),
        Data::Empty => return None,
        Data::DateTime(dt) => RawValue::Number(dt.as_f64()),
        Data::DateTimeIso(s) => RawValue::Text(s.clone()),
        Data::DurationIso(s) => RawValue::Text(s.clone()),
    };
    Some(value)
}
