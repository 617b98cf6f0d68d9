//! Plain CSV exports, read as a single sheet

use super::{RawRow, RawSheet, ReadError, header_keys};

/// Read CSV text as the sheet `name`.
///
/// Header cells are trimmed and lower-cased, data cells trimmed, blank lines
/// skipped. Rows shorter than the header leave the trailing keys absent.
pub fn read_csv(name: &str, content: &str) -> Result<RawSheet, ReadError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers = header_keys(reader.headers()?.iter().map(|h| h.to_lowercase()));

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let row: RawRow = headers
            .iter()
            .zip(record.iter())
            .map(|(key, value)| (key.clone(), value))
            .collect();
        rows.push(row);
    }

    Ok(RawSheet {
        name: name.to_string(),
        rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::RawValue;

    #[test]
    fn test_headers_lowercased_and_trimmed() {
        let sheet = read_csv("Sales", " Month , SALES\nMar, 400\n\nApr,450\n").unwrap();

        assert_eq!(sheet.name, "Sales");
        assert_eq!(sheet.rows.len(), 2);
        assert_eq!(
            sheet.rows[0].get("month"),
            Some(&RawValue::Text("Mar".to_string()))
        );
        assert_eq!(
            sheet.rows[0].get("sales"),
            Some(&RawValue::Text("400".to_string()))
        );
        assert_eq!(
            sheet.rows[1].get("sales"),
            Some(&RawValue::Text("450".to_string()))
        );
    }

    #[test]
    fn test_short_rows_leave_keys_absent() {
        let sheet = read_csv("Products", "name,sku,sold\nSafety Harness,SFY-221\n").unwrap();

        assert_eq!(sheet.rows.len(), 1);
        assert!(sheet.rows[0].get("sku").is_some());
        assert!(sheet.rows[0].get("sold").is_none());
    }

    #[test]
    fn test_header_only() {
        let sheet = read_csv("GP", "label,value\n").unwrap();
        assert!(sheet.rows.is_empty());
    }
}
