//! Loosely-typed rows as read from a spreadsheet

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Every sheet of a decoded workbook, in workbook order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawWorkbook {
    pub sheets: Vec<RawSheet>,
}

impl RawWorkbook {
    /// Get a sheet by name
    pub fn get_sheet(&self, name: &str) -> Option<&RawSheet> {
        self.sheets.iter().find(|s| s.name == name)
    }

    /// Get all sheet names
    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|s| s.name.as_str()).collect()
    }
}

/// A sheet reduced to its data rows, keyed by header text
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawSheet {
    pub name: String,
    pub rows: Vec<RawRow>,
}

/// Cell value as stored in the source, without any forced typing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Boolean(bool),
    Number(f64),
    Text(String),
    Empty,
}

impl RawValue {
    /// Check if the value carries nothing
    pub fn is_empty(&self) -> bool {
        matches!(self, RawValue::Empty)
    }

    /// Render the value the way it would show as plain text
    pub fn to_text(&self) -> String {
        match self {
            RawValue::Text(s) => s.clone(),
            RawValue::Number(n) => n.to_string(),
            RawValue::Boolean(b) => b.to_string(),
            RawValue::Empty => String::new(),
        }
    }
}

impl From<&str> for RawValue {
    fn from(s: &str) -> Self {
        RawValue::Text(s.to_string())
    }
}

impl From<String> for RawValue {
    fn from(s: String) -> Self {
        RawValue::Text(s)
    }
}

impl From<f64> for RawValue {
    fn from(n: f64) -> Self {
        RawValue::Number(n)
    }
}

impl From<bool> for RawValue {
    fn from(b: bool) -> Self {
        RawValue::Boolean(b)
    }
}

/// One data row: header text mapped to the cell below it
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawRow(HashMap<String, RawValue>);

impl RawRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<RawValue>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&RawValue> {
        self.0.get(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// First candidate key holding a non-empty value, in candidate order
    pub fn resolve(&self, candidates: &[&str]) -> Option<&RawValue> {
        candidates
            .iter()
            .filter_map(|key| self.0.get(*key))
            .find(|value| !value.is_empty())
    }

    /// Re-express a typed record as a raw row keyed by its serialized field names
    pub fn from_record<T: Serialize>(record: &T) -> Self {
        match serde_json::to_value(record) {
            Ok(serde_json::Value::Object(map)) => map
                .into_iter()
                .map(|(key, value)| (key, json_to_raw(value)))
                .collect(),
            _ => Self::default(),
        }
    }
}

impl<K: Into<String>, V: Into<RawValue>> FromIterator<(K, V)> for RawRow {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

fn json_to_raw(value: serde_json::Value) -> RawValue {
    match value {
        serde_json::Value::Null => RawValue::Empty,
        serde_json::Value::Bool(b) => RawValue::Boolean(b),
        // Integers become text so values above 2^53 keep every digit
        serde_json::Value::Number(n) => match n.as_u64() {
            Some(i) => RawValue::Text(i.to_string()),
            None => n.as_f64().map_or(RawValue::Empty, RawValue::Number),
        },
        serde_json::Value::String(s) => RawValue::Text(s),
        other => RawValue::Text(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_skips_missing_and_empty() {
        let mut row = RawRow::new();
        row.insert("Label", RawValue::Empty);
        row.insert("Keterangan", "Total Sold");

        assert_eq!(
            row.resolve(&["label", "Label", "Keterangan"]),
            Some(&RawValue::Text("Total Sold".to_string()))
        );
        assert_eq!(row.resolve(&["value", "Value"]), None);
    }

    #[test]
    fn test_resolve_is_case_sensitive() {
        let row: RawRow = [("LABEL", "x")].into_iter().collect();
        assert_eq!(row.resolve(&["label", "Label"]), None);
    }

    #[test]
    fn test_number_renders_without_trailing_zero() {
        assert_eq!(RawValue::Number(85.0).to_text(), "85");
        assert_eq!(RawValue::Number(12.5).to_text(), "12.5");
        assert_eq!(RawValue::Boolean(true).to_text(), "true");
    }

    #[test]
    fn test_untagged_json_shape() {
        let row: RawRow = serde_json::from_str(r#"{"a": "x", "b": 3, "c": true, "d": null}"#).unwrap();
        assert_eq!(row.get("a"), Some(&RawValue::Text("x".to_string())));
        assert_eq!(row.get("b"), Some(&RawValue::Number(3.0)));
        assert_eq!(row.get("c"), Some(&RawValue::Boolean(true)));
        assert_eq!(row.get("d"), Some(&RawValue::Empty));
    }

    #[test]
    fn test_sheet_lookup() {
        let workbook = RawWorkbook {
            sheets: vec![
                RawSheet {
                    name: "Stats".to_string(),
                    rows: vec![],
                },
                RawSheet {
                    name: "Notes".to_string(),
                    rows: vec![],
                },
            ],
        };
        assert_eq!(workbook.sheet_names(), vec!["Stats", "Notes"]);
        assert!(workbook.get_sheet("Notes").is_some());
        assert!(workbook.get_sheet("stats").is_none());
    }
}
