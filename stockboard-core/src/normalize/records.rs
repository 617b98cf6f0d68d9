//! Candidate header keys and defaults per record type

use super::{Record, flag_field, integer_field, text_field};
use crate::dataset::{CategoryPerf, GpLine, InventoryBucket, Product, StatEntry, TrendPoint};
use crate::reader::RawRow;

// Shared by stats and GP lines
const LABEL: &[&str] = &["label", "Label", "Keterangan"];
const VALUE: &[&str] = &["value", "Value", "Jumlah"];

const TREND: &[&str] = &["trend", "Trend"];
const TREND_UP: &[&str] = &["trendUp", "TrendUp"];

const BUCKET_NAME: &[&str] = &["name", "Name", "Status"];
const COLOR: &[&str] = &["color", "Color"];

const PRODUCT_NAME: &[&str] = &["name", "Name", "Nama", "Nama Barang"];
const SKU: &[&str] = &["sku", "SKU", "Kode Barang"];
const SOLD: &[&str] = &["sold", "Sold", "Terjual"];
const REVENUE: &[&str] = &["revenue", "Revenue", "Pendapatan"];

const CATEGORY: &[&str] = &["category", "Category", "Kategori"];
const QTY: &[&str] = &["qty", "Qty", "Jumlah"];

const MONTH: &[&str] = &["month", "Month", "Bulan"];
const SALES: &[&str] = &["sales", "Sales", "Penjualan"];

/// Fallback color for inventory buckets (indigo)
pub const DEFAULT_BUCKET_COLOR: &str = "#6366f1";

impl Record for StatEntry {
    const FIELDS: &'static [&'static str] = &["label", "value", "trend", "trendUp"];

    fn from_row(row: &RawRow) -> Self {
        Self {
            label: text_field(row, LABEL, "Unknown"),
            value: text_field(row, VALUE, "0"),
            trend: text_field(row, TREND, "+0"),
            trend_up: flag_field(row, TREND_UP),
        }
    }
}

impl Record for GpLine {
    const FIELDS: &'static [&'static str] = &["label", "value"];

    fn from_row(row: &RawRow) -> Self {
        Self {
            label: text_field(row, LABEL, "Metric"),
            value: text_field(row, VALUE, "0"),
        }
    }
}

impl Record for InventoryBucket {
    const FIELDS: &'static [&'static str] = &["name", "value", "color"];

    fn from_row(row: &RawRow) -> Self {
        Self {
            name: text_field(row, BUCKET_NAME, "Unknown"),
            value: integer_field(row, VALUE),
            color: text_field(row, COLOR, DEFAULT_BUCKET_COLOR),
        }
    }
}

impl Record for Product {
    const FIELDS: &'static [&'static str] = &["name", "sku", "sold", "revenue"];

    fn from_row(row: &RawRow) -> Self {
        Self {
            name: text_field(row, PRODUCT_NAME, "Product"),
            sku: text_field(row, SKU, "N/A"),
            sold: integer_field(row, SOLD),
            revenue: text_field(row, REVENUE, "0"),
        }
    }
}

impl Record for CategoryPerf {
    const FIELDS: &'static [&'static str] = &["category", "qty", "revenue"];

    fn from_row(row: &RawRow) -> Self {
        Self {
            category: text_field(row, CATEGORY, "Other"),
            qty: integer_field(row, QTY),
            revenue: integer_field(row, REVENUE),
        }
    }
}

impl Record for TrendPoint {
    const FIELDS: &'static [&'static str] = &["month", "sales"];

    fn from_row(row: &RawRow) -> Self {
        Self {
            month: text_field(row, MONTH, "Jan"),
            sales: integer_field(row, SALES),
        }
    }
}
