//! Dashboard dataset: the six record sequences behind every card, chart and table

use crate::normalize::{Record, normalize_rows};
use crate::reader::RawRow;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// KPI card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatEntry {
    pub label: String,
    pub value: String,
    pub trend: String,
    pub trend_up: bool,
}

/// Gross-profit analysis line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GpLine {
    pub label: String,
    pub value: String,
}

/// Inventory status slice; `color` is a hex color
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryBucket {
    pub name: String,
    pub value: u64,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub name: String,
    pub sku: String,
    pub sold: u64,
    pub revenue: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryPerf {
    pub category: String,
    pub qty: u64,
    pub revenue: u64,
}

/// One month of the rolling sales trend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub month: String,
    pub sales: u64,
}

/// Complete dashboard state. Always replaced as a whole, never patched in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardDataset {
    pub stats: Vec<StatEntry>,
    pub gp_analysis: Vec<GpLine>,
    pub inventory_status: Vec<InventoryBucket>,
    pub top_products: Vec<Product>,
    pub category_performance: Vec<CategoryPerf>,
    pub sales_trend: Vec<TrendPoint>,
}

impl DashboardDataset {
    /// Export one section as raw rows keyed by canonical field names
    pub fn rows(&self, section: Section) -> Vec<RawRow> {
        match section {
            Section::Stats => to_rows(&self.stats),
            Section::Gp => to_rows(&self.gp_analysis),
            Section::Inventory => to_rows(&self.inventory_status),
            Section::Products => to_rows(&self.top_products),
            Section::Category => to_rows(&self.category_performance),
            Section::Sales => to_rows(&self.sales_trend),
        }
    }

    /// Normalize `rows` and replace the whole section with the result
    pub fn set_rows(&mut self, section: Section, rows: &[RawRow]) {
        match section {
            Section::Stats => self.stats = normalize_rows(rows),
            Section::Gp => self.gp_analysis = normalize_rows(rows),
            Section::Inventory => self.inventory_status = normalize_rows(rows),
            Section::Products => self.top_products = normalize_rows(rows),
            Section::Category => self.category_performance = normalize_rows(rows),
            Section::Sales => self.sales_trend = normalize_rows(rows),
        }
    }

    /// Number of records in a section
    pub fn len(&self, section: Section) -> usize {
        match section {
            Section::Stats => self.stats.len(),
            Section::Gp => self.gp_analysis.len(),
            Section::Inventory => self.inventory_status.len(),
            Section::Products => self.top_products.len(),
            Section::Category => self.category_performance.len(),
            Section::Sales => self.sales_trend.len(),
        }
    }
}

fn to_rows<T: Serialize>(records: &[T]) -> Vec<RawRow> {
    records.iter().map(RawRow::from_record).collect()
}

impl Default for DashboardDataset {
    /// Built-in sample shown before anything is uploaded or saved
    fn default() -> Self {
        fn stat(label: &str, value: &str, trend: &str) -> StatEntry {
            StatEntry {
                label: label.to_string(),
                value: value.to_string(),
                trend: trend.to_string(),
                trend_up: true,
            }
        }
        fn gp(label: &str, value: &str) -> GpLine {
            GpLine {
                label: label.to_string(),
                value: value.to_string(),
            }
        }
        fn bucket(name: &str, value: u64, color: &str) -> InventoryBucket {
            InventoryBucket {
                name: name.to_string(),
                value,
                color: color.to_string(),
            }
        }
        fn product(name: &str, sku: &str, sold: u64, revenue: &str) -> Product {
            Product {
                name: name.to_string(),
                sku: sku.to_string(),
                sold,
                revenue: revenue.to_string(),
            }
        }
        fn category(category: &str, qty: u64, revenue: u64) -> CategoryPerf {
            CategoryPerf {
                category: category.to_string(),
                qty,
                revenue,
            }
        }

        let months = [
            ("Mar", 400),
            ("Apr", 450),
            ("May", 420),
            ("Jun", 500),
            ("Jul", 550),
            ("Aug", 580),
            ("Sep", 600),
            ("Oct", 620),
            ("Nov", 680),
            ("Dec", 750),
            ("Jan", 720),
            ("Feb", 800),
        ];

        Self {
            stats: vec![
                stat("Unique Vendors", "43", "+2"),
                stat("Unique Items", "475", "+12"),
                stat("Total In-Stock", "1,284", "+54"),
                stat("Inventory Value", "Rp 842M", "+Rp 24M"),
            ],
            gp_analysis: vec![
                gp("Total Sold", "34"),
                gp("Total Sales", "Rp 1.2B"),
                gp("Total Cost", "Rp 850M"),
                gp("Total Profit", "Rp 350M"),
                gp("GP %", "29.1%"),
            ],
            inventory_status: vec![
                bucket("In Stock", 320, "#10b981"),
                bucket("Low Stock", 85, "#f59e0b"),
                bucket("Restock", 45, "#3b82f6"),
                bucket("Out of Stock", 25, "#ef4444"),
            ],
            top_products: vec![
                product("Electronics Kit A", "ELC-001", 45, "Rp 120M"),
                product("Steel Frame 2x4", "STL-992", 38, "Rp 85M"),
                product("Industrial Fan X", "FAN-102", 32, "Rp 64M"),
                product("Power Tool Set", "PWR-553", 28, "Rp 56M"),
                product("Safety Harness", "SFY-221", 24, "Rp 32M"),
            ],
            category_performance: vec![
                category("Heavy Machinery", 120, 450),
                category("Hand Tools", 450, 120),
                category("Safety Gear", 320, 85),
                category("Electronics", 180, 150),
                category("Raw Materials", 850, 320),
            ],
            sales_trend: months
                .into_iter()
                .map(|(month, sales)| TrendPoint {
                    month: month.to_string(),
                    sales,
                })
                .collect(),
        }
    }
}

/// One of the six dataset fields, addressed by sheet name on import
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Stats,
    Gp,
    Inventory,
    Products,
    Category,
    Sales,
}

impl Section {
    pub const ALL: [Section; 6] = [
        Section::Stats,
        Section::Gp,
        Section::Inventory,
        Section::Products,
        Section::Category,
        Section::Sales,
    ];

    /// Exact (case-sensitive) sheet name that feeds this section
    pub fn sheet_name(&self) -> &'static str {
        match self {
            Section::Stats => "Stats",
            Section::Gp => "GP",
            Section::Inventory => "Inventory",
            Section::Products => "Products",
            Section::Category => "Category",
            Section::Sales => "Sales",
        }
    }

    /// Key of the section in the persisted JSON
    pub fn key(&self) -> &'static str {
        match self {
            Section::Stats => "stats",
            Section::Gp => "gpAnalysis",
            Section::Inventory => "inventoryStatus",
            Section::Products => "topProducts",
            Section::Category => "categoryPerformance",
            Section::Sales => "salesTrend",
        }
    }

    /// Canonical field keys of the section's records
    pub fn fields(&self) -> &'static [&'static str] {
        match self {
            Section::Stats => StatEntry::FIELDS,
            Section::Gp => GpLine::FIELDS,
            Section::Inventory => InventoryBucket::FIELDS,
            Section::Products => Product::FIELDS,
            Section::Category => CategoryPerf::FIELDS,
            Section::Sales => TrendPoint::FIELDS,
        }
    }

    pub fn from_sheet_name(name: &str) -> Option<Section> {
        Self::ALL.into_iter().find(|s| s.sheet_name() == name)
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.sheet_name())
    }
}

/// Accepts the sheet name or the JSON key, ignoring case
impl FromStr for Section {
    type Err = crate::edit::EditError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|section| {
                section.sheet_name().eq_ignore_ascii_case(s) || section.key().eq_ignore_ascii_case(s)
            })
            .ok_or_else(|| crate::edit::EditError::UnknownSection(s.to_string()))
    }
}
