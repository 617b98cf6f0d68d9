//! Output formatters for the dashboard dataset

use anyhow::Result;
use colored::*;
use std::path::Path;
use stockboard_core::{DashboardDataset, ImportReport, Section};

/// Print the dataset (or one section) as colored, indexed tables
pub fn print_human(data: &DashboardDataset, only: Option<Section>) {
    for section in Section::ALL {
        if only.is_some_and(|s| s != section) {
            continue;
        }
        print_section(data, section);
        println!();
    }
}

fn print_section(data: &DashboardDataset, section: Section) {
    println!(
        "{} {}",
        section.sheet_name().cyan().bold(),
        format!("({} rows)", data.len(section)).bright_black()
    );

    if data.len(section) == 0 {
        println!("  {}", "(empty)".bright_black());
        return;
    }

    match section {
        Section::Stats => {
            for (i, stat) in data.stats.iter().enumerate() {
                let trend = if stat.trend_up {
                    format!("▲ {}", stat.trend).green()
                } else {
                    format!("▼ {}", stat.trend).red()
                };
                println!("{} {}: {} {}", index(i), stat.label, stat.value.bold(), trend);
            }
        }
        Section::Gp => {
            for (i, line) in data.gp_analysis.iter().enumerate() {
                println!("{} {}: {}", index(i), line.label, line.value.bold());
            }
        }
        Section::Inventory => {
            let total = data
                .inventory_status
                .iter()
                .fold(0u64, |acc, b| acc.saturating_add(b.value));
            for (i, bucket) in data.inventory_status.iter().enumerate() {
                println!(
                    "{} {}: {} {} {}",
                    index(i),
                    bucket.name,
                    bucket.value.to_string().bold(),
                    format!("({:.1}%)", percentage(bucket.value, total)).bright_black(),
                    bucket.color.bright_black()
                );
            }
        }
        Section::Products => {
            for (i, product) in data.top_products.iter().enumerate() {
                println!(
                    "{} {} [{}] sold {}, revenue {}",
                    index(i),
                    product.name,
                    product.sku.yellow(),
                    product.sold.to_string().bold(),
                    product.revenue.bold()
                );
            }
        }
        Section::Category => {
            for (i, category) in data.category_performance.iter().enumerate() {
                println!(
                    "{} {}: qty {}, revenue {}",
                    index(i),
                    category.category,
                    category.qty.to_string().bold(),
                    category.revenue.to_string().bold()
                );
            }
        }
        Section::Sales => {
            let peak = data.sales_trend.iter().map(|p| p.sales).max().unwrap_or(0);
            for (i, point) in data.sales_trend.iter().enumerate() {
                println!(
                    "{} {:<4} {:>8} {}",
                    index(i),
                    point.month,
                    point.sales,
                    bar(point.sales, peak).blue()
                );
            }
        }
    }
}

fn index(i: usize) -> ColoredString {
    format!("  {:>2}", i).bright_black()
}

fn percentage(value: u64, total: u64) -> f64 {
    if total > 0 {
        (value as f64 / total as f64) * 100.0
    } else {
        0.0
    }
}

fn bar(value: u64, peak: u64) -> String {
    const WIDTH: u128 = 30;
    if peak == 0 {
        return String::new();
    }
    "█".repeat((value as u128 * WIDTH / peak as u128) as usize)
}

/// Print the dataset (or one section) in the persisted JSON layout
pub fn print_json(data: &DashboardDataset, only: Option<Section>) -> Result<()> {
    let mut output = serde_json::to_value(data)?;
    if let Some(section) = only {
        output = output[section.key()].take();
    }
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// Summarize which sheets an upload replaced and which it skipped
pub fn print_import(file_path: &Path, report: &ImportReport) {
    println!("{}", format!("Imported: {}", file_path.display()).bold());

    if report.applied.is_empty() {
        println!(
            "{}",
            "No sheet matched a dashboard section; nothing changed.".yellow()
        );
    }
    for (section, rows) in &report.applied {
        println!(
            "  {} {} ← {} rows",
            "✓".green().bold(),
            section.key(),
            rows
        );
    }
    for name in &report.ignored {
        println!("  {} ignored sheet '{}'", "-".bright_black(), name);
    }
}
