//! Plain-text tables for terminal output.
//!
//! Provides functions to render:
//! - the inventory listing and its per-name tally
//! - a day's sales
//! - signed money amounts for the single-figure reports

use crate::domain::inventory::StockLine;
use crate::domain::product::{Product, display_name};
use std::collections::BTreeMap;

fn pad_row<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    let line = cells
        .zip(widths)
        .map(|(cell, &w)| format!("{:<w$}", cell, w = w))
        .collect::<Vec<_>>()
        .join(" | ");
    line.trim_end().to_string()
}

/// Render `rows` under `headers`, each column padded to its widest cell.
pub fn render_table(title: &str, headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate().take(widths.len()) {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let rule = widths
        .iter()
        .map(|&w| "-".repeat(w))
        .collect::<Vec<_>>()
        .join("-+-");

    let mut output = String::new();
    output.push_str(title);
    output.push('\n');
    output.push_str(&pad_row(headers.iter().copied(), &widths));
    output.push('\n');
    output.push_str(&rule);
    output.push('\n');
    for row in rows {
        output.push_str(&pad_row(row.iter().map(String::as_str), &widths));
        output.push('\n');
    }
    output
}

pub fn money(value: f64) -> String {
    format!("{:.2}", value)
}

/// Positive amounts carry an explicit `+`.
pub fn signed_money(value: f64) -> String {
    if value > 0.0 {
        format!("+{:.2}", value)
    } else {
        format!("{:.2}", value)
    }
}

pub fn render_inventory(lines: &[StockLine]) -> String {
    let rows: Vec<Vec<String>> = lines
        .iter()
        .map(|l| {
            vec![
                display_name(&l.product_name),
                money(l.buy_price),
                l.expiration.to_string(),
            ]
        })
        .collect();
    render_table(
        "Currently in stock",
        &["Product Name", "Buy Price", "Expiration Date"],
        &rows,
    )
}

pub fn render_inventory_counts(counts: &BTreeMap<String, usize>) -> String {
    let rows: Vec<Vec<String>> = counts
        .iter()
        .map(|(name, count)| vec![display_name(name), count.to_string()])
        .collect();
    render_table("Currently in stock", &["Product Name", "Count"], &rows)
}

pub fn render_sales(title: &str, sold: &[Product]) -> String {
    let rows: Vec<Vec<String>> = sold
        .iter()
        .map(|p| {
            vec![
                display_name(&p.product_name),
                money(p.buy_price),
                p.sell_price.map(money).unwrap_or_default(),
            ]
        })
        .collect();
    render_table(title, &["Product Name", "Buy Price", "Sell Price"], &rows)
}
