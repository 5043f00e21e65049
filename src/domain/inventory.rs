//! In-stock queries over the product ledger.

use chrono::NaiveDate;
use std::collections::BTreeMap;

use super::product::{Expiration, Product};

/// A listed unit as shown in the inventory table.
#[derive(Debug, Clone, PartialEq)]
pub struct StockLine {
    pub product_name: String,
    pub buy_price: f64,
    pub expiration: Expiration,
}

/// Index of the unit a sale of `name` would consume.
///
/// Among unsold, already-bought, fresh units with that exact name, the last
/// one in ledger order wins.
pub fn select_for_sale(products: &[Product], name: &str, today: NaiveDate) -> Option<usize> {
    products
        .iter()
        .rposition(|p| p.product_name == name && p.is_sellable(today))
}

/// Units on the shelf today, sorted by name. Expired units are included and
/// annotated as such.
pub fn list_in_stock(products: &[Product], today: NaiveDate) -> Vec<StockLine> {
    let mut lines: Vec<StockLine> = products
        .iter()
        .filter(|p| p.is_on_shelf(today))
        .map(|p| StockLine {
            product_name: p.product_name.clone(),
            buy_price: p.buy_price,
            expiration: p.expiration(today),
        })
        .collect();
    lines.sort_by(|a, b| a.product_name.cmp(&b.product_name));
    lines
}

/// Name -> number of units on the shelf today.
pub fn count_in_stock(products: &[Product], today: NaiveDate) -> BTreeMap<String, usize> {
    let mut tally = BTreeMap::new();
    for p in products.iter().filter(|p| p.is_on_shelf(today)) {
        *tally.entry(p.product_name.clone()).or_insert(0) += 1;
    }
    tally
}
