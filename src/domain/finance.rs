//! Per-day financial aggregates derived from sold products.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::product::Product;

/// One row of the financial ledger. All amounts are derived and recomputable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialRecord {
    pub date: NaiveDate,
    pub costs: f64,
    pub revenue: f64,
    pub profit: f64,
}

/// Round to cents, half away from zero.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub fn sold_products(products: &[Product], date: NaiveDate) -> Vec<&Product> {
    products.iter().filter(|p| p.sold_on(date)).collect()
}

/// Sum of buy prices of units sold on `date`.
pub fn costs(products: &[Product], date: NaiveDate) -> f64 {
    round2(
        products
            .iter()
            .filter(|p| p.sold_on(date))
            .map(|p| p.buy_price)
            .sum(),
    )
}

/// Sum of sell prices of units sold on `date`.
pub fn revenue(products: &[Product], date: NaiveDate) -> f64 {
    round2(
        products
            .iter()
            .filter(|p| p.sold_on(date))
            .filter_map(|p| p.sell_price)
            .sum(),
    )
}

pub fn profit(products: &[Product], date: NaiveDate) -> f64 {
    round2(revenue(products, date) - costs(products, date))
}

impl FinancialRecord {
    pub fn compute(products: &[Product], date: NaiveDate) -> Self {
        let costs = costs(products, date);
        let revenue = revenue(products, date);
        FinancialRecord {
            date,
            costs,
            revenue,
            profit: round2(revenue - costs),
        }
    }
}

/// Insert `record`, replacing any existing row for the same date in place.
pub fn upsert(records: &mut Vec<FinancialRecord>, record: FinancialRecord) {
    match records.iter_mut().find(|r| r.date == record.date) {
        Some(existing) => *existing = record,
        None => records.push(record),
    }
}

pub fn sort_by_date(records: &mut [FinancialRecord]) {
    records.sort_by_key(|r| r.date);
}
