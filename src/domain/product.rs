//! Product ledger rows and the availability predicates over them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One purchased unit. Created on purchase, mutated once on sale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: Uuid,
    pub product_name: String,
    pub buy_date: NaiveDate,
    pub buy_price: f64,
    pub expiration_date: Option<NaiveDate>,
    pub sell_date: Option<NaiveDate>,
    pub sell_price: Option<f64>,
}

/// How a unit's expiration reads on a given day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expiration {
    NonExpiring,
    Expired,
    Expires(NaiveDate),
}

impl std::fmt::Display for Expiration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Expiration::NonExpiring => write!(f, "Non-expiring"),
            Expiration::Expired => write!(f, "Expired"),
            Expiration::Expires(date) => write!(f, "{}", date),
        }
    }
}

impl Product {
    pub fn purchase(
        name: impl Into<String>,
        buy_price: f64,
        buy_date: NaiveDate,
        expiration_date: Option<NaiveDate>,
    ) -> Self {
        Product {
            id: Uuid::new_v4(),
            product_name: name.into(),
            buy_date,
            buy_price,
            expiration_date,
            sell_date: None,
            sell_price: None,
        }
    }

    pub fn mark_sold(&mut self, sell_date: NaiveDate, sell_price: f64) {
        self.sell_date = Some(sell_date);
        self.sell_price = Some(sell_price);
    }

    pub fn is_sold(&self) -> bool {
        self.sell_date.is_some()
    }

    pub fn is_non_expiring(&self) -> bool {
        self.expiration_date.is_none()
    }

    /// Non-expiring, or expiring today or later.
    pub fn is_fresh(&self, today: NaiveDate) -> bool {
        self.expiration_date.is_none_or(|exp| exp >= today)
    }

    /// Unsold and already bought as of `today`. Ignores freshness.
    pub fn is_on_shelf(&self, today: NaiveDate) -> bool {
        !self.is_sold() && self.buy_date <= today
    }

    pub fn is_sellable(&self, today: NaiveDate) -> bool {
        self.is_on_shelf(today) && self.is_fresh(today)
    }

    pub fn expiration(&self, today: NaiveDate) -> Expiration {
        match self.expiration_date {
            None => Expiration::NonExpiring,
            Some(_) if !self.is_fresh(today) => Expiration::Expired,
            Some(date) => Expiration::Expires(date),
        }
    }

    pub fn sold_on(&self, date: NaiveDate) -> bool {
        self.sell_date == Some(date)
    }
}

/// Title-case a product name for display ("green apple" -> "Green Apple").
pub fn display_name(name: &str) -> String {
    name.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
