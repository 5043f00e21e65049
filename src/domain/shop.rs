//! Shop operations bound to one simulated day.
//!
//! A [`Shop`] pairs the simulated "today" with the product and financial
//! ledgers. Every command reads the ledger it needs afresh, transforms it in
//! memory, and writes it back when it mutated something.

use chrono::NaiveDate;
use std::collections::BTreeMap;
use tracing::{debug, info};

use super::error::ShelfError;
use super::finance::{self, FinancialRecord};
use super::inventory::{self, StockLine};
use super::product::Product;
use crate::ports::finance_port::FinancePort;
use crate::ports::product_port::ProductPort;

pub struct Shop<'a> {
    today: NaiveDate,
    products: &'a dyn ProductPort,
    finances: &'a dyn FinancePort,
}

impl<'a> Shop<'a> {
    pub fn new(
        today: NaiveDate,
        products: &'a dyn ProductPort,
        finances: &'a dyn FinancePort,
    ) -> Self {
        Shop {
            today,
            products,
            finances,
        }
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    fn load(&self) -> Result<Vec<Product>, ShelfError> {
        let products = self.products.load_products()?;
        debug!(rows = products.len(), "loaded product ledger");
        Ok(products)
    }

    /// Record the purchase of one unit, bought today.
    pub fn buy(
        &self,
        name: &str,
        price: f64,
        expiration_date: Option<NaiveDate>,
    ) -> Result<Product, ShelfError> {
        let product = Product::purchase(name, price, self.today, expiration_date);
        self.products.append_product(&product)?;
        info!(id = %product.id, name, price, "bought product");
        Ok(product)
    }

    /// Sell one sellable unit named `name`.
    ///
    /// Fails with [`ShelfError::NotInStock`] when no unsold, already-bought,
    /// unexpired unit exists. The whole ledger is rewritten on success.
    pub fn sell(&self, name: &str, price: f64) -> Result<Product, ShelfError> {
        let mut products = self.load()?;
        let index = inventory::select_for_sale(&products, name, self.today).ok_or_else(|| {
            ShelfError::NotInStock {
                name: name.to_string(),
            }
        })?;

        products[index].mark_sold(self.today, price);
        self.products.save_products(&products)?;

        let sold = products.swap_remove(index);
        info!(id = %sold.id, name, price, "sold product");
        Ok(sold)
    }

    pub fn stock(&self) -> Result<Vec<StockLine>, ShelfError> {
        Ok(inventory::list_in_stock(&self.load()?, self.today))
    }

    pub fn stock_counts(&self) -> Result<BTreeMap<String, usize>, ShelfError> {
        Ok(inventory::count_in_stock(&self.load()?, self.today))
    }

    /// Units sold on `date`, sorted by name.
    pub fn sold_products(&self, date: NaiveDate) -> Result<Vec<Product>, ShelfError> {
        let products = self.load()?;
        let mut sold: Vec<Product> = finance::sold_products(&products, date)
            .into_iter()
            .cloned()
            .collect();
        sold.sort_by(|a, b| a.product_name.cmp(&b.product_name));
        Ok(sold)
    }

    pub fn summary(&self, date: NaiveDate) -> Result<FinancialRecord, ShelfError> {
        Ok(FinancialRecord::compute(&self.load()?, date))
    }

    /// Compute the day's aggregates and upsert them into the financial ledger.
    pub fn record(&self, date: NaiveDate) -> Result<FinancialRecord, ShelfError> {
        let record = self.summary(date)?;
        let mut records = self.finances.load_records()?;
        finance::upsert(&mut records, record.clone());
        self.finances.save_records(&records)?;
        info!(%date, rows = records.len(), "recorded financial summary");
        Ok(record)
    }

    /// All recorded days, oldest first.
    pub fn financial_history(&self) -> Result<Vec<FinancialRecord>, ShelfError> {
        let mut records = self.finances.load_records()?;
        finance::sort_by_date(&mut records);
        Ok(records)
    }
}
