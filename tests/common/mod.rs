#![allow(dead_code)]

use chrono::NaiveDate;
use clap::Parser;
use shelfkeep::cli::{self, Cli};
use shelfkeep::domain::error::ShelfError;
use shelfkeep::domain::finance::FinancialRecord;
use shelfkeep::domain::product::Product;
use shelfkeep::ports::config_port::ConfigPort;
use shelfkeep::ports::finance_port::FinancePort;
use shelfkeep::ports::product_port::ProductPort;
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::Path;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// In-memory config keyed by (section, key).
#[derive(Default)]
pub struct MockConfig {
    values: HashMap<(String, String), String>,
}

impl MockConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, section: &str, key: &str, value: &str) -> Self {
        self.values
            .insert((section.to_string(), key.to_string()), value.to_string());
        self
    }
}

impl ConfigPort for MockConfig {
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        self.values
            .get(&(section.to_string(), key.to_string()))
            .cloned()
    }

    fn get_int(&self, section: &str, key: &str) -> Result<Option<i64>, String> {
        match self.get_string(section, key) {
            None => Ok(None),
            Some(raw) => raw.parse().map(Some).map_err(|_| raw),
        }
    }
}

/// Both ledgers held in memory, with an optional forced failure on writes.
#[derive(Default)]
pub struct MockLedger {
    pub products: RefCell<Vec<Product>>,
    pub records: RefCell<Vec<FinancialRecord>>,
    pub fail_writes: bool,
}

impl MockLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail_writes: true,
            ..Self::default()
        }
    }

    fn check_write(&self) -> Result<(), ShelfError> {
        if self.fail_writes {
            return Err(ShelfError::Storage {
                file: "memory".into(),
                reason: "write refused".into(),
            });
        }
        Ok(())
    }
}

impl ProductPort for MockLedger {
    fn load_products(&self) -> Result<Vec<Product>, ShelfError> {
        Ok(self.products.borrow().clone())
    }

    fn append_product(&self, product: &Product) -> Result<(), ShelfError> {
        self.check_write()?;
        self.products.borrow_mut().push(product.clone());
        Ok(())
    }

    fn save_products(&self, products: &[Product]) -> Result<(), ShelfError> {
        self.check_write()?;
        *self.products.borrow_mut() = products.to_vec();
        Ok(())
    }
}

impl FinancePort for MockLedger {
    fn load_records(&self) -> Result<Vec<FinancialRecord>, ShelfError> {
        Ok(self.records.borrow().clone())
    }

    fn save_records(&self, records: &[FinancialRecord]) -> Result<(), ShelfError> {
        self.check_write()?;
        *self.records.borrow_mut() = records.to_vec();
        Ok(())
    }
}

/// Run one command line against `data_dir`, returning stdout text.
pub fn run_in(data_dir: &Path, args: &[&str]) -> Result<String, ShelfError> {
    let data_dir = data_dir.to_string_lossy().into_owned();
    let mut argv = vec!["shelfkeep", "--data-dir", data_dir.as_str()];
    argv.extend_from_slice(args);
    let cli = Cli::try_parse_from(argv).unwrap();

    let mut out = Vec::new();
    cli::execute(&cli, &mut out)?;
    Ok(String::from_utf8(out).unwrap())
}

/// Pin the simulated date so tests do not depend on the wall clock.
pub fn set_date(data_dir: &Path, today: &str) {
    std::fs::create_dir_all(data_dir).unwrap();
    std::fs::write(data_dir.join(cli::DEFAULT_CLOCK_FILE), today).unwrap();
}
