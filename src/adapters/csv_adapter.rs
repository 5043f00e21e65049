//! CSV file ledger adapters.
//!
//! Both ledgers are plain CSV files with a header row. Reads deserialize by
//! header name; writes emit the header explicitly so an empty ledger still
//! round-trips.

use crate::domain::error::ShelfError;
use crate::domain::finance::FinancialRecord;
use crate::domain::product::Product;
use crate::ports::finance_port::FinancePort;
use crate::ports::product_port::ProductPort;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use tracing::debug;

pub const PRODUCT_HEADERS: [&str; 7] = [
    "id",
    "product_name",
    "buy_date",
    "buy_price",
    "expiration_date",
    "sell_date",
    "sell_price",
];

pub const FINANCE_HEADERS: [&str; 4] = ["date", "costs", "revenue", "profit"];

fn storage_error(path: &Path, reason: impl std::fmt::Display) -> ShelfError {
    ShelfError::Storage {
        file: path.display().to_string(),
        reason: reason.to_string(),
    }
}

/// Create `path` holding only `headers` unless it already has content.
/// A zero-byte file is treated as missing so appends never land headerless.
fn ensure_table(path: &Path, headers: &[&str]) -> Result<(), ShelfError> {
    if path.exists() && fs::metadata(path)?.len() > 0 {
        return Ok(());
    }
    debug!(path = %path.display(), "creating empty ledger");
    write_rows::<Product>(path, headers, &[])
}

fn read_rows<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, ShelfError> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let mut rdr = csv::Reader::from_path(path).map_err(|e| storage_error(path, e))?;

    let mut rows = Vec::new();
    for result in rdr.deserialize() {
        let row: T = result.map_err(|e| storage_error(path, format!("CSV parse error: {e}")))?;
        rows.push(row);
    }
    Ok(rows)
}

fn write_rows<T: Serialize>(path: &Path, headers: &[&str], rows: &[T]) -> Result<(), ShelfError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .map_err(|e| storage_error(path, e))?;
    wtr.write_record(headers)
        .map_err(|e| storage_error(path, e))?;
    for row in rows {
        wtr.serialize(row).map_err(|e| storage_error(path, e))?;
    }
    wtr.flush()?;
    Ok(())
}

pub struct CsvProductAdapter {
    path: PathBuf,
}

impl CsvProductAdapter {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Create the ledger with just its header row if it is missing.
    pub fn ensure_exists(&self) -> Result<(), ShelfError> {
        ensure_table(&self.path, &PRODUCT_HEADERS)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ProductPort for CsvProductAdapter {
    fn load_products(&self) -> Result<Vec<Product>, ShelfError> {
        read_rows(&self.path)
    }

    fn append_product(&self, product: &Product) -> Result<(), ShelfError> {
        self.ensure_exists()?;
        let file = OpenOptions::new().append(true).open(&self.path)?;
        let mut wtr = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        wtr.serialize(product)
            .map_err(|e| storage_error(&self.path, e))?;
        wtr.flush()?;
        Ok(())
    }

    fn save_products(&self, products: &[Product]) -> Result<(), ShelfError> {
        write_rows(&self.path, &PRODUCT_HEADERS, products)
    }
}

pub struct CsvFinanceAdapter {
    path: PathBuf,
}

impl CsvFinanceAdapter {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn ensure_exists(&self) -> Result<(), ShelfError> {
        ensure_table(&self.path, &FINANCE_HEADERS)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl FinancePort for CsvFinanceAdapter {
    fn load_records(&self) -> Result<Vec<FinancialRecord>, ShelfError> {
        read_rows(&self.path)
    }

    fn save_records(&self, records: &[FinancialRecord]) -> Result<(), ShelfError> {
        write_rows(&self.path, &FINANCE_HEADERS, records)
    }
}
