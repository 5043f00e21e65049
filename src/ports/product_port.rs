//! Product ledger storage port trait.

use crate::domain::error::ShelfError;
use crate::domain::product::Product;

pub trait ProductPort {
    /// All products in ledger order.
    fn load_products(&self) -> Result<Vec<Product>, ShelfError>;

    fn append_product(&self, product: &Product) -> Result<(), ShelfError>;

    /// Replace the whole ledger.
    fn save_products(&self, products: &[Product]) -> Result<(), ShelfError>;
}
