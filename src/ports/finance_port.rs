//! Financial ledger storage port trait.

use crate::domain::error::ShelfError;
use crate::domain::finance::FinancialRecord;

pub trait FinancePort {
    fn load_records(&self) -> Result<Vec<FinancialRecord>, ShelfError>;
    fn save_records(&self, records: &[FinancialRecord]) -> Result<(), ShelfError>;
}
