//! Simulated-date storage port trait.

use crate::domain::error::ShelfError;
use chrono::NaiveDate;

pub trait ClockPort {
    fn current_date(&self) -> Result<NaiveDate, ShelfError>;
    fn set_current_date(&self, date: NaiveDate) -> Result<(), ShelfError>;
}
