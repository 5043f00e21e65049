//! Chart rendering port trait.

use crate::domain::error::ShelfError;
use crate::domain::finance::FinancialRecord;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Bar,
    Line,
}

/// Port for drawing costs, revenue and profit per recorded day.
pub trait ChartPort {
    /// `records` are already sorted by date.
    fn render(
        &self,
        records: &[FinancialRecord],
        kind: ChartKind,
        output_path: &Path,
    ) -> Result<(), ShelfError>;
}
