//! Simulated calendar arithmetic.
//!
//! The shop never consults the wall clock for "today": every operation takes
//! the simulated date explicitly, and this module only moves it around.

use chrono::{Duration, NaiveDate};

use super::error::ShelfError;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Shift `date` by a signed number of days.
pub fn advance(date: NaiveDate, days: i64) -> Result<NaiveDate, ShelfError> {
    Duration::try_days(days)
        .and_then(|delta| date.checked_add_signed(delta))
        .ok_or(ShelfError::DateOutOfRange { from: date, days })
}

pub fn parse_date(value: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
}

/// Which simulated day a report or record refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateSelector {
    Today,
    Yesterday,
    On(NaiveDate),
}

impl DateSelector {
    pub fn resolve(self, today: NaiveDate) -> Result<NaiveDate, ShelfError> {
        match self {
            DateSelector::Today => Ok(today),
            DateSelector::Yesterday => advance(today, -1),
            DateSelector::On(date) => Ok(date),
        }
    }

    /// Heading for a report about `subject`, e.g. "Today's revenue" or
    /// "Revenue for 2024-04-01".
    pub fn heading(self, subject: &str) -> String {
        match self {
            DateSelector::Today => format!("Today's {subject}"),
            DateSelector::Yesterday => format!("Yesterday's {subject}"),
            DateSelector::On(date) => {
                let mut chars = subject.chars();
                let capitalised: String = match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect(),
                    None => String::new(),
                };
                format!("{capitalised} for {}", date.format(DATE_FORMAT))
            }
        }
    }
}
