//! Domain error types.

/// Top-level error type for shelfkeep.
#[derive(Debug, thiserror::Error)]
pub enum ShelfError {
    #[error("storage error in {file}: {reason}")]
    Storage { file: String, reason: String },

    #[error("invalid date in {file}: {value:?} (expected YYYY-MM-DD)")]
    ClockCorrupt { file: String, value: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("date out of range: cannot move {from} by {days} days")]
    DateOutOfRange { from: chrono::NaiveDate, days: i64 },

    #[error("Product is expired or is not in stock.")]
    NotInStock { name: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&ShelfError> for std::process::ExitCode {
    fn from(err: &ShelfError) -> Self {
        let code: u8 = match err {
            ShelfError::Io(_) | ShelfError::NotInStock { .. } => 1,
            ShelfError::ConfigParse { .. } | ShelfError::ConfigInvalid { .. } => 2,
            ShelfError::Storage { .. } | ShelfError::ClockCorrupt { .. } => 3,
            ShelfError::DateOutOfRange { .. } => 4,
        };
        std::process::ExitCode::from(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_in_stock_message_is_user_facing() {
        let err = ShelfError::NotInStock {
            name: "apple".into(),
        };
        assert_eq!(err.to_string(), "Product is expired or is not in stock.");
    }

    #[test]
    fn storage_error_names_file() {
        let err = ShelfError::Storage {
            file: "products.csv".into(),
            reason: "bad row".into(),
        };
        assert_eq!(err.to_string(), "storage error in products.csv: bad row");
    }

    #[test]
    fn clock_corrupt_message_quotes_value() {
        let err = ShelfError::ClockCorrupt {
            file: "current_date.txt".into(),
            value: "yesterday".into(),
        };
        assert_eq!(
            err.to_string(),
            "invalid date in current_date.txt: \"yesterday\" (expected YYYY-MM-DD)"
        );
    }
}
