//! Plain-text file holding the simulated date.

use crate::domain::clock::{DATE_FORMAT, parse_date};
use crate::domain::error::ShelfError;
use crate::ports::clock_port::ClockPort;
use chrono::NaiveDate;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub struct DateFileAdapter {
    path: PathBuf,
}

impl DateFileAdapter {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Seed the file with `initial` if it does not exist yet.
    pub fn ensure_exists(&self, initial: NaiveDate) -> Result<(), ShelfError> {
        if self.path.exists() {
            return Ok(());
        }
        debug!(path = %self.path.display(), %initial, "creating date file");
        self.set_current_date(initial)
    }
}

impl ClockPort for DateFileAdapter {
    fn current_date(&self) -> Result<NaiveDate, ShelfError> {
        let content = fs::read_to_string(&self.path)?;
        parse_date(&content).map_err(|_| ShelfError::ClockCorrupt {
            file: self.path.display().to_string(),
            value: content.trim().to_string(),
        })
    }

    fn set_current_date(&self, date: NaiveDate) -> Result<(), ShelfError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, date.format(DATE_FORMAT).to_string())?;
        Ok(())
    }
}
