//! Expense store backed by a single spreadsheet file
//!
//! Every append is a full read-modify-write of the sheet. There is no
//! locking; two writers racing each other will lose rows.

use std::path::{Path, PathBuf};

use tracing::{debug, error};

use crate::error::ExpenseResult;
use crate::models::{Expense, COLUMNS};

use super::file_io::{read_csv, write_csv_atomic};

/// Repository owning the expense spreadsheet
#[derive(Debug, Clone)]
pub struct ExpenseStore {
    path: PathBuf,
}

impl ExpenseStore {
    /// Create a store over the given spreadsheet path
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load every record in file order
    ///
    /// A missing file yields an empty collection; an unreadable or malformed
    /// one is an error.
    pub fn load(&self) -> ExpenseResult<Vec<Expense>> {
        let records: Vec<Expense> = read_csv(&self.path)?;
        debug!(
            path = %self.path.display(),
            count = records.len(),
            "loaded expense records"
        );
        Ok(records)
    }

    /// Load every record, reporting a failure and returning nothing instead
    pub fn read_all(&self) -> Vec<Expense> {
        match self.load() {
            Ok(records) => records,
            Err(e) => {
                error!(path = %self.path.display(), "Error fetching expense data: {}", e);
                Vec::new()
            }
        }
    }

    /// Append a record and rewrite the whole sheet
    ///
    /// If the existing sheet cannot be read the entry is dropped and the file
    /// is left untouched.
    pub fn append(&self, entry: &Expense) -> ExpenseResult<()> {
        let mut records = self.load()?;
        records.push(entry.clone());
        write_csv_atomic(&self.path, &COLUMNS, &records)?;
        debug!(
            path = %self.path.display(),
            count = records.len(),
            "appended expense record"
        );
        Ok(())
    }
}
