//! Service layer for the expense tracker
//!
//! Business logic on top of the storage layer: validation of form input
//! before records reach the spreadsheet.

pub mod entry;

pub use entry::{EntryInput, EntryService};
