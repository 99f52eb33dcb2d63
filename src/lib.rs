//! Expense Tracker - record and analyze day-to-day household expenses
//!
//! Expenses are appended to a single CSV file, one row per purchase, and
//! analyzed by filtering on type, payment method, person and date range.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: The expense record, its enumerations, and money
//! - `storage`: CSV file storage layer
//! - `services`: Entry validation
//! - `reports`: Filtering, aggregation and the analysis report
//! - `display`: Terminal tables and text charts
//! - `cli`: Command handlers
//! - `tui`: Interactive terminal interface
//!
//! # Example
//!
//! ```rust,ignore
//! use expense_tracker::config::{Settings, TrackerPaths};
//! use expense_tracker::reports::{Analysis, ExpenseFilter};
//! use expense_tracker::storage::Storage;
//!
//! let paths = TrackerPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let storage = Storage::new(paths)?;
//!
//! let records = storage.expenses.read_all();
//! let analysis = Analysis::generate(&records, ExpenseFilter::defaults_for(&records));
//! println!("{}", analysis.format_terminal(&settings));
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;
pub mod tui;

pub use error::{ExpenseError, ExpenseResult};
