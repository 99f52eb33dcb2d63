//! Display formatting for terminal output
//!
//! Tables and text charts for the CLI.

pub mod chart;
pub mod expense;

pub use chart::format_bar_chart;
pub use expense::{format_expense_saved, format_expense_table, truncate};
