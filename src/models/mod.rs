//! Core data models for the expense tracker
//!
//! A single entity, the expense record, plus the money type used for its
//! amount.

pub mod expense;
pub mod money;

pub use expense::{Expense, ExpenseType, PaymentMethod, COLUMNS};
pub use money::{Money, MoneyParseError};
