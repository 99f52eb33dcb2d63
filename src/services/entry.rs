//! Entry service
//!
//! Turns raw entry-form input into an expense record, validating the pieces
//! the spreadsheet can't enforce, and appends it to the store.

use chrono::{NaiveDate, NaiveTime};
use tracing::info;

use crate::config::Settings;
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Expense, ExpenseType, Money, PaymentMethod};
use crate::storage::Storage;

/// Input for recording a new expense
#[derive(Debug, Clone)]
pub struct EntryInput {
    pub expense_type: ExpenseType,
    pub date: NaiveDate,
    pub hour: u32,
    pub minute: u32,
    pub details: String,
    pub entered_by: String,
    pub payment_method: PaymentMethod,
    pub amount: Money,
}

/// Service for recording expenses
pub struct EntryService<'a> {
    storage: &'a Storage,
    settings: &'a Settings,
}

impl<'a> EntryService<'a> {
    pub fn new(storage: &'a Storage, settings: &'a Settings) -> Self {
        Self { storage, settings }
    }

    /// Validate input and build the record without saving it
    pub fn build(&self, input: EntryInput) -> ExpenseResult<Expense> {
        if input.hour > 23 {
            return Err(ExpenseError::invalid_field("hour", input.hour, "Use 0-23"));
        }
        if input.minute > 59 {
            return Err(ExpenseError::invalid_field("minute", input.minute, "Use 0-59"));
        }
        if input.amount.is_negative() {
            return Err(ExpenseError::invalid_field(
                "amount",
                input.amount,
                "Amount must not be negative",
            ));
        }

        let person = self.settings.find_person(&input.entered_by)?;
        let time = NaiveTime::from_hms_opt(input.hour, input.minute, 0)
            .ok_or_else(|| ExpenseError::Validation("Invalid time of day".into()))?;

        Ok(Expense::new(
            input.expense_type,
            input.date,
            time,
            input.details.trim(),
            person,
            input.payment_method,
            input.amount,
        ))
    }

    /// Validate, build and append an expense
    pub fn record(&self, input: EntryInput) -> ExpenseResult<Expense> {
        let expense = self.build(input)?;
        self.storage.expenses.append(&expense)?;
        info!(
            expense_type = %expense.expense_type,
            date = %expense.date,
            amount = %expense.amount,
            "recorded expense"
        );
        Ok(expense)
    }
}
