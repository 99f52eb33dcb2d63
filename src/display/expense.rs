//! Expense table formatting
//!
//! Renders records as a terminal table, the CLI counterpart of the
//! analysis view's data grid.

use tabled::{settings::Style, Table, Tabled};

use crate::config::Settings;
use crate::models::Expense;

#[derive(Tabled)]
struct ExpenseRow {
    #[tabled(rename = "Type")]
    expense_type: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Time")]
    time: String,
    #[tabled(rename = "Details")]
    details: String,
    #[tabled(rename = "Entered By")]
    entered_by: String,
    #[tabled(rename = "Payment")]
    payment_method: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

impl ExpenseRow {
    fn from_expense(expense: &Expense, settings: &Settings) -> Self {
        Self {
            expense_type: expense.expense_type.to_string(),
            date: expense.date.format(&settings.date_format).to_string(),
            time: expense.time_label(),
            details: truncate(&expense.details, 40),
            entered_by: expense.entered_by.clone(),
            payment_method: expense.payment_method.to_string(),
            amount: settings.format_money(expense.amount),
        }
    }
}

/// Format records as a table
pub fn format_expense_table(expenses: &[Expense], settings: &Settings) -> String {
    if expenses.is_empty() {
        return "No expenses found.\n".to_string();
    }

    let rows: Vec<ExpenseRow> = expenses
        .iter()
        .map(|e| ExpenseRow::from_expense(e, settings))
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    format!("{}\n", table)
}

/// One-line summary of a freshly saved record
pub fn format_expense_saved(expense: &Expense, settings: &Settings) -> String {
    format!(
        "Saved {} {} on {} {} ({}, {}){}",
        expense.expense_type,
        settings.format_money(expense.amount),
        expense.date.format(&settings.date_format),
        expense.time_label(),
        expense.entered_by,
        expense.payment_method,
        if expense.details.is_empty() {
            String::new()
        } else {
            format!(": {}", expense.details)
        }
    )
}

/// Truncate on a char boundary, marking the cut with an ellipsis
pub fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_chars.saturating_sub(1)).collect();
        format!("{}…", kept)
    }
}
