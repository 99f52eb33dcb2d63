//! Entry CLI command
//!
//! The command-line counterpart of the entry form: every form field is a
//! flag, with the form's defaults.

use chrono::{Local, NaiveDate, Timelike};
use clap::Args;

use crate::config::Settings;
use crate::display::format_expense_saved;
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{ExpenseType, PaymentMethod};
use crate::services::{EntryInput, EntryService};
use crate::storage::Storage;

/// Arguments for `add`
#[derive(Args, Debug, Clone)]
pub struct AddArgs {
    /// Amount spent (e.g. "50" or "49.50"), must not be negative
    pub amount: String,

    /// Expense type (Grocery, Cosmetics, Clothes, Travel, Food, Vegetables,
    /// Medicine, Others, EB-bill)
    #[arg(short = 't', long = "type", default_value = "Grocery")]
    pub expense_type: ExpenseType,

    /// Date of the expense (YYYY-MM-DD), defaults to today
    #[arg(short, long)]
    pub date: Option<String>,

    /// Hour of the expense (0-23), defaults to the current hour
    #[arg(long)]
    pub hour: Option<u32>,

    /// Minute of the expense (0-59), defaults to the current minute
    #[arg(long)]
    pub minute: Option<u32>,

    /// Who entered the expense, defaults to the first configured person
    #[arg(short = 'b', long = "by")]
    pub entered_by: Option<String>,

    /// Free-text details
    #[arg(short = 'm', long, default_value = "")]
    pub details: String,

    /// Payment method (cash, phonepay)
    #[arg(short = 'p', long = "method", default_value = "cash")]
    pub payment_method: PaymentMethod,
}

/// Parse a `YYYY-MM-DD` argument
pub fn parse_date_arg(value: &str) -> ExpenseResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| ExpenseError::invalid_field("date", value, "Use YYYY-MM-DD"))
}

/// Handle the `add` command
pub fn handle_add_command(storage: &Storage, settings: &Settings, args: AddArgs) -> ExpenseResult<()> {
    let now = Local::now();

    let amount = settings.parse_money(&args.amount).map_err(|e| {
        ExpenseError::Validation(format!(
            "Invalid amount: '{}'. Use a non-negative number like '50' or '49.50'. {}",
            args.amount, e
        ))
    })?;

    let date = match args.date {
        Some(date_str) => parse_date_arg(&date_str)?,
        None => now.date_naive(),
    };

    let input = EntryInput {
        expense_type: args.expense_type,
        date,
        hour: args.hour.unwrap_or_else(|| now.hour()),
        minute: args.minute.unwrap_or_else(|| now.minute()),
        details: args.details,
        entered_by: args
            .entered_by
            .unwrap_or_else(|| settings.default_person().to_string()),
        payment_method: args.payment_method,
        amount,
    };

    let expense = EntryService::new(storage, settings).record(input)?;
    println!("{}", format_expense_saved(&expense, settings));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TrackerPaths;
    use crate::models::Money;
    use tempfile::TempDir;

    fn args(amount: &str) -> AddArgs {
        AddArgs {
            amount: amount.to_string(),
            expense_type: ExpenseType::Grocery,
            date: Some("2024-01-05".into()),
            hour: Some(10),
            minute: Some(30),
            entered_by: None,
            details: "milk".into(),
            payment_method: PaymentMethod::Cash,
        }
    }

    #[test]
    fn test_add_uses_default_person() {
        let temp_dir = TempDir::new().unwrap();
        let storage = Storage::new(TrackerPaths::with_base_dir(temp_dir.path().into())).unwrap();
        let settings = Settings::default();

        handle_add_command(&storage, &settings, args("50")).unwrap();

        let records = storage.expenses.read_all();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].entered_by, "Vethik");
        assert_eq!(records[0].amount, Money::from_units(50));
    }

    #[test]
    fn test_add_rejects_bad_amount_and_date() {
        let temp_dir = TempDir::new().unwrap();
        let storage = Storage::new(TrackerPaths::with_base_dir(temp_dir.path().into())).unwrap();
        let settings = Settings::default();

        assert!(handle_add_command(&storage, &settings, args("-5"))
            .unwrap_err()
            .is_validation());
        assert!(handle_add_command(&storage, &settings, args("abc5"))
            .unwrap_err()
            .is_validation());

        let mut bad_date = args("5");
        bad_date.date = Some("05/01/2024".into());
        assert!(handle_add_command(&storage, &settings, bad_date)
            .unwrap_err()
            .is_validation());

        assert!(storage.expenses.read_all().is_empty());
    }

    #[test]
    fn test_parse_date_arg() {
        assert_eq!(
            parse_date_arg("2024-01-05").unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 5).unwrap()
        );
        assert!(parse_date_arg("2024-13-01").is_err());
    }
}
