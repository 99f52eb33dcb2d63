//! Expense analysis report
//!
//! Bundles the filtered records with their total, by-type, share and
//! by-date aggregates, and renders them for the terminal or for export.

use std::io::Write;

use serde::Serialize;

use crate::config::Settings;
use crate::display::{format_bar_chart, format_expense_table};
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Expense, Money, COLUMNS};

use super::filter::ExpenseFilter;
use super::query::{self, DateTotal, TypeShare, TypeTotal};

/// Result of running a filter over a record set
#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    /// The filter the report was built with
    pub filter: ExpenseFilter,
    /// Matching records in store order
    pub records: Vec<Expense>,
    pub total: Money,
    pub by_type: Vec<TypeTotal>,
    pub shares: Vec<TypeShare>,
    pub by_date: Vec<DateTotal>,
}

impl Analysis {
    /// Filter the records and compute every aggregate
    pub fn generate(records: &[Expense], filter: ExpenseFilter) -> Self {
        let selected = query::filter(records, &filter);

        Self {
            total: query::total(&selected),
            by_type: query::aggregate_by_type(&selected),
            shares: query::type_shares(&selected),
            by_date: query::aggregate_by_date(&selected),
            records: selected,
            filter,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, settings: &Settings) -> String {
        let money = |m: Money| settings.format_money(m);
        let mut output = String::new();

        output.push_str(&format!("Total Expense: {}\n", money(self.total)));
        if let Some(range) = self.filter.date_range {
            output.push_str(&format!(
                "Period: {} to {}\n",
                range.start.format(&settings.date_format),
                range.end.format(&settings.date_format)
            ));
        }
        output.push_str(&format!("Entries: {}\n\n", self.records.len()));

        output.push_str(&format_expense_table(&self.records, settings));
        output.push('\n');

        let by_type: Vec<(String, Money)> = self
            .by_type
            .iter()
            .map(|t| (t.expense_type.to_string(), t.amount))
            .collect();
        output.push_str(&format_bar_chart(
            "Expense Type Distribution",
            &by_type,
            money,
        ));
        output.push('\n');

        output.push_str("Expense Type Breakdown\n");
        output.push_str(&"-".repeat(22));
        output.push('\n');
        if self.shares.is_empty() {
            output.push_str("(no data)\n");
        }
        for share in &self.shares {
            output.push_str(&format!(
                "{:<12} {:>6.1}%  {}\n",
                share.expense_type.to_string(),
                share.percentage,
                money(share.amount)
            ));
        }
        output.push('\n');

        let by_date: Vec<(String, Money)> = self
            .by_date
            .iter()
            .map(|d| (d.date.format(&settings.date_format).to_string(), d.amount))
            .collect();
        output.push_str(&format_bar_chart(
            "Daily Expenditure Trend",
            &by_date,
            money,
        ));

        output
    }

    /// Export the filtered records in the spreadsheet's own layout
    pub fn export_csv<W: Write>(&self, writer: W) -> ExpenseResult<()> {
        let mut csv_writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(writer);

        csv_writer
            .write_record(COLUMNS)
            .map_err(|e| ExpenseError::Io(e.to_string()))?;
        for record in &self.records {
            csv_writer.serialize(record)?;
        }
        csv_writer
            .flush()
            .map_err(|e| ExpenseError::Io(e.to_string()))?;
        Ok(())
    }

    /// Export the whole report as pretty JSON
    pub fn export_json<W: Write>(&self, writer: W) -> ExpenseResult<()> {
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExpenseType, PaymentMethod};
    use crate::storage::read_csv;
    use chrono::{NaiveDate, NaiveTime};
    use tempfile::TempDir;

    fn record(t: ExpenseType, day: u32, amount: i64, m: PaymentMethod) -> Expense {
        Expense::new(
            t,
            NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            NaiveTime::from_hms_opt(10, 30, 0).unwrap(),
            "note",
            "Vethik",
            m,
            Money::from_units(amount),
        )
    }

    fn sample() -> Vec<Expense> {
        vec![
            record(ExpenseType::Grocery, 5, 50, PaymentMethod::Cash),
            record(ExpenseType::Food, 6, 30, PaymentMethod::Phonepay),
        ]
    }

    #[test]
    fn test_generate_with_defaults() {
        let records = sample();
        let analysis = Analysis::generate(&records, ExpenseFilter::defaults_for(&records));

        assert_eq!(analysis.records, records);
        assert_eq!(analysis.total, Money::from_units(80));
        assert_eq!(analysis.by_type.len(), 2);
        assert_eq!(analysis.by_date.len(), 2);
        assert_eq!(analysis.shares.len(), 2);
    }

    #[test]
    fn test_generate_empty() {
        let analysis = Analysis::generate(&[], ExpenseFilter::defaults_for(&[]));
        assert!(analysis.is_empty());
        assert!(analysis.total.is_zero());
        assert!(analysis.by_type.is_empty());

        let text = analysis.format_terminal(&Settings::default());
        assert!(text.starts_with("Total Expense: ₹0.00\n"));
        assert!(text.contains("No expenses found."));
    }

    #[test]
    fn test_format_terminal() {
        let records = sample();
        let analysis = Analysis::generate(&records, ExpenseFilter::defaults_for(&records));
        let text = analysis.format_terminal(&Settings::default());

        assert!(text.starts_with("Total Expense: ₹80.00\n"));
        assert!(text.contains("Period: 2024-01-05 to 2024-01-06"));
        assert!(text.contains("Expense Type Distribution"));
        assert!(text.contains("Expense Type Breakdown"));
        assert!(text.contains("Grocery        62.5%  ₹50.00"));
        assert!(text.contains("Daily Expenditure Trend"));
    }

    #[test]
    fn test_export_csv_is_readable_sheet() {
        let records = sample();
        let filter = ExpenseFilter::defaults_for(&records).with_methods(&[PaymentMethod::Cash]);
        let analysis = Analysis::generate(&records, filter);

        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("export.csv");
        analysis
            .export_csv(std::fs::File::create(&path).unwrap())
            .unwrap();

        let exported: Vec<Expense> = read_csv(&path).unwrap();
        assert_eq!(exported, vec![records[0].clone()]);
    }

    #[test]
    fn test_export_json() {
        let records = sample();
        let analysis = Analysis::generate(&records, ExpenseFilter::defaults_for(&records));

        let mut buf = Vec::new();
        analysis.export_json(&mut buf).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();

        assert_eq!(value["total"], "80.00");
        assert_eq!(value["records"].as_array().unwrap().len(), 2);
        assert_eq!(value["by_type"][0]["expense_type"], "Grocery");
        assert_eq!(value["by_date"][1]["date"], "2024-01-06");
    }
}
