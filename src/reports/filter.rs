//! Filter selection for the analysis view
//!
//! A filter is four predicates ANDed together: type, payment method,
//! entered-by and an inclusive date range. The default selection is every
//! value present in the data, which keeps every record.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::{Expense, ExpenseType, PaymentMethod};

/// Inclusive date range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// A reversed range contains nothing
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// The values the filter controls offer, taken from the data
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOptions {
    /// Distinct types in first-appearance order
    pub types: Vec<ExpenseType>,
    /// Distinct payment methods in first-appearance order
    pub methods: Vec<PaymentMethod>,
    /// Distinct entered-by names in first-appearance order
    pub people: Vec<String>,
    /// Earliest and latest date, `None` when there are no records
    pub date_range: Option<DateRange>,
}

impl FilterOptions {
    pub fn from_records(records: &[Expense]) -> Self {
        let mut options = Self::default();

        for record in records {
            if !options.types.contains(&record.expense_type) {
                options.types.push(record.expense_type);
            }
            if !options.methods.contains(&record.payment_method) {
                options.methods.push(record.payment_method);
            }
            if !options.people.contains(&record.entered_by) {
                options.people.push(record.entered_by.clone());
            }
        }

        let first = records.iter().map(|r| r.date).min();
        let last = records.iter().map(|r| r.date).max();
        options.date_range = first.zip(last).map(|(start, end)| DateRange::new(start, end));

        options
    }
}

/// A concrete filter selection
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExpenseFilter {
    pub types: BTreeSet<ExpenseType>,
    pub methods: BTreeSet<PaymentMethod>,
    pub entered_by: BTreeSet<String>,
    /// `None` places no restriction on dates
    pub date_range: Option<DateRange>,
}

impl ExpenseFilter {
    /// Select every value the options offer
    pub fn select_all(options: &FilterOptions) -> Self {
        Self {
            types: options.types.iter().copied().collect(),
            methods: options.methods.iter().copied().collect(),
            entered_by: options.people.iter().cloned().collect(),
            date_range: options.date_range,
        }
    }

    /// The default filter for a record set: every value present in the data
    pub fn defaults_for(records: &[Expense]) -> Self {
        Self::select_all(&FilterOptions::from_records(records))
    }

    /// Replace the type selection unless `types` is empty
    pub fn with_types(mut self, types: &[ExpenseType]) -> Self {
        if !types.is_empty() {
            self.types = types.iter().copied().collect();
        }
        self
    }

    /// Replace the payment method selection unless `methods` is empty
    pub fn with_methods(mut self, methods: &[PaymentMethod]) -> Self {
        if !methods.is_empty() {
            self.methods = methods.iter().copied().collect();
        }
        self
    }

    /// Replace the entered-by selection unless `people` is empty
    pub fn with_people(mut self, people: &[String]) -> Self {
        if !people.is_empty() {
            self.entered_by = people.iter().cloned().collect();
        }
        self
    }

    /// Override either end of the date range
    ///
    /// A missing end falls back to the current range, or to the given other
    /// end when there is no current range.
    pub fn with_dates(mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        let current = self.date_range;
        let start = start.or(current.map(|r| r.start)).or(end);
        let end = end.or(current.map(|r| r.end)).or(start);
        self.date_range = start.zip(end).map(|(s, e)| DateRange::new(s, e));
        self
    }

    /// Whether a single record satisfies all four predicates
    pub fn matches(&self, record: &Expense) -> bool {
        self.types.contains(&record.expense_type)
            && self.methods.contains(&record.payment_method)
            && self.entered_by.contains(&record.entered_by)
            && self.date_range.map_or(true, |r| r.contains(record.date))
    }
}
