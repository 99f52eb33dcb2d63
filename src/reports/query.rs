//! Filtering and aggregation over expense records
//!
//! Pure functions: each analysis request passes its records and filter in
//! and gets fresh results back. Empty input gives empty aggregates and a
//! zero total.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::{Expense, ExpenseType, Money};

use super::filter::ExpenseFilter;

/// Sum of amounts for one type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TypeTotal {
    pub expense_type: ExpenseType,
    pub amount: Money,
    pub count: usize,
}

/// Sum of amounts for one calendar day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateTotal {
    pub date: NaiveDate,
    pub amount: Money,
    pub count: usize,
}

/// One slice of the by-type breakdown
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TypeShare {
    pub expense_type: ExpenseType,
    pub amount: Money,
    /// Percentage of the total, 0.0 when the total is zero
    pub percentage: f64,
}

/// Records satisfying every predicate of the filter, in input order
pub fn filter(records: &[Expense], filter: &ExpenseFilter) -> Vec<Expense> {
    records
        .iter()
        .filter(|r| filter.matches(r))
        .cloned()
        .collect()
}

/// Sum of amount grouped by type, in type declaration order
pub fn aggregate_by_type(records: &[Expense]) -> Vec<TypeTotal> {
    let mut groups: BTreeMap<ExpenseType, (Money, usize)> = BTreeMap::new();
    for record in records {
        let entry = groups.entry(record.expense_type).or_default();
        entry.0 += record.amount;
        entry.1 += 1;
    }

    groups
        .into_iter()
        .map(|(expense_type, (amount, count))| TypeTotal {
            expense_type,
            amount,
            count,
        })
        .collect()
}

/// Sum of amount grouped by calendar date, oldest first
pub fn aggregate_by_date(records: &[Expense]) -> Vec<DateTotal> {
    let mut groups: BTreeMap<NaiveDate, (Money, usize)> = BTreeMap::new();
    for record in records {
        let entry = groups.entry(record.date).or_default();
        entry.0 += record.amount;
        entry.1 += 1;
    }

    groups
        .into_iter()
        .map(|(date, (amount, count))| DateTotal {
            date,
            amount,
            count,
        })
        .collect()
}

/// Grand total of amounts
pub fn total(records: &[Expense]) -> Money {
    records.iter().map(|r| r.amount).sum()
}

/// Per-type amount with its share of the total
pub fn type_shares(records: &[Expense]) -> Vec<TypeShare> {
    let grand_total = total(records);

    aggregate_by_type(records)
        .into_iter()
        .map(|t| TypeShare {
            expense_type: t.expense_type,
            amount: t.amount,
            percentage: if grand_total.is_zero() {
                0.0
            } else {
                t.amount.cents() as f64 / grand_total.cents() as f64 * 100.0
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PaymentMethod;
    use crate::reports::filter::DateRange;
    use chrono::NaiveTime;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    fn record(t: ExpenseType, day: u32, amount: i64, m: PaymentMethod, by: &str) -> Expense {
        Expense::new(
            t,
            date(day),
            NaiveTime::from_hms_opt(10, 30, 0).unwrap(),
            "",
            by,
            m,
            Money::from_units(amount),
        )
    }

    fn sample() -> Vec<Expense> {
        vec![
            record(ExpenseType::Grocery, 5, 50, PaymentMethod::Cash, "Vethik"),
            record(ExpenseType::Food, 6, 30, PaymentMethod::Phonepay, "Ishwarya"),
            record(ExpenseType::Grocery, 6, 20, PaymentMethod::Cash, "Ishwarya"),
            record(ExpenseType::Travel, 8, 100, PaymentMethod::Phonepay, "Vethik"),
        ]
    }

    #[test]
    fn test_default_filter_keeps_everything() {
        let records = sample();
        let selected = filter(&records, &ExpenseFilter::defaults_for(&records));
        assert_eq!(selected, records);
    }

    #[test]
    fn test_single_day_range() {
        let records = vec![
            record(ExpenseType::Grocery, 5, 50, PaymentMethod::Cash, "Vethik"),
            record(ExpenseType::Grocery, 6, 30, PaymentMethod::Cash, "Vethik"),
        ];
        let f = ExpenseFilter::defaults_for(&records).with_dates(Some(date(5)), Some(date(5)));

        let selected = filter(&records, &f);
        assert_eq!(selected.len(), 1);
        assert_eq!(total(&selected), Money::from_units(50));
    }

    #[test]
    fn test_absent_payment_method_selects_nothing() {
        let records = vec![record(ExpenseType::Food, 5, 50, PaymentMethod::Cash, "Vethik")];
        let f = ExpenseFilter::defaults_for(&records).with_methods(&[PaymentMethod::Phonepay]);

        let selected = filter(&records, &f);
        assert!(selected.is_empty());
        assert!(total(&selected).is_zero());
        assert!(aggregate_by_type(&selected).is_empty());
        assert!(aggregate_by_date(&selected).is_empty());
    }

    #[test]
    fn test_total_matches_predicates() {
        let records = sample();
        let f = ExpenseFilter::defaults_for(&records)
            .with_types(&[ExpenseType::Grocery, ExpenseType::Food])
            .with_people(&["Ishwarya".to_string()])
            .with_dates(Some(date(6)), Some(date(8)));

        let expected: Money = records
            .iter()
            .filter(|r| {
                matches!(r.expense_type, ExpenseType::Grocery | ExpenseType::Food)
                    && r.entered_by == "Ishwarya"
                    && DateRange::new(date(6), date(8)).contains(r.date)
            })
            .map(|r| r.amount)
            .sum();

        assert_eq!(total(&filter(&records, &f)), expected);
        assert_eq!(expected, Money::from_units(50));
    }

    #[test]
    fn test_aggregate_by_type() {
        let by_type = aggregate_by_type(&sample());
        assert_eq!(
            by_type,
            vec![
                TypeTotal {
                    expense_type: ExpenseType::Grocery,
                    amount: Money::from_units(70),
                    count: 2,
                },
                TypeTotal {
                    expense_type: ExpenseType::Travel,
                    amount: Money::from_units(100),
                    count: 1,
                },
                TypeTotal {
                    expense_type: ExpenseType::Food,
                    amount: Money::from_units(30),
                    count: 1,
                },
            ]
        );
    }

    #[test]
    fn test_aggregate_by_date() {
        let by_date = aggregate_by_date(&sample());
        let days: Vec<_> = by_date.iter().map(|d| (d.date, d.amount, d.count)).collect();
        assert_eq!(
            days,
            vec![
                (date(5), Money::from_units(50), 1),
                (date(6), Money::from_units(50), 2),
                (date(8), Money::from_units(100), 1),
            ]
        );
    }

    #[test]
    fn test_type_shares() {
        let shares = type_shares(&sample());
        let sum: f64 = shares.iter().map(|s| s.percentage).sum();
        assert!((sum - 100.0).abs() < 1e-9);
        assert!((shares[1].percentage - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_total_shares() {
        let records = vec![record(ExpenseType::Food, 5, 0, PaymentMethod::Cash, "Vethik")];
        let shares = type_shares(&records);
        assert_eq!(shares.len(), 1);
        assert_eq!(shares[0].percentage, 0.0);
    }

    #[test]
    fn test_empty_input() {
        assert!(total(&[]).is_zero());
        assert!(aggregate_by_type(&[]).is_empty());
        assert!(aggregate_by_date(&[]).is_empty());
        assert!(type_shares(&[]).is_empty());
    }

    #[test]
    fn test_large_amounts_clamp_instead_of_overflowing() {
        let huge = Money::parse("90000000000000000").unwrap();
        let mut records = sample();
        for r in records.iter_mut().take(2) {
            r.amount = huge;
        }

        let max = Money::from_cents(i64::MAX);
        assert_eq!(total(&records), max);
        assert_eq!(aggregate_by_type(&records)[0].amount, huge + Money::from_units(20));
        assert!(aggregate_by_date(&records).iter().all(|d| !d.amount.is_negative()));
        assert!(type_shares(&records).iter().all(|s| s.percentage >= 0.0));
    }
}
