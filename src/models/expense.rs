//! Expense record model
//!
//! One row of the expense spreadsheet. Field names are renamed to the
//! spreadsheet's column headers so the CSV reader matches columns by name.

use chrono::{NaiveDate, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::money::Money;
use crate::error::ExpenseError;

/// Column headers of the backing spreadsheet, in write order
pub const COLUMNS: [&str; 7] = [
    "Type",
    "Date",
    "Time",
    "Details",
    "EnteredBy",
    "PaymentMethod",
    "Amount",
];

/// Category of an expense
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ExpenseType {
    Grocery,
    Cosmetics,
    Clothes,
    Travel,
    Food,
    Vegetables,
    Medicine,
    Others,
    #[serde(rename = "EB-bill")]
    EbBill,
}

impl ExpenseType {
    /// All types in form order
    pub const ALL: [ExpenseType; 9] = [
        Self::Grocery,
        Self::Cosmetics,
        Self::Clothes,
        Self::Travel,
        Self::Food,
        Self::Vegetables,
        Self::Medicine,
        Self::Others,
        Self::EbBill,
    ];

    /// Name as written in the spreadsheet
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Grocery => "Grocery",
            Self::Cosmetics => "Cosmetics",
            Self::Clothes => "Clothes",
            Self::Travel => "Travel",
            Self::Food => "Food",
            Self::Vegetables => "Vegetables",
            Self::Medicine => "Medicine",
            Self::Others => "Others",
            Self::EbBill => "EB-bill",
        }
    }
}

impl fmt::Display for ExpenseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExpenseType {
    type Err = ExpenseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                ExpenseError::invalid_field(
                    "type",
                    wanted,
                    &format!("Expected one of: {}", join_names(Self::ALL.iter())),
                )
            })
    }
}

/// How an expense was paid
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Cash,
    Phonepay,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 2] = [Self::Cash, Self::Phonepay];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cash => "cash",
            Self::Phonepay => "phonepay",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = ExpenseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                ExpenseError::invalid_field(
                    "payment method",
                    wanted,
                    &format!("Expected one of: {}", join_names(Self::ALL.iter())),
                )
            })
    }
}

fn join_names<T: fmt::Display>(items: impl Iterator<Item = T>) -> String {
    items.map(|i| i.to_string()).collect::<Vec<_>>().join(", ")
}

/// A single logged expense
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    #[serde(rename = "Type")]
    pub expense_type: ExpenseType,

    #[serde(rename = "Date", with = "date_cell")]
    pub date: NaiveDate,

    /// Hour and minute; seconds are always zero
    #[serde(rename = "Time", with = "time_cell")]
    pub time: NaiveTime,

    /// Free text; a missing column reads as empty
    #[serde(rename = "Details", default)]
    pub details: String,

    #[serde(rename = "EnteredBy")]
    pub entered_by: String,

    #[serde(rename = "PaymentMethod")]
    pub payment_method: PaymentMethod,

    #[serde(rename = "Amount")]
    pub amount: Money,
}

impl Expense {
    /// Create a new expense record
    pub fn new(
        expense_type: ExpenseType,
        date: NaiveDate,
        time: NaiveTime,
        details: impl Into<String>,
        entered_by: impl Into<String>,
        payment_method: PaymentMethod,
        amount: Money,
    ) -> Self {
        Self {
            expense_type,
            date,
            time: NaiveTime::from_hms_opt(time.hour(), time.minute(), 0).unwrap_or(time),
            details: details.into(),
            entered_by: entered_by.into(),
            payment_method,
            amount,
        }
    }

    /// Time formatted as `HH:MM`
    pub fn time_label(&self) -> String {
        self.time.format(time_cell::FORMAT).to_string()
    }
}

/// `YYYY-MM-DD`, tolerating a trailing midnight timestamp on read
mod date_cell {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%Y-%m-%d";

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&date.format(FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        let day = raw.trim().split([' ', 'T']).next().unwrap_or_default();
        NaiveDate::parse_from_str(day, FORMAT)
            .map_err(|e| serde::de::Error::custom(format!("bad date '{}': {}", raw, e)))
    }
}

/// `HH:MM`, tolerating `HH:MM:SS` on read
mod time_cell {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%H:%M";

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&time.format(FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        let trimmed = raw.trim();
        NaiveTime::parse_from_str(trimmed, "%H:%M:%S")
            .or_else(|_| NaiveTime::parse_from_str(trimmed, FORMAT))
            .map_err(|e| serde::de::Error::custom(format!("bad time '{}': {}", raw, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn milk() -> Expense {
        Expense::new(
            ExpenseType::Grocery,
            NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
            NaiveTime::from_hms_opt(10, 30, 0).unwrap(),
            "milk",
            "Vethik",
            PaymentMethod::Cash,
            Money::from_units(50),
        )
    }

    #[test]
    fn test_type_names() {
        assert_eq!(ExpenseType::EbBill.to_string(), "EB-bill");
        assert_eq!("eb-bill".parse::<ExpenseType>().unwrap(), ExpenseType::EbBill);
        assert_eq!("Grocery".parse::<ExpenseType>().unwrap(), ExpenseType::Grocery);
        assert!("Snacks".parse::<ExpenseType>().unwrap_err().is_validation());
    }

    #[test]
    fn test_payment_method_names() {
        assert_eq!(PaymentMethod::Phonepay.to_string(), "phonepay");
        assert_eq!("CASH".parse::<PaymentMethod>().unwrap(), PaymentMethod::Cash);
        assert!("card".parse::<PaymentMethod>().is_err());
    }

    #[test]
    fn test_new_drops_seconds() {
        let expense = Expense::new(
            ExpenseType::Food,
            NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
            NaiveTime::from_hms_opt(8, 5, 42).unwrap(),
            "",
            "Ishwarya",
            PaymentMethod::Phonepay,
            Money::zero(),
        );
        assert_eq!(expense.time_label(), "08:05");
        assert_eq!(expense.time.second(), 0);
    }

    #[test]
    fn test_csv_row_layout() {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.serialize(milk()).unwrap();
        let text = String::from_utf8(writer.into_inner().unwrap()).unwrap();
        assert_eq!(
            text,
            "Type,Date,Time,Details,EnteredBy,PaymentMethod,Amount\n\
             Grocery,2024-01-05,10:30,milk,Vethik,cash,50.00\n"
        );
    }

    #[test]
    fn test_reads_spreadsheet_style_cells() {
        let data = "Type,Date,Time,Details,EnteredBy,PaymentMethod,Amount\n\
                    EB-bill,2024-01-05 00:00:00,10:30:00,,Vethik,phonepay,50\n";
        let mut reader = csv::Reader::from_reader(data.as_bytes());
        let row: Expense = reader.deserialize().next().unwrap().unwrap();

        assert_eq!(row.expense_type, ExpenseType::EbBill);
        assert_eq!(row.date, NaiveDate::from_ymd_opt(2024, 1, 5).unwrap());
        assert_eq!(row.time_label(), "10:30");
        assert_eq!(row.details, "");
        assert_eq!(row.amount, Money::from_units(50));
    }

    #[test]
    fn test_columns_matched_by_name() {
        let data = "Amount,Type,Details,Date,Time,PaymentMethod,EnteredBy\n\
                    50.00,Grocery,milk,2024-01-05,10:30,cash,Vethik\n";
        let mut reader = csv::Reader::from_reader(data.as_bytes());
        let row: Expense = reader.deserialize().next().unwrap().unwrap();
        assert_eq!(row, milk());
    }
}
