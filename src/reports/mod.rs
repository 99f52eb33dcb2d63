//! Reports module for the expense tracker
//!
//! Filtering and aggregation over stored records, and the analysis report
//! built from them.

pub mod analysis;
pub mod filter;
pub mod query;

pub use analysis::Analysis;
pub use filter::{DateRange, ExpenseFilter, FilterOptions};
pub use query::{
    aggregate_by_date, aggregate_by_type, total, type_shares, DateTotal, TypeShare, TypeTotal,
};
