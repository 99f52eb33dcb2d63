//! Terminal User Interface module
//!
//! A two-page TUI built on ratatui: an entry form for recording expenses
//! and an analysis page with filters, totals and charts.

pub mod app;
pub mod event;
pub mod handler;
pub mod layout;
pub mod terminal;
pub mod views;
pub mod widgets;

pub use app::App;
pub use terminal::run_tui;
