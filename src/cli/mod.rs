//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod analysis;
pub mod entry;

pub use analysis::{handle_analyze_command, handle_list_command, AnalyzeArgs};
pub use entry::{handle_add_command, AddArgs};
