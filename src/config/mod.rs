//! Configuration module for the expense tracker
//!
//! This module provides configuration management including:
//! - Base directory and data file resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::TrackerPaths;
pub use settings::Settings;
