//! User settings for the expense tracker
//!
//! Currency symbol, date display format, and the people who may enter
//! expenses. Stored as JSON next to the data file.

use serde::{Deserialize, Serialize};

use super::paths::TrackerPaths;
use crate::error::ExpenseError;

/// User settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol shown before amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format for display (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// People offered in the "Entered By" field, first is the default
    #[serde(default = "default_people")]
    pub people: Vec<String>,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "₹".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

fn default_people() -> Vec<String> {
    vec!["Vethik".to_string(), "Ishwarya".to_string()]
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            people: default_people(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or fall back to defaults if the file doesn't exist
    pub fn load_or_create(paths: &TrackerPaths) -> Result<Self, ExpenseError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            // Don't save yet - let caller decide when to persist
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| ExpenseError::Io(format!("Failed to read settings file: {}", e)))?;

        let mut settings: Settings = serde_json::from_str(&contents)
            .map_err(|e| ExpenseError::Config(format!("Failed to parse settings file: {}", e)))?;

        settings.people.retain(|p| !p.trim().is_empty());
        if settings.people.is_empty() {
            settings.people = default_people();
        }

        Ok(settings)
    }

    /// Save settings to disk
    pub fn save(&self, paths: &TrackerPaths) -> Result<(), ExpenseError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| ExpenseError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| ExpenseError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// Format an amount with the configured currency symbol
    pub fn format_money(&self, amount: crate::models::Money) -> String {
        amount.format_with_symbol(&self.currency_symbol)
    }

    /// Parse an amount typed with or without the configured currency symbol
    pub fn parse_money(
        &self,
        input: &str,
    ) -> Result<crate::models::Money, crate::models::MoneyParseError> {
        crate::models::Money::parse_with_symbol(input, &self.currency_symbol)
    }

    /// Resolve a person name against the configured list (case-insensitive)
    pub fn find_person(&self, name: &str) -> Result<&str, ExpenseError> {
        let wanted = name.trim();
        self.people
            .iter()
            .find(|p| p.eq_ignore_ascii_case(wanted))
            .map(String::as_str)
            .ok_or_else(|| {
                ExpenseError::invalid_field(
                    "entered-by",
                    wanted,
                    &format!("Expected one of: {}", self.people.join(", ")),
                )
            })
    }

    /// The person pre-selected in the entry form
    pub fn default_person(&self) -> &str {
        self.people.first().map(String::as_str).unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.currency_symbol, "₹");
        assert_eq!(settings.people, vec!["Vethik", "Ishwarya"]);
        assert_eq!(settings.default_person(), "Vethik");
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = TrackerPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.currency_symbol = "$".into();
        settings.people = vec!["Sam".into()];
        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let paths = TrackerPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), r#"{"people": []}"#).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.currency_symbol, "₹");
        assert_eq!(loaded.people, vec!["Vethik", "Ishwarya"]);
    }

    #[test]
    fn test_find_person() {
        let settings = Settings::default();
        assert_eq!(settings.find_person("vethik").unwrap(), "Vethik");
        assert!(settings.find_person("Mallory").unwrap_err().is_validation());
    }

    #[test]
    fn test_format_money() {
        let settings = Settings::default();
        assert_eq!(settings.format_money(Money::from_units(1500)), "₹1,500.00");
    }

    #[test]
    fn test_parse_money_with_configured_symbol() {
        let mut settings = Settings::default();
        settings.currency_symbol = "Rs.".into();
        assert_eq!(settings.parse_money("Rs. 49.50").unwrap(), Money::from_cents(4950));
        assert_eq!(settings.parse_money("₹10").unwrap(), Money::from_units(10));
        assert!(settings.parse_money("x5").is_err());
    }
}
