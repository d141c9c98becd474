//! User settings for cyclebudget
//!
//! Holds display preferences, the credit cycle boundary day and the log filter.

use serde::{Deserialize, Serialize};

use super::paths::BudgetPaths;
use crate::error::BudgetError;

/// User settings for cyclebudget
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol used when formatting amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Thousands separator used when formatting amounts
    #[serde(default = "default_thousands_separator")]
    pub thousands_separator: char,

    /// Day of month on which a credit cycle starts (it ends the day before, next month)
    #[serde(default = "default_credit_cycle_start_day")]
    pub credit_cycle_start_day: u32,

    /// tracing filter directive used when RUST_LOG is not set
    #[serde(default = "default_log_filter")]
    pub log_filter: String,

    /// Whether the initial setup wizard has been completed
    #[serde(default)]
    pub setup_completed: bool,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_thousands_separator() -> char {
    '.'
}

fn default_credit_cycle_start_day() -> u32 {
    25
}

fn default_log_filter() -> String {
    "cyclebudget=warn".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            thousands_separator: default_thousands_separator(),
            credit_cycle_start_day: default_credit_cycle_start_day(),
            log_filter: default_log_filter(),
            setup_completed: false,
        }
    }
}

impl Settings {
    /// Load settings from disk, or return defaults if the file doesn't exist
    pub fn load_or_create(paths: &BudgetPaths) -> Result<Self, BudgetError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            // Not persisted until the caller decides to
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| BudgetError::Io(format!("Failed to read settings file: {}", e)))?;

        let settings: Settings = serde_json::from_str(&contents)
            .map_err(|e| BudgetError::Config(format!("Failed to parse settings file: {}", e)))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to disk
    pub fn save(&self, paths: &BudgetPaths) -> Result<(), BudgetError> {
        self.validate()?;
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| BudgetError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| BudgetError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// The start day must exist in every month and leave room for the day before it
    pub fn validate(&self) -> Result<(), BudgetError> {
        if !(2..=28).contains(&self.credit_cycle_start_day) {
            return Err(BudgetError::Config(format!(
                "credit_cycle_start_day must be between 2 and 28, got {}",
                self.credit_cycle_start_day
            )));
        }
        Ok(())
    }
}
