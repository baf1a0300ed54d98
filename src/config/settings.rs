//! User settings for dues-cli
//!
//! Reminder window, currency and date display, and the reminder message
//! template. Every field has a default so older config files keep loading.

use serde::{Deserialize, Serialize};

use super::paths::DuesPaths;
use crate::engine::DEFAULT_REMINDER_WINDOW_DAYS;
use crate::error::DuesError;
use crate::models::Money;

/// User settings for dues-cli
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Days before a due date at which a member counts as "due soon"
    #[serde(default = "default_reminder_window")]
    pub reminder_window_days: u32,

    /// Currency symbol used when displaying amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Reminder message template; supports {name}, {amount}, {due_date}, {status}
    #[serde(default = "default_reminder_template")]
    pub reminder_template: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_reminder_window() -> u32 {
    DEFAULT_REMINDER_WINDOW_DAYS
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

fn default_reminder_template() -> String {
    "Hi {name}, your membership dues of {amount} are {status} (due {due_date}).".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            reminder_window_days: default_reminder_window(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            reminder_template: default_reminder_template(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or return defaults if the file doesn't exist
    pub fn load_or_create(paths: &DuesPaths) -> Result<Self, DuesError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            // Don't save yet - let caller decide when to persist
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| DuesError::Io(format!("Failed to read settings file: {}", e)))?;

        serde_json::from_str(&contents)
            .map_err(|e| DuesError::Config(format!("Failed to parse settings file: {}", e)))
    }

    /// Save settings to disk
    pub fn save(&self, paths: &DuesPaths) -> Result<(), DuesError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| DuesError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| DuesError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// Format an amount with the configured currency symbol
    pub fn format_money(&self, amount: Money) -> String {
        amount.format_with_symbol(&self.currency_symbol)
    }

    /// Format a date with the configured date format
    ///
    /// An invalid format string falls back to ISO dates.
    pub fn format_date(&self, date: chrono::NaiveDate) -> String {
        use std::fmt::Write;

        let mut out = String::new();
        if write!(out, "{}", date.format(&self.date_format)).is_err() {
            return date.format("%Y-%m-%d").to_string();
        }
        out
    }
}
