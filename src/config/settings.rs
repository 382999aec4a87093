//! User settings for SiteBid
//!
//! Defaults for new projects, display preferences and risk thresholds.

use std::fmt::Write;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::paths::SiteBidPaths;
use crate::engine::RiskThresholds;
use crate::error::SiteBidError;
use crate::models::project::DEFAULT_PROFIT_PERCENT;
use crate::models::{Money, RoundingPolicy};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol used in terminal output
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Profit percentage given to newly created projects
    #[serde(default = "default_profit_percent")]
    pub default_profit_percent: f64,

    /// Rounding policy given to newly created projects
    #[serde(default)]
    pub default_rounding_policy: RoundingPolicy,

    #[serde(default)]
    pub risk: RiskThresholds,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "₩".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

fn default_profit_percent() -> f64 {
    DEFAULT_PROFIT_PERCENT
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            default_profit_percent: default_profit_percent(),
            default_rounding_policy: RoundingPolicy::default(),
            risk: RiskThresholds::default(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or return defaults if the file doesn't exist
    pub fn load_or_create(paths: &SiteBidPaths) -> Result<Self, SiteBidError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            // Don't save yet - let caller decide when to persist
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| SiteBidError::Io(format!("Failed to read settings file: {}", e)))?;

        serde_json::from_str(&contents)
            .map_err(|e| SiteBidError::Config(format!("Failed to parse settings file: {}", e)))
    }

    pub fn save(&self, paths: &SiteBidPaths) -> Result<(), SiteBidError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| SiteBidError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| SiteBidError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// Format an amount with the configured currency symbol
    pub fn money(&self, amount: Money) -> String {
        amount.format_with_symbol(&self.currency_symbol)
    }

    /// Format a date with the configured format.
    ///
    /// A format chrono cannot render for a plain date (bad specifier, time
    /// fields) falls back to `%Y-%m-%d`.
    pub fn date(&self, date: NaiveDate) -> String {
        let mut out = String::new();
        if write!(out, "{}", date.format(&self.date_format)).is_err() {
            return date.format("%Y-%m-%d").to_string();
        }
        out
    }
}
