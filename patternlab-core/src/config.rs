//! Run configuration: which ticker, which dates, which reference pattern.
//!
//! Every field has a default, so an empty TOML document (or no file at all)
//! reproduces the stock check: CVNA from 2019-01-01 against `6-4-D`.

use crate::pattern::Pattern;
use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_TICKER: &str = "CVNA";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Errors from loading or validating a config.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Configuration for one pattern check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PatternConfig {
    /// Ticker symbol to fetch.
    pub ticker: String,
    /// First day of daily history to request.
    pub start_date: NaiveDate,
    /// Last day of daily history; `None` means today.
    pub end_date: Option<NaiveDate>,
    /// Reference pattern to compare against.
    pub expected_pattern: Pattern,
    /// Weekday closing each resampled week.
    pub week_anchor: Weekday,
    /// Use dividend/split adjusted prices.
    pub adjust_prices: bool,
    /// HTTP request timeout.
    pub timeout_secs: u64,
    /// Read daily bars from this CSV instead of the network.
    pub csv_path: Option<PathBuf>,
}

impl Default for PatternConfig {
    fn default() -> Self {
        Self {
            ticker: DEFAULT_TICKER.to_string(),
            start_date: default_start_date(),
            end_date: None,
            expected_pattern: Pattern::DEFAULT_REFERENCE,
            week_anchor: Weekday::Fri,
            adjust_prices: true,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            csv_path: None,
        }
    }
}

fn default_start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2019, 1, 1).unwrap_or(NaiveDate::MIN)
}

impl PatternConfig {
    /// Parse a config from a TOML string and validate it.
    pub fn from_toml(s: &str) -> Result<Self, ConfigError> {
        let config: PatternConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config from a TOML file and validate it.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ticker.trim().is_empty() {
            return Err(ConfigError::Invalid("ticker must not be empty".into()));
        }
        if let Some(end) = self.end_date {
            if end < self.start_date {
                return Err(ConfigError::Invalid(format!(
                    "end_date {end} is before start_date {}",
                    self.start_date
                )));
            }
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::Invalid("timeout_secs must be positive".into()));
        }
        Ok(())
    }
}
