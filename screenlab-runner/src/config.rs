//! Serializable screening configuration.
//!
//! All indicator parameters live here and are validated once, when a
//! `Screener` is built. Nothing is read from the environment.
//!
//! ```toml
//! evaluation_date = "2024-05-31"
//! history_days = 400
//! parallelism = 4
//!
//! [strategy]
//! type = "touch_reversal"
//! middle_rule = "straddle"
//!
//! [strategy.levels]
//! type = "bollinger"
//! period = 20
//! multiplier = 2.0
//! ```

use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use screenlab_core::{ParamError, Strategy};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config {path}: {reason}")]
    Io { path: String, reason: String },

    #[error("parse config: {0}")]
    Parse(String),

    #[error(transparent)]
    Param(#[from] ParamError),

    #[error("invalid config: {0}")]
    Invalid(String),

    #[error("serialize config: {0}")]
    Serialize(String),

    #[error("build thread pool: {0}")]
    ThreadPool(String),
}

/// Upper bound on `history_days`, roughly a century of calendar days.
pub const MAX_HISTORY_DAYS: u32 = 36_600;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenConfig {
    /// Bar to evaluate. `None` evaluates each symbol's latest bar.
    pub evaluation_date: Option<NaiveDate>,
    /// Calendar days of history requested before the evaluation date.
    pub history_days: u32,
    /// Worker threads. 1 runs symbols sequentially on the calling thread.
    pub parallelism: usize,
    pub strategy: Strategy,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            evaluation_date: None,
            history_days: 365,
            parallelism: 1,
            strategy: Strategy::default(),
        }
    }
}

impl ScreenConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.history_days == 0 || self.history_days > MAX_HISTORY_DAYS {
            return Err(ConfigError::Invalid(format!(
                "history_days must be in 1..={MAX_HISTORY_DAYS}"
            )));
        }
        if self.parallelism == 0 {
            return Err(ConfigError::Invalid("parallelism must be >= 1".into()));
        }
        self.strategy.validate()?;
        Ok(())
    }

    /// Inclusive fetch range ending at the evaluation date, or at `as_of`
    /// when no evaluation date is set.
    pub fn fetch_range(&self, as_of: NaiveDate) -> Result<(NaiveDate, NaiveDate), ConfigError> {
        let end = self.evaluation_date.unwrap_or(as_of);
        let start = end
            .checked_sub_signed(chrono::Duration::days(i64::from(self.history_days)))
            .ok_or_else(|| {
                ConfigError::Invalid(format!(
                    "{} history days before {end} is out of the date range",
                    self.history_days
                ))
            })?;
        Ok((start, end))
    }

    /// Deterministic content hash of this configuration.
    ///
    /// Two runs with identical configs share the same id.
    pub fn config_id(&self) -> Result<String, ConfigError> {
        let json =
            serde_json::to_string(self).map_err(|e| ConfigError::Serialize(e.to_string()))?;
        Ok(blake3::hash(json.as_bytes()).to_hex().to_string())
    }
}
