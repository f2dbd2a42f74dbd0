//! Data provider trait and structured error types.
//!
//! The DataProvider trait abstracts over bar sources (CSV directory,
//! synthetic walk, or anything a caller plugs in) so the screener can run
//! against real files or a mock in tests.

use chrono::NaiveDate;
use thiserror::Error;

use crate::domain::{BarError, BarSeries};

/// Structured error types for data operations.
///
/// These are designed to be displayable in both CLI output and the
/// failure list of a screening result.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("symbol not found: {symbol}")]
    SymbolNotFound { symbol: String },

    #[error("I/O error reading {path}: {reason}")]
    Io { path: String, reason: String },

    #[error("parse error in {path}: {reason}")]
    Parse { path: String, reason: String },

    #[error("invalid bar: {0}")]
    InvalidBar(#[from] BarError),

    #[error("data error: {0}")]
    Other(String),
}

/// Trait for bar sources.
///
/// Implementations must be shareable across screener worker threads.
pub trait DataProvider: Send + Sync {
    /// Human-readable name of this provider.
    fn name(&self) -> &str;

    /// Fetch bars for a symbol over an inclusive date range.
    fn fetch(&self, symbol: &str, start: NaiveDate, end: NaiveDate)
        -> Result<BarSeries, DataError>;
}
