//! ScreenLab Core: indicators and signal detection over daily bar series.
//!
//! This crate contains everything that runs per symbol:
//! - Domain types (bars, validated bar series)
//! - Rolling statistics and indicator calculators (Bollinger, RSI, MACD, ATR, pivot range)
//! - Supertrend as an explicit state fold
//! - Level providers and the touch-and-reversal detector
//! - Screening strategies that classify one bar
//! - Data provider trait, CSV and synthetic providers, symbol universes

pub mod data;
pub mod detector;
pub mod domain;
pub mod indicators;
pub mod levels;
pub mod signal;
pub mod strategy;

pub use detector::MiddleRule;
pub use domain::{Bar, BarError, BarSeries};
pub use levels::{LevelSet, LevelSource};
pub use signal::{Signal, SignalKind};
pub use strategy::{Evaluation, Strategy, TrendParams};

/// A rejected indicator or strategy parameter.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid parameter: {0}")]
pub struct ParamError(pub String);

impl ParamError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }
}
