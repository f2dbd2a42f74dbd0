//! Bar and BarSeries: the immutable market data input.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// OHLCV bar for a single symbol over one interval.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

/// Why a bar (or a series of bars) was rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BarError {
    #[error("non-finite price on {date}")]
    NonFinite { date: NaiveDate },

    #[error("high {high} below low {low} on {date}")]
    InvertedRange { date: NaiveDate, high: f64, low: f64 },

    #[error("open/close outside [low, high] on {date}")]
    OutsideRange { date: NaiveDate },

    #[error("bar dated {date} does not follow {previous}")]
    OutOfOrder { date: NaiveDate, previous: NaiveDate },
}

impl Bar {
    /// Check the OHLC ordering invariant: `low <= min(open, close) <= max(open, close) <= high`.
    pub fn validate(&self) -> Result<(), BarError> {
        let prices = [self.open, self.high, self.low, self.close];
        if prices.iter().any(|p| !p.is_finite()) {
            return Err(BarError::NonFinite { date: self.date });
        }
        if self.high < self.low {
            return Err(BarError::InvertedRange {
                date: self.date,
                high: self.high,
                low: self.low,
            });
        }
        let body_low = self.open.min(self.close);
        let body_high = self.open.max(self.close);
        if body_low < self.low || body_high > self.high {
            return Err(BarError::OutsideRange { date: self.date });
        }
        Ok(())
    }

    /// Midpoint of the bar's range, `(high + low) / 2`.
    pub fn hl2(&self) -> f64 {
        (self.high + self.low) / 2.0
    }

    pub fn range(&self) -> f64 {
        self.high - self.low
    }
}

/// Ordered bars for one symbol, strictly increasing by date.
///
/// Construction validates every bar, so downstream calculators can assume
/// finite prices and a sane OHLC ordering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarSeries {
    symbol: String,
    bars: Vec<Bar>,
}

impl BarSeries {
    pub fn new(symbol: impl Into<String>, bars: Vec<Bar>) -> Result<Self, BarError> {
        for bar in &bars {
            bar.validate()?;
        }
        for pair in bars.windows(2) {
            if pair[1].date <= pair[0].date {
                return Err(BarError::OutOfOrder {
                    date: pair[1].date,
                    previous: pair[0].date,
                });
            }
        }
        Ok(Self {
            symbol: symbol.into(),
            bars,
        })
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn last(&self) -> Option<&Bar> {
        self.bars.last()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    /// Index of the bar dated exactly `date`, if present.
    pub fn position_of(&self, date: NaiveDate) -> Option<usize> {
        self.bars.binary_search_by(|b| b.date.cmp(&date)).ok()
    }

    /// A copy holding only the first `len` bars.
    pub fn truncated(&self, len: usize) -> Self {
        Self {
            symbol: self.symbol.clone(),
            bars: self.bars[..len.min(self.bars.len())].to_vec(),
        }
    }
}
