//! Average True Range (ATR).
//!
//! Simple rolling mean of True Range over `period` bars. TR[0] is the first
//! bar's high-low, so the first ATR value lands at index period-1.

use crate::domain::Bar;
use crate::indicators::indicator::Indicator;
use crate::indicators::rolling::average_true_range;
use crate::indicators::IndicatorSeries;

#[derive(Debug, Clone)]
pub struct Atr {
    period: usize,
    name: String,
}

impl Atr {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "ATR period must be >= 1");
        Self {
            period,
            name: format!("atr_{period}"),
        }
    }
}

impl Indicator for Atr {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period - 1
    }

    fn compute(&self, bars: &[Bar]) -> IndicatorSeries {
        average_true_range(bars, self.period)
    }
}
