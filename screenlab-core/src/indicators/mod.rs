//! Concrete indicator implementations.
//!
//! Every calculator takes a bar slice and returns series aligned by index
//! with the input. Values before a calculator's warmup window are `None`.
//!
//! Multi-series indicators (Bollinger, MACD, pivot range) expose a function
//! returning all lines at once, plus single-band `Indicator` instances where
//! a named series is useful.

pub mod atr;
pub mod bollinger;
pub mod indicator;
pub mod macd;
pub mod pivot_range;
pub mod rolling;
pub mod rsi;
pub mod sma;
pub mod supertrend;

pub use atr::Atr;
pub use bollinger::{bollinger_bands, Bollinger, BollingerBand};
pub use indicator::{Indicator, IndicatorValues};
pub use macd::{macd_lines, Macd, MacdLine, MacdSeries};
pub use pivot_range::{pivot_range, RangeFormula, ReferenceBar};
pub use rsi::{Rsi, RsiSmoothing};
pub use sma::Sma;
pub use supertrend::{Direction, Supertrend, SupertrendSeries, SupertrendState};

/// One value per input bar; `None` marks "not yet available".
pub type IndicatorSeries = Vec<Option<f64>>;

/// Upper, middle and lower lines aligned with a bar series.
#[derive(Debug, Clone, PartialEq)]
pub struct BandSeries {
    pub upper: IndicatorSeries,
    pub middle: IndicatorSeries,
    pub lower: IndicatorSeries,
}

impl BandSeries {
    pub fn unavailable(len: usize) -> Self {
        Self {
            upper: vec![None; len],
            middle: vec![None; len],
            lower: vec![None; len],
        }
    }
}

/// Create synthetic bars from close prices for testing.
///
/// Generates plausible OHLV: open = prev_close (or close for first bar),
/// high = max(open,close) + 1.0, low = min(open,close) - 1.0, volume = 1000.
#[cfg(test)]
pub fn make_bars(closes: &[f64]) -> Vec<crate::domain::Bar> {
    let data: Vec<(f64, f64, f64, f64)> = closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = if i == 0 { close } else { closes[i - 1] };
            (open, open.max(close) + 1.0, open.min(close) - 1.0, close)
        })
        .collect();
    make_ohlc_bars(&data)
}

/// Create bars from (open, high, low, close) tuples on consecutive days.
#[cfg(test)]
pub fn make_ohlc_bars(data: &[(f64, f64, f64, f64)]) -> Vec<crate::domain::Bar> {
    use crate::domain::Bar;
    let base_date = chrono::NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    data.iter()
        .enumerate()
        .map(|(i, &(open, high, low, close))| Bar {
            date: base_date + chrono::Duration::days(i as i64),
            open,
            high,
            low,
            close,
            volume: 1000,
        })
        .collect()
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;
