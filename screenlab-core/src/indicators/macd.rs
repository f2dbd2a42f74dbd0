//! Moving Average Convergence/Divergence (MACD).
//!
//! macd = ema(close, fast) - ema(close, slow)
//! signal = ema(macd, signal)
//! histogram = macd - signal
//!
//! The EMAs are seeded with the first value, so every line is defined from
//! bar 0. Early values are dominated by the seed; `lookback()` reports the
//! slow span so callers can require a settled series.

use crate::domain::Bar;
use crate::indicators::indicator::Indicator;
use crate::indicators::rolling::ema;
use crate::indicators::IndicatorSeries;

/// Which MACD line an `Indicator` instance exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MacdLine {
    Macd,
    Signal,
    Histogram,
}

/// All three MACD lines.
#[derive(Debug, Clone, PartialEq)]
pub struct MacdSeries {
    pub macd: Vec<f64>,
    pub signal: Vec<f64>,
    pub histogram: Vec<f64>,
}

pub fn macd_lines(bars: &[Bar], fast: usize, slow: usize, signal: usize) -> MacdSeries {
    let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
    let fast_ema = ema(&closes, fast);
    let slow_ema = ema(&closes, slow);
    let macd: Vec<f64> = fast_ema.iter().zip(&slow_ema).map(|(f, s)| f - s).collect();
    let signal_line = ema(&macd, signal);
    let histogram = macd.iter().zip(&signal_line).map(|(m, s)| m - s).collect();
    MacdSeries {
        macd,
        signal: signal_line,
        histogram,
    }
}

#[derive(Debug, Clone)]
pub struct Macd {
    fast: usize,
    slow: usize,
    signal: usize,
    line: MacdLine,
    name: String,
}

impl Macd {
    pub fn new(fast: usize, slow: usize, signal: usize, line: MacdLine) -> Self {
        assert!(fast >= 1 && slow >= 1 && signal >= 1, "MACD spans must be >= 1");
        let label = match line {
            MacdLine::Macd => "line",
            MacdLine::Signal => "signal",
            MacdLine::Histogram => "hist",
        };
        Self {
            fast,
            slow,
            signal,
            line,
            name: format!("macd_{label}_{fast}_{slow}_{signal}"),
        }
    }

    pub fn histogram(fast: usize, slow: usize, signal: usize) -> Self {
        Self::new(fast, slow, signal, MacdLine::Histogram)
    }
}

impl Indicator for Macd {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.slow.saturating_sub(1)
    }

    fn compute(&self, bars: &[Bar]) -> IndicatorSeries {
        let lines = macd_lines(bars, self.fast, self.slow, self.signal);
        let values = match self.line {
            MacdLine::Macd => lines.macd,
            MacdLine::Signal => lines.signal,
            MacdLine::Histogram => lines.histogram,
        };
        values
            .into_iter()
            .enumerate()
            .map(|(i, v)| (i >= self.lookback()).then_some(v))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, make_bars, DEFAULT_EPSILON};

    #[test]
    fn macd_constant_price_is_flat_zero() {
        let bars = make_bars(&[50.0; 40]);
        let lines = macd_lines(&bars, 12, 26, 9);
        for i in 0..40 {
            assert_approx(lines.macd[i], 0.0, DEFAULT_EPSILON);
            assert_approx(lines.histogram[i], 0.0, DEFAULT_EPSILON);
        }
    }

    #[test]
    fn macd_positive_in_uptrend() {
        let closes: Vec<f64> = (0..60).map(|i| 100.0 + i as f64).collect();
        let bars = make_bars(&closes);
        let lines = macd_lines(&bars, 12, 26, 9);
        // Fast EMA tracks a rising price more closely than the slow one
        assert!(lines.macd[59] > 0.0);
        assert!(lines.signal[59] > 0.0);
    }

    #[test]
    fn macd_histogram_identity() {
        let bars = make_bars(&[10.0, 11.0, 9.0, 12.0, 13.0, 11.0]);
        let lines = macd_lines(&bars, 2, 4, 3);
        for i in 0..bars.len() {
            assert_approx(
                lines.histogram[i],
                lines.macd[i] - lines.signal[i],
                DEFAULT_EPSILON,
            );
        }
    }

    #[test]
    fn macd_indicator_masks_unsettled_prefix() {
        let bars = make_bars(&[10.0, 11.0, 9.0, 12.0, 13.0, 11.0]);
        let hist = Macd::histogram(2, 4, 3).compute(&bars);
        assert!(hist[..3].iter().all(Option::is_none));
        assert!(hist[3..].iter().all(Option::is_some));
    }
}
