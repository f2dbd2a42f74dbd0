//! Relative Strength Index (RSI).
//!
//! RSI = 100 - 100 / (1 + avg_gain / avg_loss) over the last `period` close changes.
//! Lookback: period (the first change needs two bars).
//!
//! Two averaging modes:
//! - `Simple`: plain rolling mean of gains and losses (the default).
//! - `Wilder`: seeded with the simple mean, then alpha = 1/period smoothing.
//!
//! Edge case: avg_loss == 0 → RSI = 100, including a completely flat window.

use serde::{Deserialize, Serialize};

use crate::domain::Bar;
use crate::indicators::indicator::Indicator;
use crate::indicators::rolling::rolling_mean;
use crate::indicators::IndicatorSeries;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RsiSmoothing {
    #[default]
    Simple,
    Wilder,
}

#[derive(Debug, Clone)]
pub struct Rsi {
    period: usize,
    smoothing: RsiSmoothing,
    name: String,
}

impl Rsi {
    pub fn new(period: usize) -> Self {
        Self::with_smoothing(period, RsiSmoothing::Simple)
    }

    pub fn with_smoothing(period: usize, smoothing: RsiSmoothing) -> Self {
        assert!(period >= 1, "RSI period must be >= 1");
        let suffix = match smoothing {
            RsiSmoothing::Simple => "",
            RsiSmoothing::Wilder => "_wilder",
        };
        Self {
            period,
            smoothing,
            name: format!("rsi_{period}{suffix}"),
        }
    }
}

impl Indicator for Rsi {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period
    }

    fn compute(&self, bars: &[Bar]) -> IndicatorSeries {
        let n = bars.len();
        let mut result = vec![None; n];

        if n < self.period + 1 {
            return result;
        }

        // changes[k] is close[k+1] - close[k]
        let changes: Vec<f64> = bars.windows(2).map(|w| w[1].close - w[0].close).collect();
        let gains: Vec<f64> = changes.iter().map(|c| c.max(0.0)).collect();
        let losses: Vec<f64> = changes.iter().map(|c| (-c).max(0.0)).collect();

        match self.smoothing {
            RsiSmoothing::Simple => {
                let avg_gain = rolling_mean(&gains, self.period);
                let avg_loss = rolling_mean(&losses, self.period);
                for k in (self.period - 1)..changes.len() {
                    if let (Some(g), Some(l)) = (avg_gain[k], avg_loss[k]) {
                        result[k + 1] = Some(compute_rsi(g, l));
                    }
                }
            }
            RsiSmoothing::Wilder => {
                let p = self.period as f64;
                let mut avg_gain = gains[..self.period].iter().sum::<f64>() / p;
                let mut avg_loss = losses[..self.period].iter().sum::<f64>() / p;
                result[self.period] = Some(compute_rsi(avg_gain, avg_loss));

                let alpha = 1.0 / p;
                for k in self.period..changes.len() {
                    avg_gain = alpha * gains[k] + (1.0 - alpha) * avg_gain;
                    avg_loss = alpha * losses[k] + (1.0 - alpha) * avg_loss;
                    result[k + 1] = Some(compute_rsi(avg_gain, avg_loss));
                }
            }
        }

        result
    }
}

fn compute_rsi(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        100.0
    } else {
        100.0 - 100.0 / (1.0 + avg_gain / avg_loss)
    }
}
