//! Bollinger Bands: moving average +/- standard deviation multiplier.
//!
//! - Middle: SMA(close, period)
//! - Upper: middle + mult * stddev(close, period)
//! - Lower: middle - mult * stddev(close, period)
//!
//! Stddev divides by N. Lookback: period - 1.
//!
//! `bollinger_bands` computes all three in one pass; the `Bollinger` indicator
//! exposes a single band so it fits the one-series `Indicator` trait.

use crate::domain::Bar;
use crate::indicators::indicator::Indicator;
use crate::indicators::rolling::rolling_std;
use crate::indicators::sma::Sma;
use crate::indicators::{BandSeries, IndicatorSeries};

/// Which band of the Bollinger Bands to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BollingerBand {
    Upper,
    Middle,
    Lower,
}

/// All three Bollinger bands for a bar series.
pub fn bollinger_bands(bars: &[Bar], period: usize, multiplier: f64) -> BandSeries {
    let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
    let middle = Sma::new(period).compute(bars);
    let std = rolling_std(&closes, period);

    let (upper, lower): (IndicatorSeries, IndicatorSeries) = middle
        .iter()
        .zip(&std)
        .map(|(m, s)| match (m, s) {
            (Some(m), Some(s)) => (Some(m + multiplier * s), Some(m - multiplier * s)),
            _ => (None, None),
        })
        .unzip();

    BandSeries {
        upper,
        middle,
        lower,
    }
}

#[derive(Debug, Clone)]
pub struct Bollinger {
    period: usize,
    multiplier: f64,
    band: BollingerBand,
    name: String,
}

impl Bollinger {
    pub fn new(period: usize, multiplier: f64, band: BollingerBand) -> Self {
        assert!(period >= 1, "Bollinger period must be >= 1");
        let label = match band {
            BollingerBand::Upper => "upper",
            BollingerBand::Middle => "middle",
            BollingerBand::Lower => "lower",
        };
        Self {
            period,
            multiplier,
            band,
            name: format!("bollinger_{label}_{period}_{multiplier}"),
        }
    }

    pub fn upper(period: usize, multiplier: f64) -> Self {
        Self::new(period, multiplier, BollingerBand::Upper)
    }

    pub fn middle(period: usize, multiplier: f64) -> Self {
        Self::new(period, multiplier, BollingerBand::Middle)
    }

    pub fn lower(period: usize, multiplier: f64) -> Self {
        Self::new(period, multiplier, BollingerBand::Lower)
    }
}

impl Indicator for Bollinger {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period.saturating_sub(1)
    }

    fn compute(&self, bars: &[Bar]) -> IndicatorSeries {
        let bands = bollinger_bands(bars, self.period, self.multiplier);
        match self.band {
            BollingerBand::Upper => bands.upper,
            BollingerBand::Middle => bands.middle,
            BollingerBand::Lower => bands.lower,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, make_bars, DEFAULT_EPSILON};

    #[test]
    fn bollinger_middle_is_sma() {
        let bars = make_bars(&[10.0, 11.0, 12.0, 13.0, 14.0]);
        let result = Bollinger::middle(3, 2.0).compute(&bars);

        assert_eq!(result[0], None);
        assert_eq!(result[1], None);
        assert_approx(result[2].unwrap(), 11.0, DEFAULT_EPSILON);
        assert_approx(result[3].unwrap(), 12.0, DEFAULT_EPSILON);
    }

    #[test]
    fn bollinger_bands_symmetric() {
        let bars = make_bars(&[10.0, 11.0, 12.0, 13.0, 14.0]);
        let bands = bollinger_bands(&bars, 3, 2.0);

        for i in 2..5 {
            let half_width = bands.upper[i].unwrap() - bands.middle[i].unwrap();
            assert_approx(
                bands.middle[i].unwrap() - bands.lower[i].unwrap(),
                half_width,
                DEFAULT_EPSILON,
            );
        }
    }

    #[test]
    fn bollinger_constant_price_zero_width() {
        let bars = make_bars(&[100.0, 100.0, 100.0, 100.0]);
        let bands = bollinger_bands(&bars, 3, 2.0);

        for i in 2..4 {
            assert_approx(bands.upper[i].unwrap(), 100.0, DEFAULT_EPSILON);
            assert_approx(bands.middle[i].unwrap(), 100.0, DEFAULT_EPSILON);
            assert_approx(bands.lower[i].unwrap(), 100.0, DEFAULT_EPSILON);
        }
    }

    #[test]
    fn bollinger_constant_inexact_close_is_exact() {
        let bars = make_bars(&[0.1, 0.1, 0.1]);
        let bands = bollinger_bands(&bars, 3, 2.0);
        assert_eq!(bands.upper[2], Some(0.1));
        assert_eq!(bands.middle[2], Some(0.1));
        assert_eq!(bands.lower[2], Some(0.1));
    }

    #[test]
    fn bollinger_known_width() {
        // closes 2,4,6: mean 4, std sqrt(8/3)
        let bars = make_bars(&[2.0, 4.0, 6.0]);
        let upper = Bollinger::upper(3, 2.0).compute(&bars);
        assert_approx(
            upper[2].unwrap(),
            4.0 + 2.0 * (8.0_f64 / 3.0).sqrt(),
            DEFAULT_EPSILON,
        );
    }

    #[test]
    fn bollinger_lookback() {
        assert_eq!(Bollinger::upper(20, 2.0).lookback(), 19);
    }
}
