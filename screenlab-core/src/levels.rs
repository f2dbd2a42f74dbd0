//! Reference levels evaluated against a bar by the touch-and-reversal detector.
//!
//! `LevelSource` is the single configurable levels provider: Bollinger Bands
//! or one of the pivot-range formulas. Whatever the source, it yields an
//! upper, middle and lower line per bar, each possibly unavailable.

use serde::{Deserialize, Serialize};

use crate::domain::Bar;
use crate::indicators::{bollinger_bands, pivot_range, BandSeries, RangeFormula, ReferenceBar};
use crate::ParamError;

/// Snapshot of the reference lines for one bar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LevelSet {
    pub upper: Option<f64>,
    pub middle: Option<f64>,
    pub lower: Option<f64>,
}

impl LevelSet {
    pub fn is_complete(&self) -> bool {
        self.upper.is_some() && self.middle.is_some() && self.lower.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LevelSource {
    Bollinger {
        period: usize,
        multiplier: f64,
    },
    PivotRange {
        formula: RangeFormula,
        #[serde(default)]
        reference: ReferenceBar,
    },
}

impl Default for LevelSource {
    fn default() -> Self {
        LevelSource::Bollinger {
            period: 20,
            multiplier: 2.0,
        }
    }
}

impl LevelSource {
    /// Minimum number of bars before the first complete `LevelSet`.
    pub fn warmup(&self) -> usize {
        match self {
            LevelSource::Bollinger { period, .. } => *period,
            LevelSource::PivotRange { reference, .. } => reference.lookback() + 1,
        }
    }

    pub fn validate(&self) -> Result<(), ParamError> {
        match *self {
            LevelSource::Bollinger { period, multiplier } => {
                if period == 0 {
                    return Err(ParamError::new("bollinger period must be > 0"));
                }
                if !(multiplier.is_finite() && multiplier > 0.0) {
                    return Err(ParamError::new("bollinger multiplier must be finite and > 0"));
                }
            }
            LevelSource::PivotRange { formula, .. } => match formula {
                RangeFormula::PivotBased => {}
                RangeFormula::PercentMultiplier { multiplier } => {
                    if !(multiplier.is_finite() && multiplier > 0.0) {
                        return Err(ParamError::new("range multiplier must be finite and > 0"));
                    }
                }
                RangeFormula::FixedPercent { percent } => {
                    if !(percent > 0.0 && percent < 1.0) {
                        return Err(ParamError::new("fixed percent must be in (0, 1)"));
                    }
                }
            },
        }
        Ok(())
    }

    pub fn bands(&self, bars: &[Bar]) -> BandSeries {
        match *self {
            LevelSource::Bollinger { period, multiplier } => {
                bollinger_bands(bars, period, multiplier)
            }
            LevelSource::PivotRange { formula, reference } => {
                pivot_range(bars, formula, reference)
            }
        }
    }

    /// One `LevelSet` per bar.
    pub fn compute(&self, bars: &[Bar]) -> Vec<LevelSet> {
        let bands = self.bands(bars);
        (0..bars.len())
            .map(|i| LevelSet {
                upper: bands.upper[i],
                middle: bands.middle[i],
                lower: bands.lower[i],
            })
            .collect()
    }
}
