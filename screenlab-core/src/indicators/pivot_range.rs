//! Pivot-range support/resistance lines (PRS2 / PRR2 family).
//!
//! Every formula takes one reference bar and produces an upper line (PRR2),
//! a lower line (PRS2) and a middle line halfway between them:
//!
//! - `PivotBased`: pivot = (h+l+c)/3, upper = pivot + (h-l), lower = pivot - (h-l)
//! - `PercentMultiplier { m }`: upper = h + m*(h-l), lower = l - m*(h-l)
//! - `FixedPercent { p }`: upper = c*(1+p), lower = c*(1-p)
//!
//! With `ReferenceBar::Previous` the lines for bar i come from bar i-1, so
//! bar 0 has no levels. `ReferenceBar::Current` uses bar i itself.

use serde::{Deserialize, Serialize};

use crate::domain::Bar;
use crate::indicators::BandSeries;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RangeFormula {
    PivotBased,
    PercentMultiplier { multiplier: f64 },
    FixedPercent { percent: f64 },
}

impl RangeFormula {
    /// `(upper, lower)` lines derived from one reference bar.
    pub fn lines(&self, reference: &Bar) -> (f64, f64) {
        let range = reference.range();
        match *self {
            RangeFormula::PivotBased => {
                let pivot = (reference.high + reference.low + reference.close) / 3.0;
                (pivot + range, pivot - range)
            }
            RangeFormula::PercentMultiplier { multiplier } => (
                reference.high + multiplier * range,
                reference.low - multiplier * range,
            ),
            RangeFormula::FixedPercent { percent } => (
                reference.close * (1.0 + percent),
                reference.close * (1.0 - percent),
            ),
        }
    }
}

/// Which bar the lines for bar `i` are derived from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceBar {
    #[default]
    Previous,
    Current,
}

impl ReferenceBar {
    /// Number of leading bars without levels.
    pub fn lookback(&self) -> usize {
        match self {
            ReferenceBar::Previous => 1,
            ReferenceBar::Current => 0,
        }
    }
}

pub fn pivot_range(bars: &[Bar], formula: RangeFormula, reference: ReferenceBar) -> BandSeries {
    let mut bands = BandSeries::unavailable(bars.len());
    let offset = reference.lookback();

    for i in offset..bars.len() {
        let (upper, lower) = formula.lines(&bars[i - offset]);
        bands.upper[i] = Some(upper);
        bands.lower[i] = Some(lower);
        bands.middle[i] = Some((upper + lower) / 2.0);
    }

    bands
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, make_ohlc_bars, DEFAULT_EPSILON};

    fn two_bars() -> Vec<Bar> {
        make_ohlc_bars(&[
            (100.0, 110.0, 90.0, 105.0),
            (105.0, 108.0, 101.0, 102.0),
        ])
    }

    #[test]
    fn pivot_based_uses_previous_bar() {
        let bands = pivot_range(&two_bars(), RangeFormula::PivotBased, ReferenceBar::Previous);
        assert_eq!(bands.upper[0], None);
        // pivot = (110+90+105)/3 = 101.666..., range 20
        let pivot = 305.0 / 3.0;
        assert_approx(bands.upper[1].unwrap(), pivot + 20.0, DEFAULT_EPSILON);
        assert_approx(bands.lower[1].unwrap(), pivot - 20.0, DEFAULT_EPSILON);
        assert_approx(bands.middle[1].unwrap(), pivot, DEFAULT_EPSILON);
    }

    #[test]
    fn percent_multiplier_extends_range() {
        let formula = RangeFormula::PercentMultiplier { multiplier: 0.5 };
        let bands = pivot_range(&two_bars(), formula, ReferenceBar::Previous);
        assert_approx(bands.upper[1].unwrap(), 120.0, DEFAULT_EPSILON);
        assert_approx(bands.lower[1].unwrap(), 80.0, DEFAULT_EPSILON);
        assert_approx(bands.middle[1].unwrap(), 100.0, DEFAULT_EPSILON);
    }

    #[test]
    fn fixed_percent_around_close() {
        let formula = RangeFormula::FixedPercent { percent: 0.03 };
        let bands = pivot_range(&two_bars(), formula, ReferenceBar::Current);
        assert_approx(bands.upper[0].unwrap(), 108.15, 1e-9);
        assert_approx(bands.lower[0].unwrap(), 101.85, 1e-9);
        assert_approx(bands.middle[1].unwrap(), 102.0, 1e-9);
    }

    #[test]
    fn empty_series_has_no_levels() {
        let bands = pivot_range(&[], RangeFormula::PivotBased, ReferenceBar::Previous);
        assert!(bands.upper.is_empty());
    }
}
