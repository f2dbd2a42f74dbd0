//! Touch-and-reversal detection.
//!
//! Each predicate is exposed on its own: one bar can touch and reverse at
//! several lines at once. An unavailable level never fires.

use serde::{Deserialize, Serialize};

use crate::domain::Bar;
use crate::levels::LevelSet;
use crate::signal::SignalKind;

/// Definition of a reversal at the middle line. One rule is active per run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MiddleRule {
    /// The bar's range contains the line and open/close sit on opposite sides of it.
    #[default]
    Straddle,
    /// The bar's range contains the line and the body (|close - open|) is
    /// shorter than the distance from close to the line.
    Displacement,
}

/// `high >= upper` and `close < upper`.
pub fn touched_upper_reversed(bar: &Bar, upper: Option<f64>) -> bool {
    match upper {
        Some(level) => bar.high >= level && bar.close < level,
        None => false,
    }
}

/// `low <= lower` and `close > lower`.
pub fn touched_lower_reversed(bar: &Bar, lower: Option<f64>) -> bool {
    match lower {
        Some(level) => bar.low <= level && bar.close > level,
        None => false,
    }
}

pub fn touched_middle_reversed(bar: &Bar, middle: Option<f64>, rule: MiddleRule) -> bool {
    let Some(level) = middle else {
        return false;
    };
    if !(bar.low <= level && level <= bar.high) {
        return false;
    }
    match rule {
        MiddleRule::Straddle => {
            (bar.open < level && bar.close > level) || (bar.open > level && bar.close < level)
        }
        MiddleRule::Displacement => (bar.close - bar.open).abs() < (bar.close - level).abs(),
    }
}

/// Every touch-and-reversal kind that fires for `bar`, in the order
/// upper, lower, middle.
pub fn detect(bar: &Bar, levels: &LevelSet, rule: MiddleRule) -> Vec<SignalKind> {
    let mut kinds = Vec::new();
    if touched_upper_reversed(bar, levels.upper) {
        kinds.push(SignalKind::TouchedUpperReversed);
    }
    if touched_lower_reversed(bar, levels.lower) {
        kinds.push(SignalKind::TouchedLowerReversed);
    }
    if touched_middle_reversed(bar, levels.middle, rule) {
        kinds.push(SignalKind::TouchedMiddleReversed);
    }
    kinds
}
