//! Signal types produced by the detector and the trend rule.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::Bar;
use crate::levels::LevelSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalKind {
    TouchedUpperReversed,
    TouchedLowerReversed,
    TouchedMiddleReversed,
    Buy,
    Sell,
    Hold,
}

impl SignalKind {
    pub fn label(&self) -> &'static str {
        match self {
            SignalKind::TouchedUpperReversed => "touched_upper_reversed",
            SignalKind::TouchedLowerReversed => "touched_lower_reversed",
            SignalKind::TouchedMiddleReversed => "touched_middle_reversed",
            SignalKind::Buy => "buy",
            SignalKind::Sell => "sell",
            SignalKind::Hold => "hold",
        }
    }
}

impl std::fmt::Display for SignalKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A single screening hit: what fired, where the levels were, and the bar it fired on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    pub symbol: String,
    pub date: NaiveDate,
    pub kind: SignalKind,
    pub levels: LevelSet,
    pub bar: Bar,
}
