//! Supertrend: ATR-based directional indicator.
//!
//! Inherently sequential: the state at bar i is a function of the bar, its
//! ATR and the state at bar i-1. It is computed as an explicit fold over
//! `SupertrendState`, so each step can be tested on its own.
//!
//! With hl2 = (high+low)/2, upper = hl2 + m*atr, lower = hl2 - m*atr:
//! - close > previous value → value = max(lower, previous value), direction Up
//! - otherwise              → value = min(upper, previous value), direction Down
//!
//! Seed: direction starts `Up`. The first bar with a defined ATR sets
//! value = upper band and keeps the seed direction. Bars whose ATR is still
//! in warmup carry the previous state forward unchanged, so the leading
//! `period - 1` bars report direction `Up` and no value.

use serde::{Deserialize, Serialize};

use crate::domain::Bar;
use crate::indicators::indicator::Indicator;
use crate::indicators::rolling::average_true_range;
use crate::indicators::IndicatorSeries;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Up,
    Down,
}

/// Supertrend state at one bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SupertrendState {
    pub value: Option<f64>,
    pub direction: Direction,
}

impl SupertrendState {
    pub const SEED: SupertrendState = SupertrendState {
        value: None,
        direction: Direction::Up,
    };

    /// Advance one bar.
    pub fn step(self, bar: &Bar, atr: Option<f64>, multiplier: f64) -> SupertrendState {
        let Some(atr) = atr else {
            return self;
        };

        let hl2 = bar.hl2();
        let upper = hl2 + multiplier * atr;
        let lower = hl2 - multiplier * atr;

        match self.value {
            None => SupertrendState {
                value: Some(upper),
                direction: self.direction,
            },
            Some(prev) if bar.close > prev => SupertrendState {
                value: Some(lower.max(prev)),
                direction: Direction::Up,
            },
            Some(prev) => SupertrendState {
                value: Some(upper.min(prev)),
                direction: Direction::Down,
            },
        }
    }
}

/// Value line and direction per bar.
#[derive(Debug, Clone, PartialEq)]
pub struct SupertrendSeries {
    pub value: IndicatorSeries,
    pub direction: Vec<Direction>,
}

#[derive(Debug, Clone)]
pub struct Supertrend {
    period: usize,
    multiplier: f64,
    name: String,
}

impl Supertrend {
    pub fn new(period: usize, multiplier: f64) -> Self {
        assert!(period >= 1, "Supertrend period must be >= 1");
        Self {
            period,
            multiplier,
            name: format!("supertrend_{period}_{multiplier}"),
        }
    }

    pub fn states(&self, bars: &[Bar]) -> Vec<SupertrendState> {
        let atr = average_true_range(bars, self.period);
        bars.iter()
            .zip(atr)
            .scan(SupertrendState::SEED, |state, (bar, atr)| {
                *state = state.step(bar, atr, self.multiplier);
                Some(*state)
            })
            .collect()
    }

    pub fn series(&self, bars: &[Bar]) -> SupertrendSeries {
        let states = self.states(bars);
        SupertrendSeries {
            value: states.iter().map(|s| s.value).collect(),
            direction: states.iter().map(|s| s.direction).collect(),
        }
    }
}

impl Indicator for Supertrend {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period - 1
    }

    fn compute(&self, bars: &[Bar]) -> IndicatorSeries {
        self.series(bars).value
    }
}
