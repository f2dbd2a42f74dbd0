//! Indicator trait and the named-series container for an augmented bar series.
//!
//! Indicators are pure functions: bar history in, aligned series out.
//! Outputs are produced as parallel series; the input bars are never touched.

use crate::domain::Bar;
use crate::indicators::IndicatorSeries;
use std::collections::BTreeMap;

/// Trait for single-series indicators.
///
/// `compute` returns one value per input bar. The first `lookback()` values
/// are `None` (warmup); a calculator never fabricates a number before its
/// window is satisfied.
///
/// # Look-ahead contamination guard
/// No value at bar t may depend on price data from bar t+1 or later.
/// Every indicator must pass the truncated-vs-full series test.
pub trait Indicator: Send + Sync {
    /// Human-readable name (e.g., "sma_20", "atr_14").
    fn name(&self) -> &str;

    /// Number of leading bars for which the output is unavailable.
    fn lookback(&self) -> usize;

    /// Compute the indicator for the entire bar series.
    fn compute(&self, bars: &[Bar]) -> IndicatorSeries;
}

/// Named indicator series aligned with one bar series.
///
/// Keys are kept sorted so iteration (and anything printed from it) is stable.
#[derive(Debug, Clone, Default)]
pub struct IndicatorValues {
    series: BTreeMap<String, IndicatorSeries>,
}

impl IndicatorValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a named indicator series.
    pub fn insert(&mut self, name: impl Into<String>, values: IndicatorSeries) {
        self.series.insert(name.into(), values);
    }

    /// Value at a bar index. `None` if the name is unknown, the index is out
    /// of bounds, or the value is still in warmup.
    pub fn get(&self, name: &str, bar_index: usize) -> Option<f64> {
        self.series
            .get(name)
            .and_then(|v| v.get(bar_index).copied().flatten())
    }

    pub fn get_series(&self, name: &str) -> Option<&[Option<f64>]> {
        self.series.get(name).map(|v| v.as_slice())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.series.keys().map(|k| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}
