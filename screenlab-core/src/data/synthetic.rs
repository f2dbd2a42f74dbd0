//! Synthetic bar provider for demos and tests.
//!
//! Produces a random walk from a starting price of 100.0, weekdays only.
//! The RNG is seeded from the BLAKE3 hash of the symbol, so the same symbol
//! and range always yield the same bars.

use chrono::{Datelike, NaiveDate, Weekday};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::data::provider::{DataError, DataProvider};
use crate::domain::{Bar, BarSeries};

#[derive(Debug, Clone, Default)]
pub struct SyntheticProvider {
    /// Symbols that fail with `SymbolNotFound`, for exercising failure paths.
    unknown: Vec<String>,
}

impl SyntheticProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_unknown(mut self, symbol: impl Into<String>) -> Self {
        self.unknown.push(symbol.into());
        self
    }
}

/// Generate a deterministic random walk for `symbol`.
pub fn generate_bars(symbol: &str, start: NaiveDate, end: NaiveDate) -> Vec<Bar> {
    let seed: [u8; 32] = *blake3::hash(symbol.as_bytes()).as_bytes();
    let mut rng = StdRng::from_seed(seed);

    let mut bars = Vec::new();
    let mut price = 100.0_f64;
    let mut current = start;

    while current <= end {
        if matches!(current.weekday(), Weekday::Sat | Weekday::Sun) {
            current += chrono::Duration::days(1);
            continue;
        }

        let daily_return: f64 = rng.gen_range(-0.03..0.03);
        let open = price;
        let close = price * (1.0 + daily_return);
        let high = open.max(close) * (1.0 + rng.gen_range(0.0..0.01));
        let low = open.min(close) * (1.0 - rng.gen_range(0.0..0.01));
        let volume = rng.gen_range(500_000..5_000_000u64);

        bars.push(Bar {
            date: current,
            open,
            high,
            low,
            close,
            volume,
        });

        price = close;
        current += chrono::Duration::days(1);
    }

    bars
}

impl DataProvider for SyntheticProvider {
    fn name(&self) -> &str {
        "synthetic"
    }

    fn fetch(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<BarSeries, DataError> {
        if self.unknown.iter().any(|s| s == symbol) {
            return Err(DataError::SymbolNotFound {
                symbol: symbol.to_string(),
            });
        }
        Ok(BarSeries::new(symbol, generate_bars(symbol, start, end))?)
    }
}
