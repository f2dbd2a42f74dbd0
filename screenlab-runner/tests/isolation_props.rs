//! Property tests for batch aggregation.
//!
//! For any universe and any subset of failing symbols:
//! 1. every symbol lands in exactly one of entries / failures
//! 2. both lists preserve universe order
//! 3. every bucketed symbol is an entry with a signal of that kind

use chrono::NaiveDate;
use proptest::prelude::*;
use screenlab_core::data::{DataError, DataProvider, SyntheticProvider, Universe};
use screenlab_core::BarSeries;
use screenlab_runner::{ScreenConfig, Screener};

struct SelectiveProvider {
    inner: SyntheticProvider,
    failing: Vec<String>,
}

impl DataProvider for SelectiveProvider {
    fn name(&self) -> &str {
        "selective"
    }

    fn fetch(&self, symbol: &str, start: NaiveDate, end: NaiveDate) -> Result<BarSeries, DataError> {
        if self.failing.iter().any(|s| s == symbol) {
            return Err(DataError::Other(format!("{symbol} unavailable")));
        }
        self.inner.fetch(symbol, start, end)
    }
}

fn arb_case() -> impl Strategy<Value = (Vec<String>, Vec<bool>, usize)> {
    prop::collection::vec("[A-Z]{2,4}", 1..12).prop_flat_map(|symbols| {
        let n = symbols.len();
        (
            Just(symbols),
            prop::collection::vec(any::<bool>(), n),
            1usize..4,
        )
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn every_symbol_accounted_for((symbols, fail_mask, parallelism) in arb_case()) {
        let universe = Universe::from_symbols(&symbols);
        let failing: Vec<String> = universe
            .symbols()
            .iter()
            .zip(&fail_mask)
            .filter(|(_, f)| **f)
            .map(|(s, _)| s.clone())
            .collect();
        let provider = SelectiveProvider { inner: SyntheticProvider::new(), failing: failing.clone() };

        let config = ScreenConfig { parallelism, ..ScreenConfig::default() };
        let as_of = NaiveDate::from_ymd_opt(2024, 6, 28).unwrap();
        let result = Screener::new(config, as_of).unwrap().run(&universe, &provider, None);

        prop_assert_eq!(result.entries.len() + result.failures.len(), universe.len());

        let failed: Vec<String> = result.failures.iter().map(|f| f.symbol.clone()).collect();
        prop_assert_eq!(failed, failing.clone());

        let expected_entries: Vec<&String> =
            universe.symbols().iter().filter(|s| !failing.contains(s)).collect();
        let entries: Vec<&String> = result.entries.iter().map(|e| &e.symbol).collect();
        prop_assert_eq!(entries, expected_entries);

        for (kind, bucket) in &result.buckets {
            for symbol in bucket {
                let entry = result.entry(symbol).unwrap();
                prop_assert!(entry.signals.iter().any(|s| s.kind == *kind));
            }
        }
    }
}
