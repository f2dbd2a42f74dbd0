//! Property tests for indicator invariants.
//!
//! Uses proptest to verify:
//! 1. Rolling mean equals the literal window mean after warmup, None before
//! 2. Bollinger bands collapse onto the mean for constant closes
//! 3. RSI is 100 for strictly increasing closes, and always within [0, 100]
//! 4. Supertrend carries the seed direction through ATR warmup
//! 5. Touch predicates never fire on unavailable levels
//! 6. Appending bars never changes earlier values

use chrono::NaiveDate;
use proptest::prelude::*;
use screenlab_core::detector::{detect, touched_upper_reversed, MiddleRule};
use screenlab_core::domain::Bar;
use screenlab_core::indicators::rolling::{average_true_range, ema, rolling_mean};
use screenlab_core::indicators::*;
use screenlab_core::levels::LevelSet;

// ── Strategies (proptest) ────────────────────────────────────────────

fn arb_closes(min: usize, max: usize) -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec((10.0..500.0_f64).prop_map(|p| (p * 100.0).round() / 100.0), min..max)
}

fn bars_from_closes(closes: &[f64]) -> Vec<Bar> {
    let base = NaiveDate::from_ymd_opt(2023, 1, 2).unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = if i == 0 { close } else { closes[i - 1] };
            Bar {
                date: base + chrono::Duration::days(i as i64),
                open,
                high: open.max(close) + 0.5,
                low: open.min(close) - 0.5,
                close,
                volume: 100,
            }
        })
        .collect()
}

fn arb_bar() -> impl Strategy<Value = Bar> {
    (50.0..150.0_f64, 0.0..10.0_f64, 0.0..10.0_f64, 0.0..1.0_f64, 0.0..1.0_f64).prop_map(
        |(low, span, _pad, o, c)| {
            let high = low + span;
            Bar {
                date: NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
                open: low + o * span,
                high,
                low,
                close: low + c * span,
                volume: 1,
            }
        },
    )
}

// ── 1. Rolling mean ──────────────────────────────────────────────────

proptest! {
    #[test]
    fn rolling_mean_matches_window(values in arb_closes(1, 80), n in 1usize..15) {
        let result = rolling_mean(&values, n);
        prop_assert_eq!(result.len(), values.len());
        for (i, v) in result.iter().enumerate() {
            if i + 1 < n {
                prop_assert!(v.is_none());
            } else {
                let expected = values[(i + 1 - n)..=i].iter().sum::<f64>() / n as f64;
                prop_assert!((v.unwrap() - expected).abs() < 1e-8);
            }
        }
    }

    #[test]
    fn ema_stays_within_input_range(values in arb_closes(1, 60), span in 1usize..30) {
        let lo = values.iter().cloned().fold(f64::INFINITY, f64::min);
        let hi = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        for v in ema(&values, span) {
            prop_assert!(v >= lo - 1e-9 && v <= hi + 1e-9);
        }
    }
}

// ── 2. Bollinger ─────────────────────────────────────────────────────

proptest! {
    #[test]
    fn bollinger_constant_close_collapses(c in 1.0..1000.0_f64, len in 1usize..50, n in 1usize..25) {
        let bars = bars_from_closes(&vec![c; len]);
        let bands = bollinger_bands(&bars, n, 2.0);
        for i in 0..len {
            if i + 1 < n {
                prop_assert!(bands.upper[i].is_none() && bands.lower[i].is_none());
            } else {
                prop_assert_eq!(bands.upper[i], Some(c));
                prop_assert_eq!(bands.middle[i], Some(c));
                prop_assert_eq!(bands.lower[i], Some(c));
            }
        }
    }
}

// ── 3. RSI ───────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn rsi_monotonic_increase_is_100(
        start in 10.0..100.0_f64,
        steps in prop::collection::vec(0.01..5.0_f64, 15..40),
    ) {
        let mut closes = vec![start];
        for s in &steps {
            let last = *closes.last().unwrap();
            closes.push(last + s);
        }
        let bars = bars_from_closes(&closes);
        let rsi = Rsi::new(14).compute(&bars);
        for v in rsi.iter().skip(14) {
            prop_assert_eq!(v.unwrap(), 100.0);
        }
    }

    #[test]
    fn rsi_bounded(closes in arb_closes(2, 80)) {
        let bars = bars_from_closes(&closes);
        for smoothing in [RsiSmoothing::Simple, RsiSmoothing::Wilder] {
            for v in Rsi::with_smoothing(5, smoothing).compute(&bars).into_iter().flatten() {
                prop_assert!((0.0..=100.0).contains(&v));
            }
        }
    }
}

// ── 4. Supertrend ────────────────────────────────────────────────────

proptest! {
    #[test]
    fn supertrend_warmup_keeps_seed(closes in arb_closes(1, 60), period in 1usize..20) {
        let bars = bars_from_closes(&closes);
        let atr = average_true_range(&bars, period);
        let series = Supertrend::new(period, 3.0).series(&bars);
        for i in 0..bars.len() {
            if atr[i].is_none() {
                prop_assert_eq!(series.direction[i], Direction::Up);
                prop_assert!(series.value[i].is_none());
            } else {
                prop_assert!(series.value[i].is_some());
            }
        }
    }
}

// ── 5. Detector ──────────────────────────────────────────────────────

proptest! {
    #[test]
    fn undefined_levels_never_fire(bar in arb_bar()) {
        prop_assert!(detect(&bar, &LevelSet::default(), MiddleRule::Straddle).is_empty());
        prop_assert!(detect(&bar, &LevelSet::default(), MiddleRule::Displacement).is_empty());
    }

    #[test]
    fn level_above_high_never_touches(bar in arb_bar(), gap in 0.01..10.0_f64) {
        prop_assert!(!touched_upper_reversed(&bar, Some(bar.high + gap)));
    }
}

// ── 6. Causality ─────────────────────────────────────────────────────

proptest! {
    #[test]
    fn appending_bars_preserves_prefix(closes in arb_closes(30, 90), cut in 5usize..30) {
        let bars = bars_from_closes(&closes);
        let indicators: Vec<Box<dyn Indicator>> = vec![
            Box::new(Sma::new(5)),
            Box::new(Atr::new(7)),
            Box::new(Rsi::new(6)),
            Box::new(Bollinger::lower(8, 2.0)),
            Box::new(Macd::histogram(3, 6, 4)),
            Box::new(Supertrend::new(5, 2.0)),
        ];
        for ind in &indicators {
            let prefix = ind.compute(&bars[..cut]);
            let full = ind.compute(&bars);
            for i in 0..cut {
                match (prefix[i], full[i]) {
                    (None, None) => {}
                    (Some(a), Some(b)) => prop_assert!((a - b).abs() < 1e-9, "{} at {}", ind.name(), i),
                    _ => prop_assert!(false, "{} availability differs at {}", ind.name(), i),
                }
            }
        }
    }
}
