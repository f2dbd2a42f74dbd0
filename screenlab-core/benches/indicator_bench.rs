//! Criterion benchmarks for ScreenLab hot paths.
//!
//! Benchmarks:
//! 1. Indicator precompute (SMA, ATR, Bollinger, RSI, MACD, Supertrend)
//! 2. Strategy evaluation at the last bar (what the screener runs per symbol)

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use screenlab_core::domain::Bar;
use screenlab_core::indicators::{
    bollinger_bands, macd_lines, Atr, Indicator, Rsi, Sma, Supertrend,
};
use screenlab_core::strategy::{Strategy, TrendParams};

fn make_bars(n: usize) -> Vec<Bar> {
    let base_date = chrono::NaiveDate::from_ymd_opt(2020, 1, 2).unwrap();
    (0..n)
        .map(|i| {
            let close = 100.0 + (i as f64 * 0.1).sin() * 10.0;
            let open = close - 0.3;
            Bar {
                date: base_date + chrono::Duration::days(i as i64),
                open,
                high: close + 1.5,
                low: open - 1.5,
                close,
                volume: 1_000_000 + (i as u64 % 500_000),
            }
        })
        .collect()
}

fn bench_indicators(c: &mut Criterion) {
    let mut group = c.benchmark_group("indicators");
    for n in [250usize, 2_500] {
        let bars = make_bars(n);
        group.bench_with_input(BenchmarkId::new("sma_20", n), &bars, |b, bars| {
            b.iter(|| Sma::new(20).compute(black_box(bars)))
        });
        group.bench_with_input(BenchmarkId::new("atr_14", n), &bars, |b, bars| {
            b.iter(|| Atr::new(14).compute(black_box(bars)))
        });
        group.bench_with_input(BenchmarkId::new("bollinger_20_2", n), &bars, |b, bars| {
            b.iter(|| bollinger_bands(black_box(bars), 20, 2.0))
        });
        group.bench_with_input(BenchmarkId::new("rsi_14", n), &bars, |b, bars| {
            b.iter(|| Rsi::new(14).compute(black_box(bars)))
        });
        group.bench_with_input(BenchmarkId::new("macd_12_26_9", n), &bars, |b, bars| {
            b.iter(|| macd_lines(black_box(bars), 12, 26, 9))
        });
        group.bench_with_input(BenchmarkId::new("supertrend_10_3", n), &bars, |b, bars| {
            b.iter(|| Supertrend::new(10, 3.0).series(black_box(bars)))
        });
    }
    group.finish();
}

fn bench_strategy(c: &mut Criterion) {
    let bars = make_bars(500);
    let last = bars.len() - 1;
    let touch = Strategy::default();
    let trend = Strategy::TrendConfirmation(TrendParams::default());

    c.bench_function("evaluate_touch_reversal_500", |b| {
        b.iter(|| touch.evaluate(black_box(&bars), last))
    });
    c.bench_function("evaluate_trend_confirmation_500", |b| {
        b.iter(|| trend.evaluate(black_box(&bars), last))
    });
}

criterion_group!(benches, bench_indicators, bench_strategy);
criterion_main!(benches);
