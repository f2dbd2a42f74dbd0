//! Rolling statistics over raw value slices and bar series.
//!
//! Every function here is pure: identical input yields identical output, and
//! the value at index `i` only reads inputs at indices `0..=i`.
//!
//! Windowed outputs are `None` until the window is full (`i < n - 1`).

use crate::domain::Bar;
use crate::indicators::IndicatorSeries;

/// Arithmetic mean of `values[i+1-n..=i]`.
///
/// Sums deviations from an anchor value (the first value of the window at
/// the last re-sum) and re-sums from scratch every `n` steps to keep
/// floating-point drift bounded on long series. A window of identical values
/// `C` yields exactly `C`.
pub fn rolling_mean(values: &[f64], n: usize) -> IndicatorSeries {
    assert!(n >= 1, "rolling window must be >= 1");
    let len = values.len();
    let mut result = vec![None; len];

    if len < n {
        return result;
    }

    let mut anchor = values[0];
    let mut sum: f64 = values[..n].iter().map(|v| v - anchor).sum();
    result[n - 1] = Some(anchor + sum / n as f64);

    for i in n..len {
        if (i - n + 1) % n == 0 {
            anchor = values[i + 1 - n];
            sum = values[(i + 1 - n)..=i].iter().map(|v| v - anchor).sum();
        } else {
            sum += values[i] - values[i - n];
        }
        result[i] = Some(anchor + sum / n as f64);
    }

    result
}

/// Standard deviation over the same window as [`rolling_mean`], dividing by `n`.
pub fn rolling_std(values: &[f64], n: usize) -> IndicatorSeries {
    let means = rolling_mean(values, n);
    means
        .iter()
        .enumerate()
        .map(|(i, mean)| {
            mean.map(|m| {
                let window = &values[(i + 1 - n)..=i];
                let variance = window.iter().map(|v| (v - m) * (v - m)).sum::<f64>() / n as f64;
                variance.sqrt()
            })
        })
        .collect()
}

/// True Range series.
///
/// TR[0] = high[0] - low[0] (no previous close).
/// TR[t] = max(high[t]-low[t], |high[t]-close[t-1]|, |low[t]-close[t-1]|).
pub fn true_range(bars: &[Bar]) -> Vec<f64> {
    bars.iter()
        .enumerate()
        .map(|(i, bar)| {
            let hl = bar.high - bar.low;
            if i == 0 {
                return hl;
            }
            let pc = bars[i - 1].close;
            hl.max((bar.high - pc).abs()).max((bar.low - pc).abs())
        })
        .collect()
}

/// Average True Range as a simple rolling mean of [`true_range`].
pub fn average_true_range(bars: &[Bar], n: usize) -> IndicatorSeries {
    rolling_mean(&true_range(bars), n)
}

/// Exponential moving average with `alpha = 2 / (span + 1)`, seeded with `values[0]`.
///
/// Defined from index 0, so it returns plain values rather than an
/// [`IndicatorSeries`].
pub fn ema(values: &[f64], span: usize) -> Vec<f64> {
    assert!(span >= 1, "EMA span must be >= 1");
    let alpha = 2.0 / (span as f64 + 1.0);
    let mut result = Vec::with_capacity(values.len());
    let mut prev = match values.first() {
        Some(&v) => v,
        None => return result,
    };
    result.push(prev);
    for &v in &values[1..] {
        prev = alpha * v + (1.0 - alpha) * prev;
        result.push(prev);
    }
    result
}
