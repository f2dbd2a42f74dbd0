//! Screening strategies: which calculators run and how a bar is classified.
//!
//! A strategy is pure configuration. `evaluate` computes the series it needs
//! over `bars[..=index]` and classifies the bar at `index`.

use serde::{Deserialize, Serialize};

use crate::detector::{detect, MiddleRule};
use crate::domain::Bar;
use crate::indicators::{
    macd_lines, Atr, Direction, Indicator, IndicatorValues, Macd, MacdLine, Rsi, RsiSmoothing,
    Supertrend,
};
use crate::levels::{LevelSet, LevelSource};
use crate::signal::SignalKind;
use crate::ParamError;

/// Parameters for the Supertrend + MACD + RSI confirmation rule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrendParams {
    pub supertrend_period: usize,
    pub supertrend_multiplier: f64,
    pub rsi_period: usize,
    pub rsi_smoothing: RsiSmoothing,
    pub rsi_overbought: f64,
    pub rsi_oversold: f64,
    pub macd_fast: usize,
    pub macd_slow: usize,
    pub macd_signal: usize,
}

impl Default for TrendParams {
    fn default() -> Self {
        Self {
            supertrend_period: 10,
            supertrend_multiplier: 3.0,
            rsi_period: 14,
            rsi_smoothing: RsiSmoothing::Simple,
            rsi_overbought: 70.0,
            rsi_oversold: 30.0,
            macd_fast: 12,
            macd_slow: 26,
            macd_signal: 9,
        }
    }
}

impl TrendParams {
    fn supertrend(&self) -> Supertrend {
        Supertrend::new(self.supertrend_period, self.supertrend_multiplier)
    }

    /// The ATR the Supertrend bands are built on.
    fn atr(&self) -> Atr {
        Atr::new(self.supertrend_period)
    }

    fn rsi(&self) -> Rsi {
        Rsi::with_smoothing(self.rsi_period, self.rsi_smoothing)
    }

    fn macd(&self, line: MacdLine) -> Macd {
        Macd::new(self.macd_fast, self.macd_slow, self.macd_signal, line)
    }

    fn validate(&self) -> Result<(), ParamError> {
        if self.supertrend_period == 0 || self.rsi_period == 0 {
            return Err(ParamError::new("indicator periods must be > 0"));
        }
        if self.macd_fast == 0 || self.macd_signal == 0 {
            return Err(ParamError::new("MACD spans must be > 0"));
        }
        if self.macd_fast >= self.macd_slow {
            return Err(ParamError::new("MACD fast span must be shorter than slow span"));
        }
        if !(self.supertrend_multiplier.is_finite() && self.supertrend_multiplier > 0.0) {
            return Err(ParamError::new("supertrend multiplier must be finite and > 0"));
        }
        let in_range = |v: f64| v.is_finite() && v > 0.0 && v < 100.0;
        if !in_range(self.rsi_oversold) || !in_range(self.rsi_overbought) {
            return Err(ParamError::new("RSI thresholds must be within (0, 100)"));
        }
        if self.rsi_oversold >= self.rsi_overbought {
            return Err(ParamError::new("RSI oversold must be below overbought"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Strategy {
    /// Flag bars that touch a reference line and close back across it.
    TouchReversal {
        #[serde(default)]
        levels: LevelSource,
        #[serde(default)]
        middle_rule: MiddleRule,
    },
    /// Buy/Sell/Hold from Supertrend direction, MACD histogram and RSI.
    TrendConfirmation(TrendParams),
}

impl Default for Strategy {
    fn default() -> Self {
        Strategy::TouchReversal {
            levels: LevelSource::default(),
            middle_rule: MiddleRule::default(),
        }
    }
}

/// Classification of one bar.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub kinds: Vec<SignalKind>,
    pub levels: LevelSet,
}

impl Strategy {
    pub fn validate(&self) -> Result<(), ParamError> {
        match self {
            Strategy::TouchReversal { levels, .. } => levels.validate(),
            Strategy::TrendConfirmation(params) => params.validate(),
        }
    }

    /// Minimum number of bars up to and including the evaluation bar.
    pub fn warmup(&self) -> usize {
        match self {
            Strategy::TouchReversal { levels, .. } => levels.warmup(),
            Strategy::TrendConfirmation(p) => {
                let lookbacks = [
                    p.supertrend().lookback(),
                    p.rsi().lookback(),
                    p.macd(MacdLine::Histogram).lookback(),
                ];
                lookbacks.into_iter().max().unwrap_or(0) + 1
            }
        }
    }

    /// Classify `bars[index]` using only `bars[..=index]`.
    pub fn evaluate(&self, bars: &[Bar], index: usize) -> Evaluation {
        let window = &bars[..=index];
        let bar = &bars[index];

        match self {
            Strategy::TouchReversal {
                levels: source,
                middle_rule,
            } => {
                let levels = source.compute(window)[index];
                Evaluation {
                    kinds: detect(bar, &levels, *middle_rule),
                    levels,
                }
            }
            Strategy::TrendConfirmation(p) => {
                let trend = p.supertrend().series(window);
                let rsi = p.rsi().compute(window)[index];
                let hist = p.macd(MacdLine::Histogram).compute(window)[index];
                let value = trend.value[index];
                let kind = classify_trend(value.map(|_| trend.direction[index]), hist, rsi, p);
                Evaluation {
                    kinds: vec![kind],
                    levels: LevelSet {
                        upper: None,
                        middle: value,
                        lower: None,
                    },
                }
            }
        }
    }

    /// Every series the strategy uses, by name, for display.
    pub fn augment(&self, bars: &[Bar]) -> IndicatorValues {
        let mut values = IndicatorValues::new();
        match self {
            Strategy::TouchReversal { levels, .. } => {
                let bands = levels.bands(bars);
                values.insert("level_upper", bands.upper);
                values.insert("level_middle", bands.middle);
                values.insert("level_lower", bands.lower);
            }
            Strategy::TrendConfirmation(p) => {
                let st = p.supertrend();
                let trend = st.series(bars);
                let direction = trend
                    .value
                    .iter()
                    .zip(&trend.direction)
                    .map(|(v, d)| {
                        v.map(|_| match d {
                            Direction::Up => 1.0,
                            Direction::Down => -1.0,
                        })
                    })
                    .collect();
                values.insert(st.name().to_string(), trend.value);
                values.insert("supertrend_direction", direction);

                let atr = p.atr();
                values.insert(atr.name().to_string(), atr.compute(bars));

                let rsi = p.rsi();
                values.insert(rsi.name().to_string(), rsi.compute(bars));

                let lines = macd_lines(bars, p.macd_fast, p.macd_slow, p.macd_signal);
                let settled = p.macd(MacdLine::Macd).lookback();
                let mask = |line: Vec<f64>| {
                    line.into_iter()
                        .enumerate()
                        .map(|(i, v)| (i >= settled).then_some(v))
                        .collect::<Vec<_>>()
                };
                values.insert("macd", mask(lines.macd));
                values.insert("macd_signal", mask(lines.signal));
                values.insert("macd_hist", mask(lines.histogram));
            }
        }
        values
    }
}

fn classify_trend(
    direction: Option<Direction>,
    histogram: Option<f64>,
    rsi: Option<f64>,
    p: &TrendParams,
) -> SignalKind {
    let (Some(direction), Some(hist), Some(rsi)) = (direction, histogram, rsi) else {
        return SignalKind::Hold;
    };
    match direction {
        Direction::Up if hist > 0.0 && rsi < p.rsi_overbought => SignalKind::Buy,
        Direction::Down if hist < 0.0 && rsi > p.rsi_oversold => SignalKind::Sell,
        _ => SignalKind::Hold,
    }
}
