//! Batch driver: evaluate one strategy over every symbol in a universe.
//!
//! Each symbol is fetched and evaluated independently. Any failure is
//! converted into a `ScreenFailure` for that symbol and the batch continues.
//! With `parallelism > 1` symbols run on a dedicated Rayon pool; results are
//! collected one slot per symbol, so the output order is the universe order
//! either way.

use chrono::NaiveDate;
use rayon::prelude::*;
use thiserror::Error;

use screenlab_core::data::{DataError, DataProvider, Universe};
use screenlab_core::{BarError, BarSeries, Signal, Strategy};

use crate::config::{ConfigError, ScreenConfig};
use crate::progress::ScreenProgress;
use crate::result::{FailureReason, ScreeningResult};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScreenFailure {
    #[error("insufficient data: {0}")]
    InsufficientData(String),

    #[error("malformed bar: {0}")]
    MalformedBar(#[from] BarError),

    #[error("fetch failed: {0}")]
    FetchFailure(String),
}

impl ScreenFailure {
    pub fn reason(&self) -> FailureReason {
        match self {
            ScreenFailure::InsufficientData(_) => FailureReason::InsufficientData,
            ScreenFailure::MalformedBar(_) => FailureReason::MalformedBar,
            ScreenFailure::FetchFailure(_) => FailureReason::FetchFailure,
        }
    }
}

impl From<DataError> for ScreenFailure {
    fn from(e: DataError) -> Self {
        match e {
            DataError::InvalidBar(bar) => ScreenFailure::MalformedBar(bar),
            other => ScreenFailure::FetchFailure(other.to_string()),
        }
    }
}

/// Evaluate `strategy` on one already-fetched series.
///
/// Evaluates the bar dated `evaluation_date`, or the last bar when `None`.
/// Returns an empty list when the bar matches nothing.
pub fn evaluate_series(
    series: &BarSeries,
    strategy: &Strategy,
    evaluation_date: Option<NaiveDate>,
) -> Result<Vec<Signal>, ScreenFailure> {
    if series.is_empty() {
        return Err(ScreenFailure::InsufficientData("no bars".into()));
    }
    let index = match evaluation_date {
        Some(date) => series
            .position_of(date)
            .ok_or_else(|| ScreenFailure::InsufficientData(format!("no bar on {date}")))?,
        None => series.len() - 1,
    };

    let available = index + 1;
    let required = strategy.warmup();
    if available < required {
        return Err(ScreenFailure::InsufficientData(format!(
            "{available} bars up to evaluation date, {required} required"
        )));
    }

    let bars = series.bars();
    let bar = bars[index];
    let evaluation = strategy.evaluate(bars, index);
    Ok(evaluation
        .kinds
        .into_iter()
        .map(|kind| Signal {
            symbol: series.symbol().to_string(),
            date: bar.date,
            kind,
            levels: evaluation.levels,
            bar,
        })
        .collect())
}

pub struct Screener {
    config: ScreenConfig,
    config_id: String,
    /// Inclusive fetch range, resolved once so runs never compute dates.
    range: (NaiveDate, NaiveDate),
    pool: Option<rayon::ThreadPool>,
}

impl std::fmt::Debug for Screener {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Screener")
            .field("config_id", &self.config_id)
            .field("range", &self.range)
            .field("parallelism", &self.config.parallelism)
            .finish()
    }
}

impl Screener {
    /// Validate `config` and prepare a screener.
    ///
    /// `as_of` bounds the fetch range when the config has no evaluation date.
    pub fn new(config: ScreenConfig, as_of: NaiveDate) -> Result<Self, ConfigError> {
        config.validate()?;
        let config_id = config.config_id()?;
        let range = config.fetch_range(as_of)?;
        let pool = if config.parallelism > 1 {
            Some(
                rayon::ThreadPoolBuilder::new()
                    .num_threads(config.parallelism)
                    .build()
                    .map_err(|e| ConfigError::ThreadPool(e.to_string()))?,
            )
        } else {
            None
        };
        Ok(Self {
            config,
            config_id,
            range,
            pool,
        })
    }

    pub fn config(&self) -> &ScreenConfig {
        &self.config
    }

    pub fn config_id(&self) -> &str {
        &self.config_id
    }

    /// Fetch and evaluate a single symbol.
    pub fn screen_symbol(
        &self,
        symbol: &str,
        provider: &dyn DataProvider,
    ) -> Result<Vec<Signal>, ScreenFailure> {
        let (start, end) = self.range;
        let series = provider.fetch(symbol, start, end)?;
        evaluate_series(&series, &self.config.strategy, self.config.evaluation_date)
    }

    /// Screen every symbol in `universe`. Never fails as a whole.
    pub fn run(
        &self,
        universe: &Universe,
        provider: &dyn DataProvider,
        progress: Option<&dyn ScreenProgress>,
    ) -> ScreeningResult {
        let symbols = universe.symbols();
        let total = symbols.len();
        if let Some(p) = progress {
            p.on_start(total);
        }
        tracing::debug!(
            total,
            provider = provider.name(),
            config_id = %self.config_id,
            "starting screen"
        );

        let outcomes: Vec<(String, Result<Vec<Signal>, ScreenFailure>)> =
            if let Some(ref tp) = self.pool {
                tp.install(|| {
                    symbols
                        .par_iter()
                        .map(|symbol| (symbol.clone(), self.screen_symbol(symbol, provider)))
                        .collect()
                })
            } else {
                symbols
                    .iter()
                    .map(|symbol| (symbol.clone(), self.screen_symbol(symbol, provider)))
                    .collect()
            };

        if let Some(p) = progress {
            for (index, (symbol, outcome)) in outcomes.iter().enumerate() {
                match outcome {
                    Ok(signals) => p.on_symbol_done(symbol, index, total, signals.len()),
                    Err(failure) => p.on_symbol_failed(
                        symbol,
                        index,
                        total,
                        failure.reason(),
                        &failure.to_string(),
                    ),
                }
            }
        }

        let result = ScreeningResult::from_outcomes(
            self.config_id.clone(),
            self.config.evaluation_date,
            outcomes,
        );
        if let Some(p) = progress {
            p.on_complete(result.entries.len(), result.failures.len());
        }
        result
    }
}
