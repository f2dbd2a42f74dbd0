//! Screening result: per-symbol signals, kind buckets, and the failure set.
//!
//! The result is a pure function of the configuration, the evaluation date
//! and the bar data. No wall-clock timestamps or thread ids are stored, so
//! identical inputs serialize to identical bytes.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use screenlab_core::{Signal, SignalKind};

use crate::screener::ScreenFailure;

/// Current schema version for persisted results.
pub const SCHEMA_VERSION: u32 = 1;

fn default_schema_version() -> u32 {
    SCHEMA_VERSION
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureReason {
    InsufficientData,
    MalformedBar,
    FetchFailure,
}

impl FailureReason {
    pub fn label(&self) -> &'static str {
        match self {
            FailureReason::InsufficientData => "insufficient_data",
            FailureReason::MalformedBar => "malformed_bar",
            FailureReason::FetchFailure => "fetch_failure",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolFailure {
    pub symbol: String,
    pub reason: FailureReason,
    pub message: String,
}

/// One evaluated symbol. An empty `signals` list means "no match".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolEntry {
    pub symbol: String,
    pub signals: Vec<Signal>,
}

impl SymbolEntry {
    pub fn is_match(&self) -> bool {
        !self.signals.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreeningResult {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    pub config_id: String,
    /// Requested evaluation date. `None` means each symbol's latest bar.
    pub evaluation_date: Option<NaiveDate>,
    /// Successfully evaluated symbols, in universe order.
    pub entries: Vec<SymbolEntry>,
    /// Symbols per signal kind, in universe order within each bucket.
    pub buckets: BTreeMap<SignalKind, Vec<String>>,
    /// Symbols that could not be evaluated, in universe order.
    pub failures: Vec<SymbolFailure>,
}

impl ScreeningResult {
    /// Aggregate per-symbol outcomes, which must already be in universe order.
    pub fn from_outcomes(
        config_id: String,
        evaluation_date: Option<NaiveDate>,
        outcomes: Vec<(String, Result<Vec<Signal>, ScreenFailure>)>,
    ) -> Self {
        let mut entries = Vec::new();
        let mut buckets: BTreeMap<SignalKind, Vec<String>> = BTreeMap::new();
        let mut failures = Vec::new();

        for (symbol, outcome) in outcomes {
            match outcome {
                Ok(signals) => {
                    for signal in &signals {
                        let bucket = buckets.entry(signal.kind).or_default();
                        if bucket.last() != Some(&symbol) {
                            bucket.push(symbol.clone());
                        }
                    }
                    entries.push(SymbolEntry { symbol, signals });
                }
                Err(failure) => failures.push(SymbolFailure {
                    reason: failure.reason(),
                    message: failure.to_string(),
                    symbol,
                }),
            }
        }

        Self {
            schema_version: SCHEMA_VERSION,
            config_id,
            evaluation_date,
            entries,
            buckets,
            failures,
        }
    }

    /// Symbols that fired `kind`.
    pub fn bucket(&self, kind: SignalKind) -> &[String] {
        self.buckets.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Entries with at least one signal.
    pub fn matches(&self) -> impl Iterator<Item = &SymbolEntry> {
        self.entries.iter().filter(|e| e.is_match())
    }

    pub fn entry(&self, symbol: &str) -> Option<&SymbolEntry> {
        self.entries.iter().find(|e| e.symbol == symbol)
    }

    pub fn failure(&self, symbol: &str) -> Option<&SymbolFailure> {
        self.failures.iter().find(|f| f.symbol == symbol)
    }

    pub fn summary(&self) -> ScreenSummary {
        ScreenSummary {
            evaluated: self.entries.len(),
            matched: self.matches().count(),
            failed: self.failures.len(),
        }
    }

    /// blake3 hash of the serialized result.
    pub fn fingerprint(&self) -> Result<String, serde_json::Error> {
        let json = serde_json::to_vec(self)?;
        Ok(blake3::hash(&json).to_hex().to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenSummary {
    pub evaluated: usize,
    pub matched: usize,
    pub failed: usize,
}

impl std::fmt::Display for ScreenSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} evaluated, {} matched, {} failed",
            self.evaluated, self.matched, self.failed
        )
    }
}
