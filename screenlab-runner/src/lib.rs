//! ScreenLab Runner: screening runs over a symbol universe.
//!
//! This crate builds on `screenlab-core` to provide:
//! - Run configuration loaded from TOML and validated once
//! - The batch screener with per-symbol failure isolation
//! - Result aggregation into signal-kind buckets plus a failure set
//! - JSON and CSV export

pub mod config;
pub mod export;
pub mod progress;
pub mod result;
pub mod screener;

pub use config::{ConfigError, ScreenConfig};
pub use export::{export_failures_csv, export_json, export_signals_csv, import_json, save_artifacts};
pub use progress::{LogProgress, ScreenProgress};
pub use result::{
    FailureReason, ScreenSummary, ScreeningResult, SymbolEntry, SymbolFailure, SCHEMA_VERSION,
};
pub use screener::{evaluate_series, ScreenFailure, Screener};
