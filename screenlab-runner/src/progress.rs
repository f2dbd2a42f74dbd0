//! Progress reporting for screening runs.
//!
//! Callbacks are always delivered in universe order, after evaluation,
//! so parallel and sequential runs report identically.

use crate::result::FailureReason;

pub trait ScreenProgress {
    fn on_start(&self, total: usize);
    fn on_symbol_done(&self, symbol: &str, index: usize, total: usize, signals: usize);
    fn on_symbol_failed(
        &self,
        symbol: &str,
        index: usize,
        total: usize,
        reason: FailureReason,
        message: &str,
    );
    fn on_complete(&self, evaluated: usize, failed: usize);
}

/// Reports progress through `tracing` events.
pub struct LogProgress;

impl ScreenProgress for LogProgress {
    fn on_start(&self, total: usize) {
        tracing::info!(total, "screening universe");
    }

    fn on_symbol_done(&self, symbol: &str, index: usize, total: usize, signals: usize) {
        tracing::debug!(symbol, signals, "[{}/{}] evaluated", index + 1, total);
    }

    fn on_symbol_failed(
        &self,
        symbol: &str,
        index: usize,
        total: usize,
        reason: FailureReason,
        message: &str,
    ) {
        tracing::warn!(
            symbol,
            reason = reason.label(),
            "[{}/{}] skipped: {}",
            index + 1,
            total,
            message
        );
    }

    fn on_complete(&self, evaluated: usize, failed: usize) {
        tracing::info!(evaluated, failed, "screening complete");
    }
}
