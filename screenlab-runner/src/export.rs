//! Reporting and export: JSON and CSV artifacts for a screening run.
//!
//! All persisted results include a `schema_version` field. Unknown versions
//! are rejected on load.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use crate::result::{ScreeningResult, SCHEMA_VERSION};

// ─── JSON export ────────────────────────────────────────────────────

/// Serialize a `ScreeningResult` to pretty JSON.
pub fn export_json(result: &ScreeningResult) -> Result<String> {
    serde_json::to_string_pretty(result).context("failed to serialize ScreeningResult to JSON")
}

/// Deserialize a `ScreeningResult` from JSON, rejecting unknown schema versions.
pub fn import_json(json: &str) -> Result<ScreeningResult> {
    let result: ScreeningResult =
        serde_json::from_str(json).context("failed to deserialize ScreeningResult from JSON")?;
    if result.schema_version > SCHEMA_VERSION {
        bail!(
            "unsupported schema version {} (max supported: {})",
            result.schema_version,
            SCHEMA_VERSION
        );
    }
    Ok(result)
}

// ─── CSV export ─────────────────────────────────────────────────────

fn level(value: Option<f64>) -> String {
    value.map(|v| format!("{:.6}", v)).unwrap_or_default()
}

/// Export every signal as one CSV row, grouped by kind.
///
/// Columns: kind, symbol, date, open, high, low, close, upper, middle, lower.
/// Unavailable levels are written as empty cells.
pub fn export_signals_csv(result: &ScreeningResult) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record([
        "kind", "symbol", "date", "open", "high", "low", "close", "upper", "middle", "lower",
    ])?;

    for (kind, symbols) in &result.buckets {
        for symbol in symbols {
            let Some(entry) = result.entry(symbol) else {
                continue;
            };
            for s in entry.signals.iter().filter(|s| s.kind == *kind) {
                wtr.write_record([
                    kind.label().to_string(),
                    s.symbol.clone(),
                    s.date.to_string(),
                    format!("{:.6}", s.bar.open),
                    format!("{:.6}", s.bar.high),
                    format!("{:.6}", s.bar.low),
                    format!("{:.6}", s.bar.close),
                    level(s.levels.upper),
                    level(s.levels.middle),
                    level(s.levels.lower),
                ])?;
            }
        }
    }

    let data = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(data).context("CSV output is not valid UTF-8")
}

/// Export the failure set. Columns: symbol, reason, message.
pub fn export_failures_csv(result: &ScreeningResult) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(["symbol", "reason", "message"])?;
    for f in &result.failures {
        wtr.write_record([f.symbol.as_str(), f.reason.label(), f.message.as_str()])?;
    }
    let data = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(data).context("CSV output is not valid UTF-8")
}

// ─── Artifact bundle ────────────────────────────────────────────────

/// Save the full artifact set for a screening run.
///
/// Creates a directory named `screen_{date}_{config_id prefix}/` under
/// `output_dir` containing:
/// - `result.json` (the full `ScreeningResult`)
/// - `signals.csv`
/// - `failures.csv`
///
/// `date` is the evaluation date, or `latest` when none was set.
/// Returns the path to the created directory.
pub fn save_artifacts(result: &ScreeningResult, output_dir: &Path) -> Result<PathBuf> {
    let date = result
        .evaluation_date
        .map(|d| d.format("%Y%m%d").to_string())
        .unwrap_or_else(|| "latest".to_string());
    let short_id: String = result.config_id.chars().take(12).collect();
    let run_dir = output_dir.join(format!("screen_{date}_{short_id}"));

    std::fs::create_dir_all(&run_dir)
        .with_context(|| format!("failed to create directory {}", run_dir.display()))?;

    std::fs::write(run_dir.join("result.json"), export_json(result)?)
        .context("failed to write result.json")?;
    std::fs::write(run_dir.join("signals.csv"), export_signals_csv(result)?)
        .context("failed to write signals.csv")?;
    std::fs::write(run_dir.join("failures.csv"), export_failures_csv(result)?)
        .context("failed to write failures.csv")?;

    Ok(run_dir)
}
