//! Universe configuration: the ordered list of symbols to screen.
//!
//! Sources:
//! - TOML: a top-level `symbols = [...]` list and/or `[sectors]` tables of
//!   ticker lists (sectors are appended in name order after `symbols`)
//! - CSV: a `symbol` column (any case), or the first column if none matches
//! - an explicit list
//!
//! Symbols are trimmed and upper-cased; duplicates keep their first position.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UniverseError {
    #[error("read universe file {path}: {reason}")]
    Io { path: String, reason: String },

    #[error("parse universe: {0}")]
    Parse(String),

    #[error("unsupported universe file extension: {0}")]
    UnsupportedFormat(String),
}

#[derive(Debug, Default, Deserialize)]
struct UniverseFile {
    #[serde(default)]
    symbols: Vec<String>,
    #[serde(default)]
    sectors: BTreeMap<String, Vec<String>>,
}

/// Ordered, deduplicated symbol list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Universe {
    symbols: Vec<String>,
}

impl Universe {
    pub fn from_symbols<I, S>(symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut out: Vec<String> = Vec::new();
        for raw in symbols {
            let sym = raw.as_ref().trim().to_uppercase();
            if !sym.is_empty() && !out.contains(&sym) {
                out.push(sym);
            }
        }
        Self { symbols: out }
    }

    /// Load a universe from a `.toml`, `.csv` or `.txt` (one symbol per line) file.
    pub fn from_file(path: &Path) -> Result<Self, UniverseError> {
        let content = std::fs::read_to_string(path).map_err(|e| UniverseError::Io {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        match ext.as_str() {
            "toml" => Self::from_toml(&content),
            "csv" => Self::from_csv(&content),
            "txt" => Ok(Self::from_symbols(content.lines())),
            other => Err(UniverseError::UnsupportedFormat(other.to_string())),
        }
    }

    pub fn from_toml(content: &str) -> Result<Self, UniverseError> {
        let file: UniverseFile =
            toml::from_str(content).map_err(|e| UniverseError::Parse(e.to_string()))?;
        let sector_symbols = file.sectors.into_values().flatten();
        Ok(Self::from_symbols(
            file.symbols.into_iter().chain(sector_symbols),
        ))
    }

    pub fn from_csv(content: &str) -> Result<Self, UniverseError> {
        let mut rdr = ::csv::ReaderBuilder::new()
            .trim(::csv::Trim::All)
            .flexible(true)
            .from_reader(content.as_bytes());
        let headers = rdr
            .headers()
            .map_err(|e| UniverseError::Parse(e.to_string()))?
            .clone();
        let column = headers
            .iter()
            .position(|h| h.eq_ignore_ascii_case("symbol"))
            .unwrap_or(0);

        let mut symbols = Vec::new();
        for record in rdr.records() {
            let record = record.map_err(|e| UniverseError::Parse(e.to_string()))?;
            if let Some(sym) = record.get(column) {
                symbols.push(sym.to_string());
            }
        }
        Ok(Self::from_symbols(symbols))
    }

    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}
