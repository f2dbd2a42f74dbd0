//! CSV directory provider.
//!
//! Reads `<dir>/<SYMBOL>.csv` with a header row
//! `date,open,high,low,close,volume` (extra columns are ignored).
//! Rows are sorted by date and clipped to the requested range before the
//! series is validated.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::Deserialize;

use crate::data::provider::{DataError, DataProvider};
use crate::domain::{Bar, BarSeries};

#[derive(Debug, Deserialize)]
struct CsvRow {
    date: NaiveDate,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    #[serde(default)]
    volume: u64,
}

impl From<CsvRow> for Bar {
    fn from(row: CsvRow) -> Self {
        Bar {
            date: row.date,
            open: row.open,
            high: row.high,
            low: row.low,
            close: row.close,
            volume: row.volume,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CsvDirectoryProvider {
    dir: PathBuf,
}

impl CsvDirectoryProvider {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, symbol: &str) -> PathBuf {
        self.dir.join(format!("{symbol}.csv"))
    }
}

/// Parse bars from any CSV reader.
pub fn read_bars<R: std::io::Read>(reader: R, source: &str) -> Result<Vec<Bar>, DataError> {
    let mut rdr = ::csv::ReaderBuilder::new()
        .trim(::csv::Trim::All)
        .from_reader(reader);
    rdr.deserialize::<CsvRow>()
        .map(|row| {
            row.map(Bar::from).map_err(|e| DataError::Parse {
                path: source.to_string(),
                reason: e.to_string(),
            })
        })
        .collect()
}

fn load_file(path: &Path) -> Result<Vec<Bar>, DataError> {
    let display = path.display().to_string();
    let file = std::fs::File::open(path).map_err(|e| DataError::Io {
        path: display.clone(),
        reason: e.to_string(),
    })?;
    read_bars(file, &display)
}

impl DataProvider for CsvDirectoryProvider {
    fn name(&self) -> &str {
        "csv"
    }

    fn fetch(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<BarSeries, DataError> {
        let path = self.path_for(symbol);
        if !path.exists() {
            return Err(DataError::SymbolNotFound {
                symbol: symbol.to_string(),
            });
        }
        let mut bars = load_file(&path)?;
        bars.retain(|b| b.date >= start && b.date <= end);
        bars.sort_by_key(|b| b.date);
        Ok(BarSeries::new(symbol, bars)?)
    }
}
