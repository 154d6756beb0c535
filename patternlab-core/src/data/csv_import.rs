//! CSV import provider.
//!
//! Reads daily bars from a Yahoo-style CSV export:
//! `Date,Open,High,Low,Close,Adj Close,Volume` (`Adj Close` optional).
//! Rows outside the requested range are dropped.

use super::provider::{DataError, DataProvider, DataSource, FetchRequest, FetchResult, RawBar};
use chrono::NaiveDate;
use serde::Deserialize;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(rename = "Date")]
    date: NaiveDate,
    #[serde(rename = "Open")]
    open: Option<f64>,
    #[serde(rename = "High")]
    high: Option<f64>,
    #[serde(rename = "Low")]
    low: Option<f64>,
    #[serde(rename = "Close")]
    close: Option<f64>,
    #[serde(rename = "Adj Close", default)]
    adj_close: Option<f64>,
    #[serde(rename = "Volume")]
    volume: Option<f64>,
}

impl CsvRow {
    fn into_raw(self) -> RawBar {
        let close = self.close.unwrap_or(f64::NAN);
        RawBar {
            date: self.date,
            open: self.open.unwrap_or(f64::NAN),
            high: self.high.unwrap_or(f64::NAN),
            low: self.low.unwrap_or(f64::NAN),
            close,
            // Exports sometimes write volume as "1234.0".
            volume: self.volume.map(|v| v.max(0.0) as u64).unwrap_or(0),
            adj_close: self.adj_close.unwrap_or(close),
        }
    }
}

/// Parse daily rows from any CSV reader, keeping those in `[start, end]`, sorted by date.
pub fn read_daily_csv<R: Read>(
    reader: R,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<RawBar>, DataError> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut bars = Vec::new();

    for (line, row) in rdr.deserialize::<CsvRow>().enumerate() {
        let row = row.map_err(|e| DataError::CsvImport(format!("row {}: {e}", line + 1)))?;
        if row.date < start || row.date > end {
            continue;
        }
        bars.push(row.into_raw());
    }

    bars.sort_by_key(|b| b.date);
    Ok(bars)
}

/// Provider backed by a CSV file on disk.
#[derive(Debug, Clone)]
pub struct CsvProvider {
    path: PathBuf,
}

impl CsvProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DataProvider for CsvProvider {
    fn name(&self) -> &str {
        "csv_import"
    }

    fn fetch(&self, request: &FetchRequest) -> Result<FetchResult, DataError> {
        debug!(path = %self.path.display(), "reading daily csv");
        let file = std::fs::File::open(&self.path)
            .map_err(|e| DataError::CsvImport(format!("{}: {e}", self.path.display())))?;

        let bars = read_daily_csv(file, request.start, request.end)?;
        if bars.is_empty() {
            return Err(request.unavailable());
        }

        Ok(FetchResult {
            symbol: request.symbol.clone(),
            bars,
            source: DataSource::CsvImport,
        })
    }
}
