//! CSV file data adapter.
//!
//! One `<SYMBOL>.csv` per instrument (`date,open,high,low,close,volume`) plus
//! an optional `symbols.csv` holding static metadata. File names match symbols
//! case-insensitively; listed symbols are uppercase.

use crate::domain::error::StockscoreError;
use crate::domain::evaluation::StaticInfo;
use crate::domain::ohlcv::OhlcvBar;
use crate::domain::period::Period;
use crate::ports::data_port::DataPort;
use chrono::NaiveDate;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const SYMBOLS_FILE: &str = "symbols.csv";

pub struct CsvAdapter {
    base_path: PathBuf,
}

#[derive(Debug, Deserialize)]
struct BarRecord {
    date: String,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volume: i64,
}

#[derive(Debug, Deserialize)]
struct InfoRecord {
    symbol: String,
    name: Option<String>,
    sector: Option<String>,
    price: Option<f64>,
    pe_ratio: Option<f64>,
    dividend_yield: Option<f64>,
}

impl CsvAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    /// The data file for `symbol`, trying the exact name before scanning the
    /// directory for a case-insensitive match.
    fn csv_path(&self, symbol: &str) -> Option<PathBuf> {
        let exact = self.base_path.join(format!("{}.csv", symbol));
        if exact.is_file() {
            return Some(exact);
        }

        fs::read_dir(&self.base_path)
            .ok()?
            .flatten()
            .map(|entry| entry.path())
            .find(|path| {
                path.is_file()
                    && csv_stem(path).is_some_and(|stem| stem.eq_ignore_ascii_case(symbol))
            })
    }
}

/// File stem of a `.csv` path (extension matched case-insensitively).
fn csv_stem(path: &Path) -> Option<&str> {
    let extension = path.extension()?.to_str()?;
    if !extension.eq_ignore_ascii_case("csv") {
        return None;
    }
    path.file_stem()?.to_str()
}

fn data_error(reason: String) -> StockscoreError {
    StockscoreError::DataSource { reason }
}

impl DataPort for CsvAdapter {
    fn fetch_history(
        &self,
        symbol: &str,
        period: Period,
    ) -> Result<Vec<OhlcvBar>, StockscoreError> {
        let Some(path) = self.csv_path(symbol) else {
            return Err(StockscoreError::NoData {
                symbol: symbol.to_string(),
            });
        };

        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(&path)
            .map_err(|e| data_error(format!("failed to read {}: {}", path.display(), e)))?;

        let mut bars = Vec::new();
        for (line, result) in rdr.deserialize::<BarRecord>().enumerate() {
            let record = result.map_err(|e| {
                data_error(format!("{}: CSV parse error: {}", path.display(), e))
            })?;
            let date = NaiveDate::parse_from_str(&record.date, "%Y-%m-%d").map_err(|e| {
                data_error(format!(
                    "{}: invalid date '{}' on row {}: {}",
                    path.display(),
                    record.date,
                    line + 1,
                    e
                ))
            })?;

            bars.push(OhlcvBar {
                date,
                open: record.open,
                high: record.high,
                low: record.low,
                close: record.close,
                volume: record.volume,
            });
        }

        bars.sort_by_key(|b| b.date);

        if let Some(latest) = bars.last().map(|b| b.date) {
            let start = period.start_date(latest);
            bars.retain(|b| b.date >= start);
        }

        Ok(bars)
    }

    fn fetch_info(&self, symbol: &str) -> Result<StaticInfo, StockscoreError> {
        let path = self.base_path.join(SYMBOLS_FILE);
        if !path.is_file() {
            return Ok(StaticInfo::named(symbol));
        }

        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(&path)
            .map_err(|e| data_error(format!("failed to read {}: {}", path.display(), e)))?;

        for result in rdr.deserialize::<InfoRecord>() {
            let record = result.map_err(|e| {
                data_error(format!("{}: CSV parse error: {}", path.display(), e))
            })?;
            if record.symbol.eq_ignore_ascii_case(symbol) {
                return Ok(StaticInfo {
                    name: record.name.unwrap_or_else(|| symbol.to_string()),
                    sector: record.sector,
                    price: record.price,
                    pe_ratio: record.pe_ratio,
                    dividend_yield: record.dividend_yield,
                });
            }
        }

        Ok(StaticInfo::named(symbol))
    }

    fn list_symbols(&self) -> Result<Vec<String>, StockscoreError> {
        let entries = fs::read_dir(&self.base_path).map_err(|e| {
            data_error(format!(
                "failed to read directory {}: {}",
                self.base_path.display(),
                e
            ))
        })?;

        let mut symbols = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| data_error(format!("directory entry error: {}", e)))?;
            let path = entry.path();

            let is_metadata = path
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.eq_ignore_ascii_case(SYMBOLS_FILE));
            if is_metadata {
                continue;
            }
            if let Some(stem) = csv_stem(&path) {
                symbols.push(stem.to_ascii_uppercase());
            }
        }

        symbols.sort();
        symbols.dedup();
        Ok(symbols)
    }
}
