#![allow(dead_code)]

use chrono::NaiveDate;
use std::collections::HashMap;
use stockscore::domain::error::StockscoreError;
use stockscore::domain::evaluation::StaticInfo;
pub use stockscore::domain::ohlcv::OhlcvBar;
use stockscore::domain::period::Period;
use stockscore::ports::data_port::DataPort;

pub struct MockDataPort {
    pub data: HashMap<String, Vec<OhlcvBar>>,
    pub info: HashMap<String, StaticInfo>,
    pub errors: HashMap<String, String>,
}

impl MockDataPort {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            info: HashMap::new(),
            errors: HashMap::new(),
        }
    }

    pub fn with_bars(mut self, symbol: &str, bars: Vec<OhlcvBar>) -> Self {
        self.data.insert(symbol.to_string(), bars);
        self
    }

    pub fn with_info(mut self, symbol: &str, info: StaticInfo) -> Self {
        self.info.insert(symbol.to_string(), info);
        self
    }

    pub fn with_error(mut self, symbol: &str, reason: &str) -> Self {
        self.errors.insert(symbol.to_string(), reason.to_string());
        self
    }
}

impl DataPort for MockDataPort {
    fn fetch_history(
        &self,
        symbol: &str,
        _period: Period,
    ) -> Result<Vec<OhlcvBar>, StockscoreError> {
        if let Some(reason) = self.errors.get(symbol) {
            return Err(StockscoreError::DataSource {
                reason: reason.clone(),
            });
        }
        self.data
            .get(symbol)
            .cloned()
            .ok_or_else(|| StockscoreError::NoData {
                symbol: symbol.to_string(),
            })
    }

    fn fetch_info(&self, symbol: &str) -> Result<StaticInfo, StockscoreError> {
        Ok(self
            .info
            .get(symbol)
            .cloned()
            .unwrap_or_else(|| StaticInfo::named(symbol)))
    }

    fn list_symbols(&self) -> Result<Vec<String>, StockscoreError> {
        let mut symbols: Vec<String> = self.data.keys().cloned().collect();
        symbols.sort();
        Ok(symbols)
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// One bar per day from 2024-01-01 with explicit (high, low, close, volume).
pub fn bars_from(rows: &[(f64, f64, f64, i64)]) -> Vec<OhlcvBar> {
    let start = date(2024, 1, 1);
    rows.iter()
        .enumerate()
        .map(|(i, &(high, low, close, volume))| OhlcvBar {
            date: start + chrono::Duration::days(i as i64),
            open: close,
            high,
            low,
            close,
            volume,
        })
        .collect()
}

/// `count` identical bars at `price`.
pub fn flat_bars(count: usize, price: f64) -> Vec<OhlcvBar> {
    bars_from(&vec![(price, price, price, 1000); count])
}

/// Closes compounding 1% per bar with a 1% high/low envelope and rising
/// volume.
pub fn rising_bars(count: usize) -> Vec<OhlcvBar> {
    let rows: Vec<(f64, f64, f64, i64)> = (0..count)
        .map(|i| {
            let close = 100.0 * 1.01_f64.powi(i as i32);
            (close * 1.01, close * 0.99, close, 1000 + 10 * i as i64)
        })
        .collect();
    bars_from(&rows)
}

/// Closes rising one point per bar from 100 with a one-point envelope and
/// rising volume.
pub fn linear_rising_bars(count: usize) -> Vec<OhlcvBar> {
    let rows: Vec<(f64, f64, f64, i64)> = (0..count)
        .map(|i| {
            let close = 100.0 + i as f64;
            (close + 1.0, close - 1.0, close, 1000 + 10 * i as i64)
        })
        .collect();
    bars_from(&rows)
}

/// Closes falling one point per bar from 200.
pub fn falling_bars(count: usize) -> Vec<OhlcvBar> {
    let rows: Vec<(f64, f64, f64, i64)> = (0..count)
        .map(|i| {
            let close = 200.0 - i as f64;
            (close + 1.0, close - 1.0, close, 1000)
        })
        .collect();
    bars_from(&rows)
}

/// Quiet series whose final bar has a range far wider than anything before.
pub fn spike_bars(count: usize) -> Vec<OhlcvBar> {
    let mut rows: Vec<(f64, f64, f64, i64)> = (0..count)
        .map(|i| {
            let close = 100.0 + if i % 2 == 0 { 0.5 } else { -0.5 };
            (close + 0.5, close - 0.5, close, 1000)
        })
        .collect();
    if let Some(last) = rows.last_mut() {
        *last = (130.0, 80.0, 100.0, 1000);
    }
    bars_from(&rows)
}

/// `<symbol>.csv` contents for the given bars.
pub fn bars_to_csv(bars: &[OhlcvBar]) -> String {
    let mut out = String::from("date,open,high,low,close,volume\n");
    for b in bars {
        out.push_str(&format!(
            "{},{},{},{},{},{}\n",
            b.date.format("%Y-%m-%d"),
            b.open,
            b.high,
            b.low,
            b.close,
            b.volume
        ));
    }
    out
}
