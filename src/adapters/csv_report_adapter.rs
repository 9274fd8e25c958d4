//! Consolidated CSV report adapter.
//!
//! One row per instrument: static info, the latest indicator values, score,
//! signal, regime, a `Met`/`Not Met` column per condition and the
//! high-volatility flag.

use crate::domain::condition::Condition;
use crate::domain::error::StockscoreError;
use crate::domain::evaluation::ScoreResult;
use crate::domain::indicator_set::IndicatorKey;
use crate::ports::report_port::ReportPort;

pub const HIGH_VOLATILITY_COLUMN: &str = "High Volatility Don't Buy";

pub struct CsvReportAdapter;

impl CsvReportAdapter {
    pub fn header() -> Vec<String> {
        let mut header: Vec<String> = ["Symbol", "Name", "Sector", "Price", "PE Ratio", "Dividend Yield"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        header.extend(
            IndicatorKey::ALL
                .iter()
                .filter(|k| **k != IndicatorKey::Close)
                .map(|k| k.name().to_string()),
        );
        header.extend(["Score", "Signal", "Regime"].iter().map(|s| s.to_string()));
        header.extend(Condition::ALL.iter().map(|c| c.name().to_string()));
        header.push(HIGH_VOLATILITY_COLUMN.to_string());
        header
    }

    pub fn row(result: &ScoreResult) -> Vec<String> {
        let mut row = vec![
            result.symbol.clone(),
            result.info.name.clone(),
            result.info.sector.clone().unwrap_or_default(),
            format_opt(result.price()),
            format_opt(result.info.pe_ratio),
            format_opt(result.info.dividend_yield),
        ];
        row.extend(
            result
                .snapshot
                .iter()
                .filter(|(k, _)| *k != IndicatorKey::Close)
                .map(|(_, v)| format_opt(v)),
        );
        row.push(format!("{:.4}", result.score));
        row.push(result.signal.to_string());
        row.push(result.regime.to_string());
        row.extend(
            Condition::ALL
                .iter()
                .map(|&c| result.explanation(c).to_string()),
        );
        row.push(if result.high_volatility_dont_buy() { "Yes" } else { "No" }.to_string());
        row
    }
}

fn format_opt(value: Option<f64>) -> String {
    value.map(|v| format!("{:.4}", v)).unwrap_or_default()
}

fn report_error(e: impl std::fmt::Display) -> StockscoreError {
    StockscoreError::Report {
        reason: e.to_string(),
    }
}

impl ReportPort for CsvReportAdapter {
    fn write(&self, results: &[ScoreResult], output_path: &str) -> Result<(), StockscoreError> {
        let mut writer = csv::Writer::from_path(output_path)
            .map_err(|e| report_error(format!("failed to create {}: {}", output_path, e)))?;

        writer.write_record(Self::header()).map_err(report_error)?;
        for result in results {
            writer.write_record(Self::row(result)).map_err(report_error)?;
        }
        writer.flush()?;

        tracing::info!(path = output_path, rows = results.len(), "report written");
        Ok(())
    }
}
