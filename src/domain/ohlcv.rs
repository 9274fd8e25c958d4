//! OHLCV bar representation and series validation.

use crate::domain::error::EvaluationError;
use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq)]
pub struct OhlcvBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: i64,
}

impl OhlcvBar {
    /// max(high - low, |high - prev_close|, |low - prev_close|)
    pub fn true_range(&self, prev_close: f64) -> f64 {
        let hl = self.high - self.low;
        let hc = (self.high - prev_close).abs();
        let lc = (self.low - prev_close).abs();
        hl.max(hc).max(lc)
    }
}

/// Check the series invariant: at least one bar, strictly increasing dates,
/// finite prices with `high >= low`, and non-negative volume.
pub fn validate_series(bars: &[OhlcvBar]) -> Result<(), EvaluationError> {
    if bars.is_empty() {
        return Err(EvaluationError::EmptySeries);
    }

    for (i, bar) in bars.iter().enumerate() {
        let prices = [bar.open, bar.high, bar.low, bar.close];
        if prices.iter().any(|p| !p.is_finite()) {
            return Err(malformed(i, "non-finite price"));
        }
        if bar.high < bar.low {
            return Err(malformed(i, "high below low"));
        }
        if bar.volume < 0 {
            return Err(malformed(i, "negative volume"));
        }
        if i > 0 && bar.date <= bars[i - 1].date {
            return Err(malformed(i, "dates not strictly increasing"));
        }
    }

    Ok(())
}

fn malformed(index: usize, reason: &str) -> EvaluationError {
    EvaluationError::MalformedSeries {
        index,
        reason: reason.to_string(),
    }
}
