//! Simple Moving Average indicator.
//!
//! SMA(n)[i] = mean(C[i-n+1..=i]). Warmup: first (n-1) bars are invalid.

use crate::domain::indicator::{IndicatorSeries, IndicatorType};
use crate::domain::ohlcv::OhlcvBar;

pub fn calculate_sma(bars: &[OhlcvBar], period: usize) -> IndicatorSeries {
    let closes: Vec<Option<f64>> = bars.iter().map(|b| Some(b.close)).collect();
    let values = sma_of(&closes, period);
    IndicatorSeries::from_options(IndicatorType::Sma(period), bars, &values)
}

/// Trailing mean over `period` entries; undefined unless every entry in the
/// window is defined.
pub(crate) fn sma_of(values: &[Option<f64>], period: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; values.len()];
    if period == 0 {
        return out;
    }

    for i in (period - 1)..values.len() {
        let window = &values[i + 1 - period..=i];
        let sum: Option<f64> = window.iter().copied().sum();
        out[i] = sum.map(|s| s / period as f64);
    }

    out
}
