//! OBV (On-Balance Volume) indicator.

use crate::domain::indicator::{IndicatorSeries, IndicatorType};
use crate::domain::ohlcv::OhlcvBar;

/// Calculate OBV (On-Balance Volume).
///
/// OBV[0] = volume[0] (baseline)
/// If close[i] > close[i-1]: OBV[i] = OBV[i-1] + volume[i]
/// If close[i] < close[i-1]: OBV[i] = OBV[i-1] - volume[i]
/// If close[i] == close[i-1]: OBV[i] = OBV[i-1]
///
/// No warmup period; all bars are valid.
pub fn calculate_obv(bars: &[OhlcvBar]) -> IndicatorSeries {
    let mut values = Vec::with_capacity(bars.len());
    let mut prev: Option<(&OhlcvBar, f64)> = None;

    for bar in bars {
        let volume = bar.volume as f64;
        let obv = match prev {
            None => volume,
            Some((p, obv)) if bar.close > p.close => obv + volume,
            Some((p, obv)) if bar.close < p.close => obv - volume,
            Some((_, obv)) => obv,
        };
        values.push(Some(obv));
        prev = Some((bar, obv));
    }

    IndicatorSeries::from_options(IndicatorType::Obv, bars, &values)
}
