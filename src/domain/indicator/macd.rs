//! MACD (Moving Average Convergence Divergence) indicator.
//!
//! MACD Line = EMA(fast) - EMA(slow)
//! Signal Line = EMA(signal) of MACD Line
//! Histogram = MACD Line - Signal Line
//!
//! Default parameters: fast=12, slow=26, signal=9
//! The line is valid from bar `max(fast, slow) - 1`; the signal and histogram
//! stay NaN for a further `signal - 1` bars.

use crate::domain::indicator::ema::ema_of;
use crate::domain::indicator::{IndicatorPoint, IndicatorSeries, IndicatorType, IndicatorValue};
use crate::domain::ohlcv::OhlcvBar;

pub const DEFAULT_FAST: usize = 12;
pub const DEFAULT_SLOW: usize = 26;
pub const DEFAULT_SIGNAL: usize = 9;

pub fn calculate_macd(
    bars: &[OhlcvBar],
    fast: usize,
    slow: usize,
    signal_period: usize,
) -> IndicatorSeries {
    let indicator_type = IndicatorType::Macd {
        fast,
        slow,
        signal: signal_period,
    };

    let closes: Vec<Option<f64>> = bars.iter().map(|b| Some(b.close)).collect();
    let ema_fast = ema_of(&closes, fast);
    let ema_slow = ema_of(&closes, slow);

    let macd_line: Vec<Option<f64>> = ema_fast
        .iter()
        .zip(&ema_slow)
        .map(|(f, s)| Some((*f)? - (*s)?))
        .collect();
    let signal_line = ema_of(&macd_line, signal_period);

    let values = bars
        .iter()
        .zip(macd_line.iter().zip(&signal_line))
        .map(|(bar, (line, signal))| {
            let line_value = line.unwrap_or(0.0);
            let signal_value = signal.unwrap_or(f64::NAN);
            IndicatorPoint {
                date: bar.date,
                valid: line.is_some(),
                value: IndicatorValue::Macd {
                    line: line_value,
                    signal: signal_value,
                    histogram: line_value - signal_value,
                },
            }
        })
        .collect();

    IndicatorSeries {
        indicator_type,
        values,
    }
}

pub fn line(value: &IndicatorValue) -> Option<f64> {
    match value {
        IndicatorValue::Macd { line, .. } => Some(*line),
        _ => None,
    }
}

pub fn signal(value: &IndicatorValue) -> Option<f64> {
    match value {
        IndicatorValue::Macd { signal, .. } => Some(*signal),
        _ => None,
    }
}
