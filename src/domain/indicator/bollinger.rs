//! Bollinger Bands indicator.
//!
//! - Middle: SMA(close, n)
//! - Upper: Middle + (multiplier × StdDev)
//! - Lower: Middle - (multiplier × StdDev)
//!
//! StdDev is the population standard deviation (divides by N, not N-1).
//! Default parameters: period=20, multiplier=2.0.
//! Warmup: first (period-1) bars are invalid.

use crate::domain::indicator::{IndicatorPoint, IndicatorSeries, IndicatorType, IndicatorValue};
use crate::domain::ohlcv::OhlcvBar;

pub const DEFAULT_PERIOD: usize = 20;
pub const DEFAULT_MULT_X100: u32 = 200;

pub fn calculate_bollinger(
    bars: &[OhlcvBar],
    period: usize,
    stddev_mult_x100: u32,
) -> IndicatorSeries {
    let mult = stddev_mult_x100 as f64 / 100.0;
    let invalid = IndicatorValue::Bollinger {
        upper: 0.0,
        middle: 0.0,
        lower: 0.0,
    };

    let mut values: Vec<IndicatorPoint> = bars
        .iter()
        .map(|b| IndicatorPoint {
            date: b.date,
            valid: false,
            value: invalid.clone(),
        })
        .collect();

    if period > 0 {
        for (end, window) in bars.windows(period).enumerate().map(|(i, w)| (i + period - 1, w)) {
            let middle = window.iter().map(|b| b.close).sum::<f64>() / period as f64;
            let variance = window
                .iter()
                .map(|b| {
                    let diff = b.close - middle;
                    diff * diff
                })
                .sum::<f64>()
                / period as f64;
            let stddev = variance.sqrt();

            values[end].valid = true;
            values[end].value = IndicatorValue::Bollinger {
                upper: middle + mult * stddev,
                middle,
                lower: middle - mult * stddev,
            };
        }
    }

    IndicatorSeries {
        indicator_type: IndicatorType::Bollinger {
            period,
            stddev_mult_x100,
        },
        values,
    }
}

pub fn upper(value: &IndicatorValue) -> Option<f64> {
    match value {
        IndicatorValue::Bollinger { upper, .. } => Some(*upper),
        _ => None,
    }
}

pub fn lower(value: &IndicatorValue) -> Option<f64> {
    match value {
        IndicatorValue::Bollinger { lower, .. } => Some(*lower),
        _ => None,
    }
}
