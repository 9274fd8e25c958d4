//! Stochastic Oscillator (%K / %D).
//!
//! %K[i] = (C[i] - LL) / (HH - LL) * 100 over the trailing k_period bars,
//! where HH/LL are the highest high and lowest low of the window.
//! %D = SMA(%K, d_period).
//!
//! %K is undefined when HH == LL (no range to measure against); %D is NaN
//! until d_period consecutive %K values are defined.

use crate::domain::indicator::sma::sma_of;
use crate::domain::indicator::{IndicatorPoint, IndicatorSeries, IndicatorType, IndicatorValue};
use crate::domain::ohlcv::OhlcvBar;

pub const DEFAULT_K_PERIOD: usize = 14;
pub const DEFAULT_D_PERIOD: usize = 3;

pub fn calculate_stochastic(
    bars: &[OhlcvBar],
    k_period: usize,
    d_period: usize,
) -> IndicatorSeries {
    let mut k_values: Vec<Option<f64>> = vec![None; bars.len()];

    if k_period > 0 {
        for (i, window) in bars.windows(k_period).enumerate() {
            let highest = window.iter().map(|b| b.high).fold(f64::MIN, f64::max);
            let lowest = window.iter().map(|b| b.low).fold(f64::MAX, f64::min);
            let range = highest - lowest;
            if range > 0.0 {
                let close = window[k_period - 1].close;
                k_values[i + k_period - 1] = Some((close - lowest) / range * 100.0);
            }
        }
    }

    let d_values = sma_of(&k_values, d_period);

    let values = bars
        .iter()
        .zip(k_values.iter().zip(&d_values))
        .map(|(bar, (k, d))| IndicatorPoint {
            date: bar.date,
            valid: k.is_some(),
            value: IndicatorValue::Stochastic {
                k: k.unwrap_or(0.0),
                d: d.unwrap_or(f64::NAN),
            },
        })
        .collect();

    IndicatorSeries {
        indicator_type: IndicatorType::Stochastic { k_period, d_period },
        values,
    }
}

pub fn k(value: &IndicatorValue) -> Option<f64> {
    match value {
        IndicatorValue::Stochastic { k, .. } => Some(*k),
        _ => None,
    }
}

pub fn d(value: &IndicatorValue) -> Option<f64> {
    match value {
        IndicatorValue::Stochastic { d, .. } => Some(*d),
        _ => None,
    }
}
