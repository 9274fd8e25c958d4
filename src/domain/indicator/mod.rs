//! Technical indicator implementations.
//!
//! Every calculator returns an [`IndicatorSeries`] aligned with its input bars:
//! one [`IndicatorPoint`] per bar, with `valid == false` while the indicator's
//! lookback window is not yet filled. Composite values (MACD, Stochastic) mark a
//! point valid once their primary line is defined; a secondary line that needs
//! a longer warmup holds `f64::NAN` until it is defined.

pub mod adx;
pub mod atr;
pub mod bollinger;
pub mod ema;
pub mod macd;
pub mod obv;
pub mod rsi;
pub mod sma;
pub mod stochastic;

pub use adx::calculate_adx;
pub use atr::calculate_atr;
pub use bollinger::calculate_bollinger;
pub use macd::calculate_macd;
pub use obv::calculate_obv;
pub use rsi::calculate_rsi;
pub use sma::calculate_sma;
pub use stochastic::calculate_stochastic;

use crate::domain::ohlcv::OhlcvBar;
use chrono::NaiveDate;
use std::fmt;

#[derive(Debug, Clone)]
pub struct IndicatorPoint {
    pub date: NaiveDate,
    pub valid: bool,
    pub value: IndicatorValue,
}

#[derive(Debug, Clone)]
pub enum IndicatorValue {
    Simple(f64),
    Macd {
        line: f64,
        signal: f64,
        histogram: f64,
    },
    Stochastic {
        k: f64,
        d: f64,
    },
    Bollinger {
        upper: f64,
        middle: f64,
        lower: f64,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IndicatorType {
    Sma(usize),
    Rsi(usize),
    Atr(usize),
    Adx(usize),
    Obv,
    Macd {
        fast: usize,
        slow: usize,
        signal: usize,
    },
    Stochastic {
        k_period: usize,
        d_period: usize,
    },
    Bollinger {
        period: usize,
        stddev_mult_x100: u32,
    },
}

#[derive(Debug, Clone)]
pub struct IndicatorSeries {
    pub indicator_type: IndicatorType,
    pub values: Vec<IndicatorPoint>,
}

impl IndicatorSeries {
    /// Build a single-valued series from per-bar optional values.
    pub(crate) fn from_options(
        indicator_type: IndicatorType,
        bars: &[OhlcvBar],
        values: &[Option<f64>],
    ) -> Self {
        let values = bars
            .iter()
            .zip(values)
            .map(|(bar, value)| IndicatorPoint {
                date: bar.date,
                valid: value.is_some(),
                value: IndicatorValue::Simple(value.unwrap_or(0.0)),
            })
            .collect();

        Self {
            indicator_type,
            values,
        }
    }

    /// Project one field out of every point; `None` where the point is invalid
    /// or the field is not finite.
    pub fn field<F>(&self, extract: F) -> Vec<Option<f64>>
    where
        F: Fn(&IndicatorValue) -> Option<f64>,
    {
        self.values
            .iter()
            .map(|p| {
                if !p.valid {
                    return None;
                }
                extract(&p.value).filter(|v| v.is_finite())
            })
            .collect()
    }

    /// Values of a single-valued series.
    pub fn simple(&self) -> Vec<Option<f64>> {
        self.field(|v| match v {
            IndicatorValue::Simple(x) => Some(*x),
            _ => None,
        })
    }
}

impl fmt::Display for IndicatorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndicatorType::Sma(period) => write!(f, "SMA({})", period),
            IndicatorType::Rsi(period) => write!(f, "RSI({})", period),
            IndicatorType::Atr(period) => write!(f, "ATR({})", period),
            IndicatorType::Adx(period) => write!(f, "ADX({})", period),
            IndicatorType::Obv => write!(f, "OBV"),
            IndicatorType::Macd { fast, slow, signal } => {
                write!(f, "MACD({},{},{})", fast, slow, signal)
            }
            IndicatorType::Stochastic { k_period, d_period } => {
                write!(f, "STOCHASTIC({},{})", k_period, d_period)
            }
            IndicatorType::Bollinger {
                period,
                stddev_mult_x100,
            } => {
                let mult = *stddev_mult_x100 as f64 / 100.0;
                write!(f, "BOLLINGER({},{})", period, mult)
            }
        }
    }
}
