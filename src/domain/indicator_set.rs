//! The fixed indicator battery computed for one instrument.
//!
//! [`IndicatorSet`] holds one column per [`IndicatorKey`], each aligned with
//! the input bars. `None` marks an undefined value (lookback not yet filled),
//! which is distinct from zero.

use crate::domain::indicator::{
    adx, atr, bollinger, calculate_adx, calculate_atr, calculate_bollinger, calculate_macd,
    calculate_obv, calculate_rsi, calculate_sma, calculate_stochastic, macd, rsi, stochastic,
};
use crate::domain::ohlcv::OhlcvBar;
use chrono::NaiveDate;
use std::fmt;

pub const SMA_FAST_PERIOD: usize = 20;
pub const SMA_SLOW_PERIOD: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum IndicatorKey {
    Close,
    Sma20,
    Sma50,
    Rsi14,
    Macd,
    MacdSignal,
    BbUpper,
    BbLower,
    Atr,
    Adx,
    StochK,
    StochD,
    Obv,
}

impl IndicatorKey {
    pub const COUNT: usize = 13;

    pub const ALL: [IndicatorKey; Self::COUNT] = [
        IndicatorKey::Close,
        IndicatorKey::Sma20,
        IndicatorKey::Sma50,
        IndicatorKey::Rsi14,
        IndicatorKey::Macd,
        IndicatorKey::MacdSignal,
        IndicatorKey::BbUpper,
        IndicatorKey::BbLower,
        IndicatorKey::Atr,
        IndicatorKey::Adx,
        IndicatorKey::StochK,
        IndicatorKey::StochD,
        IndicatorKey::Obv,
    ];

    pub fn name(self) -> &'static str {
        match self {
            IndicatorKey::Close => "CLOSE",
            IndicatorKey::Sma20 => "SMA_20",
            IndicatorKey::Sma50 => "SMA_50",
            IndicatorKey::Rsi14 => "RSI_14",
            IndicatorKey::Macd => "MACD",
            IndicatorKey::MacdSignal => "MACD_SIGNAL",
            IndicatorKey::BbUpper => "BB_UPPER",
            IndicatorKey::BbLower => "BB_LOWER",
            IndicatorKey::Atr => "ATR",
            IndicatorKey::Adx => "ADX",
            IndicatorKey::StochK => "STOCH_K",
            IndicatorKey::StochD => "STOCH_D",
            IndicatorKey::Obv => "OBV",
        }
    }
}

impl fmt::Display for IndicatorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorSet {
    dates: Vec<NaiveDate>,
    columns: [Vec<Option<f64>>; IndicatorKey::COUNT],
}

impl IndicatorSet {
    /// Compute every indicator in the battery. Never fails: indicators whose
    /// window exceeds the series are left undefined.
    pub fn compute(bars: &[OhlcvBar]) -> Self {
        let macd_series = calculate_macd(
            bars,
            macd::DEFAULT_FAST,
            macd::DEFAULT_SLOW,
            macd::DEFAULT_SIGNAL,
        );
        let bands = calculate_bollinger(
            bars,
            bollinger::DEFAULT_PERIOD,
            bollinger::DEFAULT_MULT_X100,
        );
        let stoch = calculate_stochastic(
            bars,
            stochastic::DEFAULT_K_PERIOD,
            stochastic::DEFAULT_D_PERIOD,
        );

        let columns = IndicatorKey::ALL.map(|key| match key {
            IndicatorKey::Close => bars.iter().map(|b| Some(b.close)).collect(),
            IndicatorKey::Sma20 => calculate_sma(bars, SMA_FAST_PERIOD).simple(),
            IndicatorKey::Sma50 => calculate_sma(bars, SMA_SLOW_PERIOD).simple(),
            IndicatorKey::Rsi14 => calculate_rsi(bars, rsi::DEFAULT_PERIOD).simple(),
            IndicatorKey::Macd => macd_series.field(macd::line),
            IndicatorKey::MacdSignal => macd_series.field(macd::signal),
            IndicatorKey::BbUpper => bands.field(bollinger::upper),
            IndicatorKey::BbLower => bands.field(bollinger::lower),
            IndicatorKey::Atr => calculate_atr(bars, atr::DEFAULT_PERIOD).simple(),
            IndicatorKey::Adx => calculate_adx(bars, adx::DEFAULT_PERIOD).simple(),
            IndicatorKey::StochK => stoch.field(stochastic::k),
            IndicatorKey::StochD => stoch.field(stochastic::d),
            IndicatorKey::Obv => calculate_obv(bars).simple(),
        });

        Self {
            dates: bars.iter().map(|b| b.date).collect(),
            columns,
        }
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn column(&self, key: IndicatorKey) -> &[Option<f64>] {
        &self.columns[key as usize]
    }

    /// Value `back` rows before the latest (0 = latest).
    pub fn value_from_end(&self, key: IndicatorKey, back: usize) -> Option<f64> {
        let column = self.column(key);
        let index = column.len().checked_sub(back + 1)?;
        column[index]
    }

    pub fn latest(&self, key: IndicatorKey) -> Option<f64> {
        self.value_from_end(key, 0)
    }

    /// Latest value of every column.
    pub fn snapshot(&self) -> IndicatorSnapshot {
        IndicatorSnapshot {
            date: self.dates.last().copied(),
            values: IndicatorKey::ALL.map(|key| self.latest(key)),
        }
    }
}

/// The latest row of an [`IndicatorSet`].
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorSnapshot {
    pub date: Option<NaiveDate>,
    values: [Option<f64>; IndicatorKey::COUNT],
}

impl IndicatorSnapshot {
    pub fn get(&self, key: IndicatorKey) -> Option<f64> {
        self.values[key as usize]
    }

    pub fn iter(&self) -> impl Iterator<Item = (IndicatorKey, Option<f64>)> + '_ {
        IndicatorKey::ALL.iter().map(|&key| (key, self.get(key)))
    }
}
