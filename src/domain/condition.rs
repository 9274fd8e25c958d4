//! Boolean trading conditions evaluated against the latest indicator row.
//!
//! The vocabulary is closed: [`Condition`] enumerates every condition, and
//! per-condition tables ([`ConditionSet`], [`crate::domain::weights::WeightMap`])
//! are fixed-size arrays indexed by it, so no table can miss an entry.

use crate::domain::indicator_set::{IndicatorKey, IndicatorSet};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Condition {
    Sma20AboveSma50,
    RsiBelow70,
    MacdAboveSignal,
    CloseAboveBbLower,
    RsiAbove70,
    MacdBelowSignal,
    AdxAbove25,
    StochKAboveD,
    ObvIncreasing,
}

pub const RSI_OVERBOUGHT: f64 = 70.0;
pub const ADX_TRENDING: f64 = 25.0;

impl Condition {
    pub const COUNT: usize = 9;

    pub const ALL: [Condition; Self::COUNT] = [
        Condition::Sma20AboveSma50,
        Condition::RsiBelow70,
        Condition::MacdAboveSignal,
        Condition::CloseAboveBbLower,
        Condition::RsiAbove70,
        Condition::MacdBelowSignal,
        Condition::AdxAbove25,
        Condition::StochKAboveD,
        Condition::ObvIncreasing,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Condition::Sma20AboveSma50 => "SMA_20_above_SMA_50",
            Condition::RsiBelow70 => "RSI_below_70",
            Condition::MacdAboveSignal => "MACD_above_signal",
            Condition::CloseAboveBbLower => "Close_above_BB_lower",
            Condition::RsiAbove70 => "RSI_above_70",
            Condition::MacdBelowSignal => "MACD_below_signal",
            Condition::AdxAbove25 => "ADX_above_25",
            Condition::StochKAboveD => "Stoch_K_above_D",
            Condition::ObvIncreasing => "OBV_increasing",
        }
    }

    /// Weight before any regime adjustment. Negative weights are bearish.
    pub fn base_weight(self) -> f64 {
        match self {
            Condition::Sma20AboveSma50 => 0.30,
            Condition::RsiBelow70 => 0.25,
            Condition::MacdAboveSignal => 0.30,
            Condition::CloseAboveBbLower => 0.15,
            Condition::RsiAbove70 => -0.20,
            Condition::MacdBelowSignal => -0.20,
            Condition::AdxAbove25 => 0.20,
            Condition::StochKAboveD => 0.15,
            Condition::ObvIncreasing => 0.10,
        }
    }

    /// Evaluate against the latest row. Any undefined input makes the
    /// condition false.
    pub fn evaluate(self, set: &IndicatorSet) -> bool {
        let latest = |key| set.latest(key);
        let above = |left: Option<f64>, right: Option<f64>| match (left, right) {
            (Some(l), Some(r)) => l > r,
            _ => false,
        };
        let below = |left: Option<f64>, right: Option<f64>| above(right, left);

        match self {
            Condition::Sma20AboveSma50 => {
                above(latest(IndicatorKey::Sma20), latest(IndicatorKey::Sma50))
            }
            Condition::RsiBelow70 => below(latest(IndicatorKey::Rsi14), Some(RSI_OVERBOUGHT)),
            Condition::MacdAboveSignal => {
                above(latest(IndicatorKey::Macd), latest(IndicatorKey::MacdSignal))
            }
            Condition::CloseAboveBbLower => {
                above(latest(IndicatorKey::Close), latest(IndicatorKey::BbLower))
            }
            Condition::RsiAbove70 => above(latest(IndicatorKey::Rsi14), Some(RSI_OVERBOUGHT)),
            Condition::MacdBelowSignal => {
                below(latest(IndicatorKey::Macd), latest(IndicatorKey::MacdSignal))
            }
            Condition::AdxAbove25 => above(latest(IndicatorKey::Adx), Some(ADX_TRENDING)),
            Condition::StochKAboveD => {
                above(latest(IndicatorKey::StochK), latest(IndicatorKey::StochD))
            }
            Condition::ObvIncreasing => above(
                latest(IndicatorKey::Obv),
                set.value_from_end(IndicatorKey::Obv, 1),
            ),
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("unknown condition '{0}'")]
pub struct UnknownCondition(pub String);

impl FromStr for Condition {
    type Err = UnknownCondition;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Condition::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownCondition(trimmed.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Explanation {
    Met,
    NotMet,
}

impl fmt::Display for Explanation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Explanation::Met => f.write_str("Met"),
            Explanation::NotMet => f.write_str("Not Met"),
        }
    }
}

/// Outcome of every condition for one evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ConditionSet {
    met: [bool; Condition::COUNT],
}

impl ConditionSet {
    pub fn evaluate(set: &IndicatorSet) -> Self {
        Self {
            met: Condition::ALL.map(|c| c.evaluate(set)),
        }
    }

    pub fn from_fn<F: FnMut(Condition) -> bool>(f: F) -> Self {
        Self {
            met: Condition::ALL.map(f),
        }
    }

    pub fn is_met(&self, condition: Condition) -> bool {
        self.met[condition as usize]
    }

    pub fn explanation(&self, condition: Condition) -> Explanation {
        if self.is_met(condition) {
            Explanation::Met
        } else {
            Explanation::NotMet
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Condition, bool)> + '_ {
        Condition::ALL.iter().map(|&c| (c, self.is_met(c)))
    }

    pub fn met(&self) -> impl Iterator<Item = Condition> + '_ {
        self.iter().filter(|(_, met)| *met).map(|(c, _)| c)
    }

    pub fn explanations(&self) -> impl Iterator<Item = (Condition, Explanation)> + '_ {
        Condition::ALL.iter().map(|&c| (c, self.explanation(c)))
    }
}
