//! Condition weights and their volatility-regime adjustment.

use crate::domain::condition::Condition;
use crate::domain::volatility::VolatilityRegime;

pub const DEFAULT_WEIGHT_BOOST: f64 = 1.2;
pub const DEFAULT_WEIGHT_DAMPING: f64 = 0.8;

/// One signed weight per condition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightMap {
    weights: [f64; Condition::COUNT],
}

impl WeightMap {
    /// The constant base weights.
    pub fn base() -> Self {
        Self {
            weights: Condition::ALL.map(Condition::base_weight),
        }
    }

    pub fn get(&self, condition: Condition) -> f64 {
        self.weights[condition as usize]
    }

    /// Copy with one weight replaced.
    pub fn with(mut self, condition: Condition, weight: f64) -> Self {
        self.weights[condition as usize] = weight;
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (Condition, f64)> + '_ {
        Condition::ALL.iter().map(|&c| (c, self.get(c)))
    }

    /// Weights for `regime`; `self` is left untouched.
    pub fn adjusted(&self, regime: VolatilityRegime, adjustment: &WeightAdjustment) -> Self {
        match regime {
            VolatilityRegime::Normal => *self,
            VolatilityRegime::High => Self {
                weights: Condition::ALL.map(|c| self.get(c) * adjustment.multiplier(c)),
            },
        }
    }
}

impl Default for WeightMap {
    fn default() -> Self {
        Self::base()
    }
}

/// Multipliers applied under the High regime: momentum and downside-MACD
/// conditions are boosted, the lower-band condition is damped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightAdjustment {
    pub boost: f64,
    pub damping: f64,
}

impl WeightAdjustment {
    pub fn multiplier(&self, condition: Condition) -> f64 {
        match condition {
            Condition::RsiBelow70 | Condition::RsiAbove70 | Condition::MacdBelowSignal => {
                self.boost
            }
            Condition::CloseAboveBbLower => self.damping,
            _ => 1.0,
        }
    }
}

impl Default for WeightAdjustment {
    fn default() -> Self {
        Self {
            boost: DEFAULT_WEIGHT_BOOST,
            damping: DEFAULT_WEIGHT_DAMPING,
        }
    }
}
