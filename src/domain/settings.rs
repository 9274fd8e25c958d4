//! Scoring configuration: thresholds, regime adjustments and base weights.

use crate::domain::signal::{ThresholdAdjustment, Thresholds};
use crate::domain::volatility::{DEFAULT_ATR_MULTIPLIER, VolatilityRegime};
use crate::domain::weights::{WeightAdjustment, WeightMap};

/// Everything the evaluator needs besides the bars themselves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringConfig {
    pub thresholds: Thresholds,
    pub atr_multiplier: f64,
    pub weight_adjustment: WeightAdjustment,
    pub threshold_adjustment: ThresholdAdjustment,
    pub base_weights: WeightMap,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            thresholds: Thresholds::default(),
            atr_multiplier: DEFAULT_ATR_MULTIPLIER,
            weight_adjustment: WeightAdjustment::default(),
            threshold_adjustment: ThresholdAdjustment::default(),
            base_weights: WeightMap::base(),
        }
    }
}

impl ScoringConfig {
    pub fn weights_for(&self, regime: VolatilityRegime) -> WeightMap {
        self.base_weights.adjusted(regime, &self.weight_adjustment)
    }

    pub fn thresholds_for(&self, regime: VolatilityRegime) -> Thresholds {
        self.thresholds.for_regime(regime, &self.threshold_adjustment)
    }
}
