//! Weighted score over met conditions.

use crate::domain::condition::ConditionSet;
use crate::domain::weights::WeightMap;

/// Sum of the weights of every met condition. Unclamped: the result may be
/// negative or exceed 1.0.
pub fn score(conditions: &ConditionSet, weights: &WeightMap) -> f64 {
    conditions.met().map(|c| weights.get(c)).sum()
}

/// True when any met condition carries a negative weight.
pub fn has_bearish_evidence(conditions: &ConditionSet, weights: &WeightMap) -> bool {
    conditions.met().any(|c| weights.get(c) < 0.0)
}
