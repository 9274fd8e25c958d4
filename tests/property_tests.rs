//! Property tests for scoring invariants.
//!
//! Uses proptest to verify:
//! 1. Weight round-trip: undoing the High adjustment restores the base map,
//!    and a configured weight is the weight used
//! 2. Monotonicity: raising a met condition's weight never lowers the score
//! 3. Finite score for any well-formed series
//! 4. Threshold ordering survives the High-regime adjustment
//! 5. Determinism: the same input always yields the same result

mod common;

use common::*;
use proptest::prelude::*;
use stockscore::adapters::file_config_adapter::FileConfigAdapter;
use stockscore::domain::condition::{Condition, ConditionSet};
use stockscore::domain::config_validation::load_scoring_config;
use stockscore::domain::evaluation::{StaticInfo, evaluate};
use stockscore::domain::indicator_set::IndicatorKey;
use stockscore::domain::scoring::score;
use stockscore::domain::settings::ScoringConfig;
use stockscore::domain::signal::{ThresholdAdjustment, Thresholds};
use stockscore::domain::volatility::VolatilityRegime;
use stockscore::domain::weights::{WeightAdjustment, WeightMap};

// ── Strategies (proptest) ────────────────────────────────────────────

fn arb_condition() -> impl Strategy<Value = Condition> {
    (0..Condition::COUNT).prop_map(|i| Condition::ALL[i])
}

fn arb_weight() -> impl Strategy<Value = f64> {
    -2.0..2.0_f64
}

fn arb_condition_set() -> impl Strategy<Value = ConditionSet> {
    prop::array::uniform9(any::<bool>()).prop_map(|met| ConditionSet::from_fn(|c| met[c as usize]))
}

fn arb_weight_map() -> impl Strategy<Value = WeightMap> {
    prop::array::uniform9(arb_weight()).prop_map(|ws| {
        Condition::ALL
            .into_iter()
            .fold(WeightMap::base(), |map, c| map.with(c, ws[c as usize]))
    })
}

/// Well-formed bars: positive closes, `high >= close >= low`, one per day.
fn arb_bars(min: usize, max: usize) -> impl Strategy<Value = Vec<OhlcvBar>> {
    prop::collection::vec((1.0..500.0_f64, 0.0..0.05_f64, 0.0..0.05_f64, 0..1_000_000_i64), min..max)
        .prop_map(|rows| {
            let rows: Vec<(f64, f64, f64, i64)> = rows
                .into_iter()
                .map(|(close, up, down, volume)| {
                    (close * (1.0 + up), close * (1.0 - down), close, volume)
                })
                .collect();
            bars_from(&rows)
        })
}

/// Base thresholds with `sell < hold_floor <= buy`.
fn arb_ordered_thresholds() -> impl Strategy<Value = Thresholds> {
    (0.0..1.0_f64, 0.01..1.0_f64, 0.0..1.0_f64).prop_map(|(sell, gap, extra)| Thresholds {
        buy: sell + gap + extra,
        sell,
        hold_floor: sell + gap,
    })
}

// ── 1. Weight Round-Trip ─────────────────────────────────────────────

proptest! {
    /// Dividing each High-regime weight by its multiplier gives back the
    /// base weight.
    #[test]
    fn high_adjustment_round_trips(
        weights in arb_weight_map(),
        boost in 0.1..3.0_f64,
        damping in 0.1..3.0_f64,
    ) {
        let adjustment = WeightAdjustment { boost, damping };
        let high = weights.adjusted(VolatilityRegime::High, &adjustment);

        for condition in Condition::ALL {
            let restored = high.get(condition) / adjustment.multiplier(condition);
            prop_assert!((restored - weights.get(condition)).abs() < 1e-9);
        }
        prop_assert_eq!(weights.adjusted(VolatilityRegime::Normal, &adjustment), weights);
    }

    /// A weight written to `[weights]` is read back within 1e-9.
    #[test]
    fn configured_weight_round_trips(condition in arb_condition(), weight in arb_weight()) {
        let ini = format!("[weights]\n{} = {}\n", condition.name(), weight);
        let config = FileConfigAdapter::from_string(&ini).unwrap();
        let scoring = load_scoring_config(&config).unwrap();

        prop_assert!((scoring.base_weights.get(condition) - weight).abs() < 1e-9);
        for other in Condition::ALL.into_iter().filter(|c| *c != condition) {
            prop_assert_eq!(scoring.base_weights.get(other), other.base_weight());
        }
    }
}

// ── 2. Monotonicity ──────────────────────────────────────────────────

proptest! {
    /// Raising the weight of a met condition never lowers the score; a
    /// condition that is not met never affects it.
    #[test]
    fn raising_a_weight_never_lowers_score(
        conditions in arb_condition_set(),
        weights in arb_weight_map(),
        condition in arb_condition(),
        delta in 0.0..1.0_f64,
    ) {
        let before = score(&conditions, &weights);
        let raised = weights.with(condition, weights.get(condition) + delta);
        let after = score(&conditions, &raised);

        if conditions.is_met(condition) {
            prop_assert!(after >= before - 1e-12);
        } else {
            prop_assert_eq!(after, before);
        }
    }
}

// ── 3. Finite Score ──────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Any well-formed series evaluates to a finite score, whatever its
    /// length.
    #[test]
    fn score_is_finite_for_well_formed_series(bars in arb_bars(1, 120)) {
        let evaluation = evaluate("PROP", &bars, StaticInfo::default(), &ScoringConfig::default());
        prop_assert!(evaluation.is_ok());
        let result = evaluation.unwrap().result;
        prop_assert!(result.score.is_finite());
        prop_assert_eq!(result.snapshot.get(IndicatorKey::Close), bars.last().map(|b| b.close));
    }
}

// ── 4. Threshold Ordering ────────────────────────────────────────────

proptest! {
    /// Ordered base thresholds stay ordered in both regimes when the buy
    /// factor widens and the sell factor narrows.
    #[test]
    fn threshold_ordering_holds_in_both_regimes(
        thresholds in arb_ordered_thresholds(),
        buy_factor in 1.0..2.0_f64,
        sell_factor in 0.01..1.0_f64,
    ) {
        let config = ScoringConfig {
            thresholds,
            threshold_adjustment: ThresholdAdjustment { buy_factor, sell_factor },
            ..ScoringConfig::default()
        };
        for regime in [VolatilityRegime::Normal, VolatilityRegime::High] {
            let effective = config.thresholds_for(regime);
            prop_assert!(effective.is_ordered(), "{:?} under {}", effective, regime);
        }
    }
}

// ── 5. Determinism ───────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Evaluating the same series twice gives identical results.
    #[test]
    fn evaluation_is_deterministic(bars in arb_bars(50, 90)) {
        let config = ScoringConfig::default();
        let first = evaluate("DET", &bars, StaticInfo::default(), &config).unwrap();
        let second = evaluate("DET", &bars, StaticInfo::default(), &config).unwrap();
        prop_assert_eq!(first, second);
    }
}
