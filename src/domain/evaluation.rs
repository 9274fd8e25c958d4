//! Per-instrument evaluation pipeline.
//!
//! Bars go through indicator computation, regime classification, weight and
//! threshold adjustment, condition evaluation, scoring and signal
//! classification. The regime is classified exactly once and the same value
//! feeds both the weight and the threshold adjustment.

use crate::domain::condition::{Condition, ConditionSet, Explanation};
use crate::domain::error::EvaluationError;
use crate::domain::indicator_set::{IndicatorKey, IndicatorSet, IndicatorSnapshot};
use crate::domain::ohlcv::{OhlcvBar, validate_series};
use crate::domain::scoring;
use crate::domain::settings::ScoringConfig;
use crate::domain::signal::{self, Signal, SignalInput, Thresholds};
use crate::domain::volatility::{VolatilityRegime, classify_volatility};
use crate::domain::weights::WeightMap;

/// Static instrument metadata supplied alongside the bars.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StaticInfo {
    pub name: String,
    pub sector: Option<String>,
    pub price: Option<f64>,
    pub pe_ratio: Option<f64>,
    pub dividend_yield: Option<f64>,
}

impl StaticInfo {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoreResult {
    pub symbol: String,
    pub info: StaticInfo,
    pub score: f64,
    pub signal: Signal,
    pub regime: VolatilityRegime,
    pub conditions: ConditionSet,
    /// Weights actually applied (regime-adjusted).
    pub weights: WeightMap,
    /// Thresholds actually applied (regime-adjusted).
    pub thresholds: Thresholds,
    pub snapshot: IndicatorSnapshot,
}

impl ScoreResult {
    pub fn explanation(&self, condition: Condition) -> Explanation {
        self.conditions.explanation(condition)
    }

    /// Price from static info, falling back to the latest close.
    pub fn price(&self) -> Option<f64> {
        self.info
            .price
            .or_else(|| self.snapshot.get(IndicatorKey::Close))
    }

    /// High regime combined with a Don't Buy signal.
    pub fn high_volatility_dont_buy(&self) -> bool {
        self.regime.is_high() && self.signal == Signal::DontBuy
    }
}

/// A result together with the full indicator table it was derived from.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub result: ScoreResult,
    pub indicators: IndicatorSet,
}

pub fn evaluate(
    symbol: &str,
    bars: &[OhlcvBar],
    info: StaticInfo,
    config: &ScoringConfig,
) -> Result<Evaluation, EvaluationError> {
    validate_series(bars)?;

    let indicators = IndicatorSet::compute(bars);
    let regime = classify_volatility(indicators.column(IndicatorKey::Atr), config.atr_multiplier);
    let weights = config.weights_for(regime);
    let thresholds = config.thresholds_for(regime);

    if regime.is_high() {
        tracing::info!(
            symbol,
            buy = thresholds.buy,
            sell = thresholds.sell,
            "high volatility regime, weights and thresholds adjusted"
        );
    }

    let conditions = ConditionSet::evaluate(&indicators);
    let input = SignalInput {
        score: scoring::score(&conditions, &weights),
        bearish: scoring::has_bearish_evidence(&conditions, &weights),
    };
    let signal = signal::classify(&input, &thresholds);

    tracing::debug!(
        symbol,
        bars = bars.len(),
        score = input.score,
        %signal,
        %regime,
        met = conditions.met().count(),
        "evaluated"
    );

    let result = ScoreResult {
        symbol: symbol.to_string(),
        info,
        score: input.score,
        signal,
        regime,
        conditions,
        weights,
        thresholds,
        snapshot: indicators.snapshot(),
    };

    Ok(Evaluation { result, indicators })
}
