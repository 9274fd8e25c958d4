//! Configuration loading and validation.
//!
//! Every scoring parameter is read through [`ConfigPort`] and checked before
//! any instrument is evaluated.

use crate::domain::condition::Condition;
use crate::domain::error::StockscoreError;
use crate::domain::period::Period;
use crate::domain::settings::ScoringConfig;
use crate::domain::signal::{ThresholdAdjustment, Thresholds};
use crate::domain::universe::parse_symbols;
use crate::domain::volatility::VolatilityRegime;
use crate::domain::weights::{WeightAdjustment, WeightMap};
use crate::ports::config_port::ConfigPort;

pub fn validate_config(config: &dyn ConfigPort) -> Result<(), StockscoreError> {
    load_scoring_config(config)?;
    load_period(config)?;
    load_symbols(config)?;
    Ok(())
}

pub fn load_scoring_config(config: &dyn ConfigPort) -> Result<ScoringConfig, StockscoreError> {
    let defaults = ScoringConfig::default();

    let thresholds = Thresholds {
        buy: read_double(config, "thresholds", "buy", defaults.thresholds.buy)?,
        sell: read_double(config, "thresholds", "sell", defaults.thresholds.sell)?,
        hold_floor: read_double(
            config,
            "thresholds",
            "hold_floor",
            defaults.thresholds.hold_floor,
        )?,
    };

    let atr_multiplier = read_positive(config, "atr_multiplier", defaults.atr_multiplier)?;
    let weight_adjustment = WeightAdjustment {
        boost: read_positive(config, "weight_boost", defaults.weight_adjustment.boost)?,
        damping: read_positive(config, "weight_damping", defaults.weight_adjustment.damping)?,
    };
    let threshold_adjustment = ThresholdAdjustment {
        buy_factor: read_positive(
            config,
            "buy_factor",
            defaults.threshold_adjustment.buy_factor,
        )?,
        sell_factor: read_positive(
            config,
            "sell_factor",
            defaults.threshold_adjustment.sell_factor,
        )?,
    };

    let scoring = ScoringConfig {
        thresholds,
        atr_multiplier,
        weight_adjustment,
        threshold_adjustment,
        base_weights: load_weights(config)?,
    };
    validate_threshold_ordering(&scoring)?;
    Ok(scoring)
}

pub fn load_period(config: &dyn ConfigPort) -> Result<Period, StockscoreError> {
    match config.get_string("analysis", "period") {
        None => Ok(Period::default()),
        Some(s) => s
            .parse::<Period>()
            .map_err(|e| StockscoreError::invalid("analysis", "period", e.to_string())),
    }
}

/// Symbols from `[analysis] symbols`; `None` when the key is absent or blank.
pub fn load_symbols(config: &dyn ConfigPort) -> Result<Option<Vec<String>>, StockscoreError> {
    match config.get_string("analysis", "symbols") {
        Some(s) if !s.trim().is_empty() => parse_symbols(&s)
            .map(Some)
            .map_err(|e| StockscoreError::invalid("analysis", "symbols", e.to_string())),
        _ => Ok(None),
    }
}

pub fn data_directory(config: &dyn ConfigPort) -> Result<String, StockscoreError> {
    match config.get_string("data", "directory") {
        Some(s) if !s.trim().is_empty() => Ok(s.trim().to_string()),
        _ => Err(StockscoreError::ConfigMissing {
            section: "data".to_string(),
            key: "directory".to_string(),
        }),
    }
}

fn load_weights(config: &dyn ConfigPort) -> Result<WeightMap, StockscoreError> {
    let mut weights = WeightMap::base();
    for key in config.keys("weights") {
        let condition = key
            .parse::<Condition>()
            .map_err(|e| StockscoreError::invalid("weights", &key, e.to_string()))?;
        let weight = read_double(config, "weights", &key, condition.base_weight())?;
        weights = weights.with(condition, weight);
    }
    Ok(weights)
}

fn read_double(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
    default: f64,
) -> Result<f64, StockscoreError> {
    let Some(raw) = config.get_string(section, key) else {
        return Ok(default);
    };
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        Ok(_) => Err(StockscoreError::invalid(section, key, "must be finite")),
        Err(_) => Err(StockscoreError::invalid(
            section,
            key,
            format!("'{}' is not a number", raw.trim()),
        )),
    }
}

fn read_positive(
    config: &dyn ConfigPort,
    key: &str,
    default: f64,
) -> Result<f64, StockscoreError> {
    let value = read_double(config, "volatility", key, default)?;
    if value <= 0.0 {
        return Err(StockscoreError::invalid(
            "volatility",
            key,
            format!("{} must be positive", key),
        ));
    }
    Ok(value)
}

fn validate_threshold_ordering(scoring: &ScoringConfig) -> Result<(), StockscoreError> {
    for regime in [VolatilityRegime::Normal, VolatilityRegime::High] {
        let t = scoring.thresholds_for(regime);
        if !t.is_ordered() {
            return Err(StockscoreError::invalid(
                "thresholds",
                "buy",
                format!(
                    "{} regime thresholds must satisfy sell < hold_floor <= buy (sell {:.4}, hold_floor {:.4}, buy {:.4})",
                    regime, t.sell, t.hold_floor, t.buy
                ),
            ));
        }
    }
    Ok(())
}
