//! Volatility regime classification from the ATR series.

use std::fmt;

pub const DEFAULT_ATR_MULTIPLIER: f64 = 1.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VolatilityRegime {
    #[default]
    Normal,
    High,
}

impl VolatilityRegime {
    pub fn is_high(self) -> bool {
        self == VolatilityRegime::High
    }
}

impl fmt::Display for VolatilityRegime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VolatilityRegime::Normal => f.write_str("Normal"),
            VolatilityRegime::High => f.write_str("High"),
        }
    }
}

/// `High` iff the latest ATR strictly exceeds `mean(ATR) * multiplier`, the
/// mean taken over every defined ATR value. Fewer than two defined values,
/// or an undefined latest value, classify as `Normal`.
pub fn classify_volatility(atr: &[Option<f64>], multiplier: f64) -> VolatilityRegime {
    let defined: Vec<f64> = atr.iter().flatten().copied().collect();
    if defined.len() < 2 {
        return VolatilityRegime::Normal;
    }

    let Some(Some(latest)) = atr.last().copied() else {
        return VolatilityRegime::Normal;
    };

    let mean = defined.iter().sum::<f64>() / defined.len() as f64;
    let threshold = mean * multiplier;

    if latest > threshold {
        VolatilityRegime::High
    } else {
        VolatilityRegime::Normal
    }
}
