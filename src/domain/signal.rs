//! Signal classification.
//!
//! Precedence lives in [`SIGNAL_RULES`], an ordered table of
//! `(predicate, signal)` pairs; the first matching rule wins and
//! [`Signal::DontBuy`] is the fallback.

use crate::domain::volatility::VolatilityRegime;
use std::fmt;

pub const DEFAULT_BUY_THRESHOLD: f64 = 0.70;
pub const DEFAULT_SELL_THRESHOLD: f64 = 0.30;
pub const DEFAULT_HOLD_FLOOR: f64 = 0.60;
pub const DEFAULT_BUY_FACTOR: f64 = 1.1;
pub const DEFAULT_SELL_FACTOR: f64 = 0.9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Signal {
    Buy,
    Sell,
    Hold,
    DontBuy,
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Signal::Buy => f.write_str("Buy"),
            Signal::Sell => f.write_str("Sell"),
            Signal::Hold => f.write_str("Hold"),
            Signal::DontBuy => f.write_str("Don't Buy"),
        }
    }
}

/// Effective thresholds for one evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    pub buy: f64,
    pub sell: f64,
    pub hold_floor: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            buy: DEFAULT_BUY_THRESHOLD,
            sell: DEFAULT_SELL_THRESHOLD,
            hold_floor: DEFAULT_HOLD_FLOOR,
        }
    }
}

impl Thresholds {
    /// Thresholds under `regime`. High widens the bands: buy is raised, sell
    /// lowered. The hold floor is fixed.
    pub fn for_regime(&self, regime: VolatilityRegime, adjustment: &ThresholdAdjustment) -> Self {
        match regime {
            VolatilityRegime::Normal => *self,
            VolatilityRegime::High => Self {
                buy: self.buy * adjustment.buy_factor,
                sell: self.sell * adjustment.sell_factor,
                hold_floor: self.hold_floor,
            },
        }
    }

    /// `sell < hold_floor <= buy`
    pub fn is_ordered(&self) -> bool {
        self.sell < self.hold_floor && self.hold_floor <= self.buy
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThresholdAdjustment {
    pub buy_factor: f64,
    pub sell_factor: f64,
}

impl Default for ThresholdAdjustment {
    fn default() -> Self {
        Self {
            buy_factor: DEFAULT_BUY_FACTOR,
            sell_factor: DEFAULT_SELL_FACTOR,
        }
    }
}

/// What a signal rule looks at.
#[derive(Debug, Clone, Copy)]
pub struct SignalInput {
    pub score: f64,
    /// At least one negative-weight condition is met.
    pub bearish: bool,
}

pub type SignalRule = (fn(&SignalInput, &Thresholds) -> bool, Signal);

pub const SIGNAL_RULES: [SignalRule; 3] = [
    (at_or_above_buy, Signal::Buy),
    (bearish_at_or_below_sell, Signal::Sell),
    (in_hold_band, Signal::Hold),
];

fn at_or_above_buy(input: &SignalInput, t: &Thresholds) -> bool {
    input.score >= t.buy
}

fn bearish_at_or_below_sell(input: &SignalInput, t: &Thresholds) -> bool {
    input.score <= t.sell && input.bearish
}

fn in_hold_band(input: &SignalInput, t: &Thresholds) -> bool {
    t.hold_floor <= input.score && input.score < t.buy
}

pub fn classify(input: &SignalInput, thresholds: &Thresholds) -> Signal {
    SIGNAL_RULES
        .iter()
        .find(|(matches, _)| matches(input, thresholds))
        .map_or(Signal::DontBuy, |&(_, signal)| signal)
}
