//! Scoring engine domain types and logic.

pub mod ohlcv;
pub mod period;
pub mod indicator;
pub mod indicator_set;
pub mod volatility;
pub mod condition;
pub mod weights;
pub mod scoring;
pub mod signal;
pub mod settings;
pub mod evaluation;
pub mod batch;
pub mod universe;
pub mod config_validation;
pub mod error;
