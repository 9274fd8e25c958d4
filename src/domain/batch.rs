//! Parallel evaluation of many instruments.
//!
//! Each instrument is an isolated failure domain: an error on one is recorded
//! in [`BatchOutcome::failures`] and the rest of the batch carries on.

use crate::domain::evaluation::{Evaluation, StaticInfo, evaluate};
use crate::domain::ohlcv::OhlcvBar;
use crate::domain::settings::ScoringConfig;
use rayon::prelude::*;

#[derive(Debug, Clone, PartialEq)]
pub struct Instrument {
    pub symbol: String,
    pub bars: Vec<OhlcvBar>,
    pub info: StaticInfo,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstrumentFailure {
    pub symbol: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct BatchOutcome {
    /// Successful evaluations, in input order.
    pub results: Vec<Evaluation>,
    pub failures: Vec<InstrumentFailure>,
}

impl BatchOutcome {
    pub fn is_total_failure(&self) -> bool {
        self.results.is_empty() && !self.failures.is_empty()
    }
}

pub fn evaluate_batch(instruments: &[Instrument], config: &ScoringConfig) -> BatchOutcome {
    let evaluated: Vec<Result<Evaluation, InstrumentFailure>> = instruments
        .par_iter()
        .map(|instrument| {
            evaluate(
                &instrument.symbol,
                &instrument.bars,
                instrument.info.clone(),
                config,
            )
            .map_err(|e| InstrumentFailure {
                symbol: instrument.symbol.clone(),
                reason: e.to_string(),
            })
        })
        .collect();

    let mut outcome = BatchOutcome::default();
    for entry in evaluated {
        match entry {
            Ok(evaluation) => outcome.results.push(evaluation),
            Err(failure) => {
                tracing::warn!(symbol = %failure.symbol, reason = %failure.reason, "skipping instrument");
                outcome.failures.push(failure);
            }
        }
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::indicator::test_bars::from_closes;

    fn instrument(symbol: &str, bars: Vec<OhlcvBar>) -> Instrument {
        Instrument {
            symbol: symbol.to_string(),
            bars,
            info: StaticInfo::named(symbol),
        }
    }

    #[test]
    fn failure_does_not_abort_batch() {
        let instruments = vec![
            instrument("AAA", from_closes(&[10.0, 11.0, 12.0])),
            instrument("EMPTY", Vec::new()),
            instrument("CCC", from_closes(&[5.0; 30])),
        ];
        let outcome = evaluate_batch(&instruments, &ScoringConfig::default());

        let symbols: Vec<&str> = outcome
            .results
            .iter()
            .map(|e| e.result.symbol.as_str())
            .collect();
        assert_eq!(symbols, vec!["AAA", "CCC"]);
        assert_eq!(
            outcome.failures,
            vec![InstrumentFailure {
                symbol: "EMPTY".into(),
                reason: "empty series".into(),
            }]
        );
        assert!(!outcome.is_total_failure());
    }

    #[test]
    fn results_keep_input_order() {
        let instruments: Vec<Instrument> = (0..32)
            .map(|i| {
                let closes: Vec<f64> = (0..40).map(|j| 10.0 + (i * j) as f64 * 0.1).collect();
                instrument(&format!("S{i:02}"), from_closes(&closes))
            })
            .collect();
        let outcome = evaluate_batch(&instruments, &ScoringConfig::default());

        assert_eq!(outcome.results.len(), 32);
        for (i, evaluation) in outcome.results.iter().enumerate() {
            assert_eq!(evaluation.result.symbol, format!("S{i:02}"));
        }
    }

    #[test]
    fn empty_batch() {
        let outcome = evaluate_batch(&[], &ScoringConfig::default());
        assert!(outcome.results.is_empty());
        assert!(!outcome.is_total_failure());
    }

    #[test]
    fn all_failed_is_total_failure() {
        let outcome = evaluate_batch(&[instrument("X", Vec::new())], &ScoringConfig::default());
        assert!(outcome.is_total_failure());
    }
}
