//! ATR (Average True Range) with Wilder's smoothing.
//!
//! TR[0] = high - low; TR[i] = true range against the prior close.
//! Seed ATR[n-1] = mean(TR[0..n]); then ATR[i] = (ATR[i-1] * (n-1) + TR[i]) / n.
//! Warmup: first (n-1) bars are invalid.

use crate::domain::indicator::{IndicatorSeries, IndicatorType};
use crate::domain::ohlcv::OhlcvBar;

pub const DEFAULT_PERIOD: usize = 14;

pub fn calculate_atr(bars: &[OhlcvBar], period: usize) -> IndicatorSeries {
    let mut values = vec![None; bars.len()];

    if period == 0 || bars.len() < period {
        return IndicatorSeries::from_options(IndicatorType::Atr(period), bars, &values);
    }

    let tr_values = true_ranges(bars);

    let mut atr = tr_values[..period].iter().sum::<f64>() / period as f64;
    values[period - 1] = Some(atr);

    for i in period..bars.len() {
        atr = (atr * (period - 1) as f64 + tr_values[i]) / period as f64;
        values[i] = Some(atr);
    }

    IndicatorSeries::from_options(IndicatorType::Atr(period), bars, &values)
}

pub(crate) fn true_ranges(bars: &[OhlcvBar]) -> Vec<f64> {
    bars.iter()
        .enumerate()
        .map(|(i, bar)| {
            if i == 0 {
                bar.high - bar.low
            } else {
                bar.true_range(bars[i - 1].close)
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::indicator::test_bars::from_hlc;

    fn stepping_bars() -> Vec<OhlcvBar> {
        from_hlc(&[
            (110.0, 100.0, 105.0),
            (115.0, 105.0, 110.0),
            (120.0, 110.0, 115.0),
            (125.0, 115.0, 120.0),
        ])
    }

    #[test]
    fn atr_warmup() {
        let bars = from_hlc(&[(110.0, 90.0, 100.0); 5]);
        let series = calculate_atr(&bars, 3);
        assert_eq!(series.values.len(), 5);

        assert!(!series.values[0].valid);
        assert!(!series.values[1].valid);
        assert!(series.values[2].valid);
        assert!(series.values[3].valid);
        assert!(series.values[4].valid);
    }

    #[test]
    fn atr_seed_is_average() {
        let values = calculate_atr(&stepping_bars(), 3).simple();
        assert!((values[2].unwrap() - 10.0).abs() < 1e-9);
    }

    #[test]
    fn atr_wilder_smoothing() {
        let values = calculate_atr(&stepping_bars(), 3).simple();
        let expected = (10.0 * 2.0 + 10.0) / 3.0;
        assert!((values[3].unwrap() - expected).abs() < 1e-9);
    }

    #[test]
    fn atr_insufficient_bars_are_aligned() {
        let bars = from_hlc(&[(110.0, 90.0, 100.0); 2]);
        let series = calculate_atr(&bars, 5);
        assert_eq!(series.values.len(), 2);
        assert!(series.values.iter().all(|p| !p.valid));
    }

    #[test]
    fn atr_handles_gaps() {
        let bars = from_hlc(&[
            (110.0, 100.0, 105.0),
            (130.0, 120.0, 125.0),
            (120.0, 110.0, 115.0),
        ]);
        let values = calculate_atr(&bars, 2).simple();

        // TR: 10, |130-105| = 25 → seed 17.5
        assert!((values[1].unwrap() - 17.5).abs() < 1e-9);
        // TR[2] = max(10, |120-125|, |110-125|) = 15
        assert!((values[2].unwrap() - (17.5 + 15.0) / 2.0).abs() < 1e-9);
    }
}
