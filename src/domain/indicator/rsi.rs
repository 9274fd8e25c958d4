//! RSI (Relative Strength Index) indicator.
//!
//! Uses Wilder's smoothing for average gain/loss calculation:
//! - First average: simple mean of gains/losses over the first n price changes
//! - Subsequent: avg = (prev_avg * (n-1) + current) / n
//!
//! Formula: RSI = 100 - (100 / (1 + avg_gain / avg_loss)), clipped to [0, 100].
//! If avg_loss == 0: RSI = 100, or 50 when avg_gain is also 0 (no movement).
//!
//! Warmup: first n bars are invalid (need n price changes).

use crate::domain::indicator::{IndicatorSeries, IndicatorType};
use crate::domain::ohlcv::OhlcvBar;

pub const DEFAULT_PERIOD: usize = 14;

pub fn calculate_rsi(bars: &[OhlcvBar], period: usize) -> IndicatorSeries {
    let mut values = vec![None; bars.len()];

    if period == 0 || bars.len() <= period {
        return IndicatorSeries::from_options(IndicatorType::Rsi(period), bars, &values);
    }

    let (gains, losses): (Vec<f64>, Vec<f64>) = bars
        .windows(2)
        .map(|w| {
            let change = w[1].close - w[0].close;
            (change.max(0.0), (-change).max(0.0))
        })
        .unzip();

    let mut avg_gain = gains[..period].iter().sum::<f64>() / period as f64;
    let mut avg_loss = losses[..period].iter().sum::<f64>() / period as f64;
    values[period] = Some(rsi_from_averages(avg_gain, avg_loss));

    // gains[j] is the change into bar j + 1
    for j in period..gains.len() {
        avg_gain = (avg_gain * (period - 1) as f64 + gains[j]) / period as f64;
        avg_loss = (avg_loss * (period - 1) as f64 + losses[j]) / period as f64;
        values[j + 1] = Some(rsi_from_averages(avg_gain, avg_loss));
    }

    IndicatorSeries::from_options(IndicatorType::Rsi(period), bars, &values)
}

fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        return if avg_gain == 0.0 { 50.0 } else { 100.0 };
    }
    let rsi = 100.0 - (100.0 / (1.0 + avg_gain / avg_loss));
    rsi.clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::indicator::test_bars::from_closes;

    #[test]
    fn rsi_empty_bars() {
        let series = calculate_rsi(&[], 14);
        assert_eq!(series.values.len(), 0);
    }

    #[test]
    fn rsi_single_bar() {
        let bars = from_closes(&[100.0]);
        let series = calculate_rsi(&bars, 14);
        assert_eq!(series.values.len(), 1);
        assert!(!series.values[0].valid);
    }

    #[test]
    fn rsi_warmup_period() {
        let closes: Vec<f64> = (1..=15).map(|i| 100.0 + (i as f64 % 5.0) * 2.0).collect();
        let series = calculate_rsi(&from_closes(&closes), 14);

        assert_eq!(series.values.len(), 15);
        for i in 0..14 {
            assert!(!series.values[i].valid, "Bar {} should be invalid", i);
        }
        assert!(series.values[14].valid, "Bar 14 should be valid");
    }

    #[test]
    fn rsi_all_gains_no_losses() {
        let closes: Vec<f64> = (0..15).map(|i| 100.0 + i as f64).collect();
        let values = calculate_rsi(&from_closes(&closes), 14).simple();
        assert_eq!(values[14], Some(100.0));
    }

    #[test]
    fn rsi_all_losses_no_gains() {
        let closes: Vec<f64> = (0..15).map(|i| 100.0 - i as f64).collect();
        let values = calculate_rsi(&from_closes(&closes), 14).simple();
        assert!(values[14].unwrap().abs() < f64::EPSILON);
    }

    #[test]
    fn rsi_flat_prices_are_neutral() {
        let values = calculate_rsi(&from_closes(&[100.0; 20]), 14).simple();
        assert_eq!(values[19], Some(50.0));
    }

    #[test]
    fn rsi_in_range() {
        let closes: Vec<f64> = (1..=40)
            .map(|i| 100.0 + (i as f64 % 7.0 - 3.0) * 2.0)
            .collect();
        let series = calculate_rsi(&from_closes(&closes), 14);

        for rsi in series.simple().into_iter().flatten() {
            assert!((0.0..=100.0).contains(&rsi), "RSI {} out of range", rsi);
        }
    }

    #[test]
    fn rsi_wilder_smoothing_step() {
        // 3 changes of +1 then one of -2, period 3
        let bars = from_closes(&[10.0, 11.0, 12.0, 13.0, 11.0]);
        let values = calculate_rsi(&bars, 3).simple();

        assert_eq!(values[3], Some(100.0));
        let avg_gain = (1.0 * 2.0 + 0.0) / 3.0;
        let avg_loss = (0.0 * 2.0 + 2.0) / 3.0;
        let expected = 100.0 - 100.0 / (1.0 + avg_gain / avg_loss);
        assert!((values[4].unwrap() - expected).abs() < 1e-12);
    }

    #[test]
    fn rsi_zero_period() {
        let bars = from_closes(&[100.0, 101.0]);
        let series = calculate_rsi(&bars, 0);
        assert_eq!(series.values.len(), 2);
        assert!(series.values.iter().all(|p| !p.valid));
    }

    #[test]
    fn rsi_indicator_type() {
        let bars = from_closes(&[100.0]);
        assert_eq!(calculate_rsi(&bars, 14).indicator_type, IndicatorType::Rsi(14));
    }
}
