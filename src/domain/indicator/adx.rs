//! Average Directional Index (ADX): trend strength regardless of direction.
//!
//! 1. +DM / -DM and True Range for each bar-to-bar transition.
//! 2. Wilder's smoothing (period) of +DM, -DM and TR, seeded by their sums.
//! 3. +DI = smoothed(+DM) / smoothed(TR) * 100, -DI likewise.
//! 4. DX = |+DI - -DI| / (+DI + -DI) * 100
//! 5. ADX = Wilder's smoothed average of DX, seeded by the mean of the first
//!    `period` DX values.
//!
//! The first DX lands on bar `period`, the first ADX on bar `2 * period - 1`.

use crate::domain::indicator::{IndicatorSeries, IndicatorType};
use crate::domain::ohlcv::OhlcvBar;

pub const DEFAULT_PERIOD: usize = 14;

pub fn calculate_adx(bars: &[OhlcvBar], period: usize) -> IndicatorSeries {
    let mut values = vec![None; bars.len()];

    if period == 0 || bars.len() < 2 * period {
        return IndicatorSeries::from_options(IndicatorType::Adx(period), bars, &values);
    }

    let period_f = period as f64;

    // transition j describes bar j + 1 against bar j
    let mut plus_dm = Vec::with_capacity(bars.len() - 1);
    let mut minus_dm = Vec::with_capacity(bars.len() - 1);
    let mut tr_vals = Vec::with_capacity(bars.len() - 1);

    for w in bars.windows(2) {
        let (prev, bar) = (&w[0], &w[1]);
        let up_move = bar.high - prev.high;
        let down_move = prev.low - bar.low;

        plus_dm.push(if up_move > down_move && up_move > 0.0 {
            up_move
        } else {
            0.0
        });
        minus_dm.push(if down_move > up_move && down_move > 0.0 {
            down_move
        } else {
            0.0
        });
        tr_vals.push(bar.true_range(prev.close));
    }

    let mut smooth_plus_dm: f64 = plus_dm[..period].iter().sum();
    let mut smooth_minus_dm: f64 = minus_dm[..period].iter().sum();
    let mut smooth_tr: f64 = tr_vals[..period].iter().sum();

    let mut dx_values = Vec::with_capacity(tr_vals.len() - period + 1);
    dx_values.push(compute_dx(smooth_plus_dm, smooth_minus_dm, smooth_tr));

    for j in period..tr_vals.len() {
        smooth_plus_dm = smooth_plus_dm - smooth_plus_dm / period_f + plus_dm[j];
        smooth_minus_dm = smooth_minus_dm - smooth_minus_dm / period_f + minus_dm[j];
        smooth_tr = smooth_tr - smooth_tr / period_f + tr_vals[j];
        dx_values.push(compute_dx(smooth_plus_dm, smooth_minus_dm, smooth_tr));
    }

    // dx_values[m] belongs to bar period + m
    let mut adx = dx_values[..period].iter().sum::<f64>() / period_f;
    values[2 * period - 1] = Some(adx);

    for (m, &dx) in dx_values.iter().enumerate().skip(period) {
        adx = (adx * (period_f - 1.0) + dx) / period_f;
        values[period + m] = Some(adx);
    }

    IndicatorSeries::from_options(IndicatorType::Adx(period), bars, &values)
}

/// DX from smoothed +DM, -DM and TR. A zero range or no directional movement
/// gives 0.
fn compute_dx(smooth_plus_dm: f64, smooth_minus_dm: f64, smooth_tr: f64) -> f64 {
    if smooth_tr <= 0.0 {
        return 0.0;
    }

    let plus_di = (smooth_plus_dm / smooth_tr) * 100.0;
    let minus_di = (smooth_minus_dm / smooth_tr) * 100.0;

    let di_sum = plus_di + minus_di;
    if di_sum == 0.0 {
        return 0.0;
    }

    ((plus_di - minus_di).abs() / di_sum) * 100.0
}
