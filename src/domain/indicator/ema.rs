//! Exponential Moving Average.
//!
//! k = 2/(n+1), EMA[0] = C[0], then EMA[i] = EMA[i-1] + k*(C[i] - EMA[i-1]).
//! The recursion runs from the first value; output is undefined for the first
//! (n-1) values.

/// EMA over a series with a leading undefined run (e.g. the MACD line).
///
/// The recursion is seeded with the first defined value and masked until
/// `period` values have been seen. A gap after the first defined value ends
/// the series: everything from the gap on stays undefined.
pub(crate) fn ema_of(values: &[Option<f64>], period: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; values.len()];
    if period == 0 {
        return out;
    }
    let Some(start) = values.iter().position(Option::is_some) else {
        return out;
    };

    let k = 2.0 / (period as f64 + 1.0);
    let mut ema: Option<f64> = None;

    for (i, value) in values.iter().enumerate().skip(start) {
        let Some(v) = *value else { break };

        let next = match ema {
            None => v,
            // same as v*k + prev*(1-k), but exact when v == prev
            Some(prev) => prev + k * (v - prev),
        };
        ema = Some(next);

        if i - start + 1 >= period {
            out[i] = Some(next);
        }
    }

    out
}
