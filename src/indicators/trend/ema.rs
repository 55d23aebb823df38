//! EMA (Exponential Moving Average) indicator

use crate::error::{Result, SignalError};
use crate::models::price::PriceSeries;

/// `2 / (span + 1)`
pub fn smoothing_factor(span: usize) -> f64 {
    2.0 / (span as f64 + 1.0)
}

/// EMA seeded with the first value; defined at every index.
///
/// `ema[0] = values[0]`, `ema[i] = alpha * values[i] + (1 - alpha) * ema[i - 1]`.
pub fn ema_series(values: &[f64], span: usize) -> Vec<f64> {
    let alpha = smoothing_factor(span);
    let mut out = Vec::with_capacity(values.len());

    let mut iter = values.iter();
    let Some(&seed) = iter.next() else {
        return out;
    };
    out.push(seed);

    let mut previous = seed;
    for &value in iter {
        previous = alpha * value + (1.0 - alpha) * previous;
        out.push(previous);
    }
    out
}

/// EMA of `close` for a specific span
pub fn calculate_ema(series: &PriceSeries, span: usize) -> Result<Vec<f64>> {
    if span == 0 {
        return Err(SignalError::InvalidSpan("span must be positive".to_string()));
    }
    Ok(ema_series(&series.closes(), span))
}
