//! SMA (Simple Moving Average) and the golden/death cross built on it

use crate::config::SmaParams;
use crate::error::Result;
use crate::indicators::crossover::crossover_signals;
use crate::indicators::validation::validate_windows;
use crate::models::price::PriceSeries;
use crate::models::signal::Signal;

/// Trailing arithmetic mean over `window` values.
///
/// Indices before `window - 1` are `None`. Each mean is summed from its own
/// window rather than a running total, so equal inputs give equal outputs.
pub fn rolling_sma(values: &[f64], window: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; values.len()];
    if window == 0 {
        return out;
    }

    for (start, slice) in values.windows(window).enumerate() {
        out[start + window - 1] = Some(slice.iter().sum::<f64>() / window as f64);
    }
    out
}

/// Both averages and the crossover signal, aligned with the input series
#[derive(Debug, Clone, PartialEq)]
pub struct SmaCrossover {
    pub short: Vec<Option<f64>>,
    pub long: Vec<Option<f64>>,
    pub signals: Vec<Signal>,
}

/// Short/long SMA of `close` plus the golden/death cross classification
pub fn calculate_sma_crossover(series: &PriceSeries, params: &SmaParams) -> Result<SmaCrossover> {
    validate_windows(params, series.len())?;

    let closes = series.closes();
    let short = rolling_sma(&closes, params.short_window);
    let long = rolling_sma(&closes, params.long_window);
    let signals = crossover_signals(&short, &long);

    Ok(SmaCrossover {
        short,
        long,
        signals,
    })
}
