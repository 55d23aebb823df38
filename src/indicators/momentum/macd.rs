//! MACD (Moving Average Convergence Divergence) indicator

use crate::config::MacdParams;
use crate::error::Result;
use crate::indicators::crossover::crossover_signals;
use crate::indicators::trend::ema::ema_series;
use crate::indicators::validation::validate_spans;
use crate::models::indicators::MacdIndicator;
use crate::models::price::PriceSeries;
use crate::models::signal::Signal;

/// MACD line, signal line and histogram, aligned with the input series.
///
/// All three are defined from index 0 since the EMAs have no warm-up gap.
#[derive(Debug, Clone, PartialEq)]
pub struct MacdSeries {
    pub macd: Vec<f64>,
    pub signal: Vec<f64>,
    pub histogram: Vec<f64>,
}

impl MacdSeries {
    pub fn len(&self) -> usize {
        self.macd.len()
    }

    pub fn is_empty(&self) -> bool {
        self.macd.is_empty()
    }

    pub fn at(&self, index: usize) -> Option<MacdIndicator> {
        Some(MacdIndicator::new(
            *self.macd.get(index)?,
            *self.signal.get(index)?,
        ))
    }

    pub fn latest(&self) -> Option<MacdIndicator> {
        self.len().checked_sub(1).and_then(|i| self.at(i))
    }

    /// MACD line crossing its signal line, using the same strict rule as the
    /// SMA crossover.
    pub fn crossovers(&self) -> Vec<Signal> {
        let macd: Vec<Option<f64>> = self.macd.iter().copied().map(Some).collect();
        let signal: Vec<Option<f64>> = self.signal.iter().copied().map(Some).collect();
        crossover_signals(&macd, &signal)
    }
}

/// Calculate MACD over raw values
///
/// MACD = EMA(fast) - EMA(slow)
/// Signal = EMA(signal_span) of MACD, seeded by MACD[0]
/// Histogram = MACD - Signal
pub fn macd_from_values(values: &[f64], params: &MacdParams) -> Result<MacdSeries> {
    validate_spans(params)?;

    let fast = ema_series(values, params.fast);
    let slow = ema_series(values, params.slow);
    let macd: Vec<f64> = fast.iter().zip(&slow).map(|(f, s)| f - s).collect();
    let signal = ema_series(&macd, params.signal_span);
    let histogram = macd.iter().zip(&signal).map(|(m, s)| m - s).collect();

    Ok(MacdSeries {
        macd,
        signal,
        histogram,
    })
}

/// Calculate MACD over the series' `close`
pub fn calculate_macd(series: &PriceSeries, params: &MacdParams) -> Result<MacdSeries> {
    macd_from_values(&series.closes(), params)
}

/// Calculate MACD with default spans (12, 26, 9)
pub fn calculate_macd_default(series: &PriceSeries) -> Result<MacdSeries> {
    calculate_macd(series, &MacdParams::default())
}
