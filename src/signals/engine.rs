//! Main signal engine: runs both indicator engines over one series.

use crate::config::{MacdParams, SmaParams};
use crate::error::Result;
use crate::indicators::momentum::calculate_macd;
use crate::indicators::trend::calculate_sma_crossover;
use crate::indicators::validation::{validate_spans, validate_windows};
use crate::models::price::PriceSeries;
use crate::models::signal::{DerivedRow, DerivedSeries};
use tracing::debug;

pub struct SignalEngine;

impl SignalEngine {
    /// Derive SMA crossover signals (and MACD when `macd` is given) from
    /// `series`.
    ///
    /// All parameters are validated before anything is computed; on error no
    /// output exists. The input is only read.
    pub fn evaluate(
        series: &PriceSeries,
        sma: &SmaParams,
        macd: Option<&MacdParams>,
    ) -> Result<DerivedSeries> {
        validate_windows(sma, series.len())?;
        if let Some(params) = macd {
            validate_spans(params)?;
        }

        let crossover = calculate_sma_crossover(series, sma)?;
        let macd_series = macd.map(|params| calculate_macd(series, params)).transpose()?;

        let rows: Vec<DerivedRow> = series
            .points()
            .iter()
            .enumerate()
            .map(|(i, point)| DerivedRow {
                timestamp: point.timestamp,
                open: point.open,
                high: point.high,
                low: point.low,
                close: point.close,
                volume: point.volume,
                sma_short: crossover.short[i],
                sma_long: crossover.long[i],
                signal: crossover.signals[i],
                macd: macd_series.as_ref().and_then(|m| m.at(i)),
            })
            .collect();

        debug!(
            ticker = series.ticker(),
            rows = rows.len(),
            signals = rows.iter().filter(|r| r.signal.is_actionable()).count(),
            "Derived signal series"
        );

        Ok(DerivedSeries {
            ticker: series.ticker().to_string(),
            price_field: series.price_field(),
            sma: *sma,
            macd: macd.copied(),
            rows,
        })
    }
}
