//! Engine output: the per-row derived series and its classifications.

use crate::config::{MacdParams, PriceField, SmaParams};
use crate::models::indicators::MacdIndicator;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Crossover classification at a single index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Signal {
    Buy,
    Sell,
    Hold,
}

impl Signal {
    pub fn as_str(&self) -> &'static str {
        match self {
            Signal::Buy => "BUY",
            Signal::Sell => "SELL",
            Signal::Hold => "HOLD",
        }
    }

    /// `true` for `Buy`/`Sell`
    pub fn is_actionable(&self) -> bool {
        !matches!(self, Signal::Hold)
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Current relation of the short average to the long one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Stance {
    Bullish,
    Bearish,
}

impl fmt::Display for Stance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stance::Bullish => f.write_str("BULLISH"),
            Stance::Bearish => f.write_str("BEARISH"),
        }
    }
}

/// One input bar plus everything derived for it.
///
/// `None` in an SMA field means the window has not filled yet; `macd` is
/// `None` only when MACD was not requested.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedRow {
    pub timestamp: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
    pub sma_short: Option<f64>,
    pub sma_long: Option<f64>,
    pub signal: Signal,
    pub macd: Option<MacdIndicator>,
}

impl DerivedRow {
    /// Stance at this row, if both averages are defined
    pub fn stance(&self) -> Option<Stance> {
        match (self.sma_short, self.sma_long) {
            (Some(short), Some(long)) if short > long => Some(Stance::Bullish),
            (Some(_), Some(_)) => Some(Stance::Bearish),
            _ => None,
        }
    }
}

/// Output of one engine run, aligned 1:1 with the input series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedSeries {
    pub ticker: String,
    pub price_field: PriceField,
    pub sma: SmaParams,
    pub macd: Option<MacdParams>,
    pub rows: Vec<DerivedRow>,
}

impl DerivedSeries {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows carrying a `Buy` or `Sell`, in order
    pub fn signal_rows(&self) -> impl Iterator<Item = &DerivedRow> {
        self.rows.iter().filter(|row| row.signal.is_actionable())
    }

    /// Stance at the latest row where both averages are defined
    pub fn latest_stance(&self) -> Option<Stance> {
        self.rows.iter().rev().find_map(DerivedRow::stance)
    }
}
