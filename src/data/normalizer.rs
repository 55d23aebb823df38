//! Series normalizer: flattens a [`RawFrame`] into a [`PriceSeries`].

use crate::config::PriceField;
use crate::data::frame::RawFrame;
use crate::error::{Result, SignalError};
use crate::models::price::{PricePoint, PriceSeries};
use tracing::{debug, warn};

const OPEN: &str = "Open";
const HIGH: &str = "High";
const LOW: &str = "Low";
const CLOSE: &str = "Close";
const ADJ_CLOSE: &str = "Adj Close";
const VOLUME: &str = "Volume";

/// Resolves one column per OHLCV attribute and produces an ordered series.
///
/// The price field is a single setting applied to the whole frame; rows are
/// never mixed between `Close` and `Adj Close`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SeriesNormalizer {
    price_field: PriceField,
}

struct ResolvedColumns {
    open: usize,
    high: usize,
    low: usize,
    price: usize,
    volume: usize,
    price_field: PriceField,
}

impl SeriesNormalizer {
    pub fn new(price_field: PriceField) -> Self {
        Self { price_field }
    }

    pub fn price_field(&self) -> PriceField {
        self.price_field
    }

    /// Normalize `frame` for `ticker`.
    ///
    /// Rows with a missing or non-finite OHLCV value are dropped. Fails with
    /// `EmptySeries` when no rows remain and `MissingField` when a column
    /// cannot be resolved.
    pub fn normalize(&self, frame: &RawFrame, ticker: &str) -> Result<PriceSeries> {
        if frame.is_empty() {
            return Err(SignalError::EmptySeries);
        }

        let columns = self.resolve_columns(frame, ticker)?;
        debug!(
            ticker,
            price_field = columns.price_field.label(),
            rows = frame.len(),
            "Resolved price columns"
        );

        let cell = |column: usize, row: usize| -> Option<f64> {
            frame
                .column(column)
                .and_then(|values| values.get(row).copied().flatten())
                .filter(|v| v.is_finite())
        };

        let mut points = Vec::with_capacity(frame.len());
        let mut dropped = 0usize;
        for (row, &timestamp) in frame.index().iter().enumerate() {
            let values = (
                cell(columns.open, row),
                cell(columns.high, row),
                cell(columns.low, row),
                cell(columns.price, row),
                cell(columns.volume, row),
            );
            match values {
                (Some(open), Some(high), Some(low), Some(close), Some(volume)) => {
                    points.push(PricePoint::new(timestamp, open, high, low, close, volume));
                }
                _ => dropped += 1,
            }
        }

        if dropped > 0 {
            warn!(ticker, dropped, "Dropped rows with incomplete price data");
        }

        PriceSeries::new(ticker, columns.price_field, points)
    }

    fn resolve_columns(&self, frame: &RawFrame, ticker: &str) -> Result<ResolvedColumns> {
        let (price, price_field) = match self.price_field {
            PriceField::Close => (require(frame, CLOSE, ticker)?, PriceField::Close),
            PriceField::AdjClose => (require(frame, ADJ_CLOSE, ticker)?, PriceField::AdjClose),
            PriceField::Auto => match find_column(frame, ADJ_CLOSE, ticker) {
                Some(position) => (position, PriceField::AdjClose),
                None => (require(frame, CLOSE, ticker)?, PriceField::Close),
            },
        };

        Ok(ResolvedColumns {
            open: require(frame, OPEN, ticker)?,
            high: require(frame, HIGH, ticker)?,
            low: require(frame, LOW, ticker)?,
            price,
            volume: require(frame, VOLUME, ticker)?,
            price_field,
        })
    }
}

/// Position of the column naming `field`, preferring one that also carries
/// the ticker as a level. The ticker level itself never names a field.
fn find_column(frame: &RawFrame, field: &str, ticker: &str) -> Option<usize> {
    let candidates: Vec<usize> = frame
        .columns()
        .iter()
        .enumerate()
        .filter(|(_, label)| label.names_field_for(field, ticker))
        .map(|(position, _)| position)
        .collect();

    candidates
        .iter()
        .copied()
        .find(|&position| frame.columns()[position].has_level(ticker))
        .or_else(|| candidates.first().copied())
}

fn require(frame: &RawFrame, field: &str, ticker: &str) -> Result<usize> {
    find_column(frame, field, ticker).ok_or_else(|| SignalError::MissingField(field.to_string()))
}
