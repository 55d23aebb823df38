//! Normalized daily price records.

use crate::config::PriceField;
use crate::error::{Result, SignalError};
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// One daily bar. `close` holds the authoritative price for the series'
/// resolved [`PriceField`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub timestamp: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl PricePoint {
    pub fn new(timestamp: NaiveDate, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
        }
    }
}

/// Ordered, non-empty sequence of [`PricePoint`]s with strictly increasing
/// timestamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    ticker: String,
    price_field: PriceField,
    points: Vec<PricePoint>,
}

impl PriceSeries {
    /// Build a series, sorting by timestamp. When a date repeats, the later
    /// occurrence in `points` wins.
    pub fn new(
        ticker: impl Into<String>,
        price_field: PriceField,
        mut points: Vec<PricePoint>,
    ) -> Result<Self> {
        if points.is_empty() {
            return Err(SignalError::EmptySeries);
        }

        // stable: equal dates keep their input order, so the last one is the newest
        points.sort_by_key(|p| p.timestamp);

        let mut ordered: Vec<PricePoint> = Vec::with_capacity(points.len());
        for point in points {
            match ordered.last_mut() {
                Some(last) if last.timestamp == point.timestamp => *last = point,
                _ => ordered.push(point),
            }
        }

        Ok(Self {
            ticker: ticker.into(),
            price_field,
            points: ordered,
        })
    }

    /// Series of flat bars (open = high = low = close) on consecutive days.
    pub fn from_closes(ticker: impl Into<String>, start: NaiveDate, closes: &[f64]) -> Result<Self> {
        let points = closes
            .iter()
            .enumerate()
            .map(|(i, &close)| {
                PricePoint::new(start + Duration::days(i as i64), close, close, close, close, 0.0)
            })
            .collect();
        Self::new(ticker, PriceField::Close, points)
    }

    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    /// The price field `close` was taken from
    pub fn price_field(&self) -> PriceField {
        self.price_field
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.close).collect()
    }

    pub fn first(&self) -> Option<&PricePoint> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&PricePoint> {
        self.points.last()
    }
}
