//! Market data provider interface.

use crate::data::frame::RawFrame;
use crate::services::error::DataError;
use async_trait::async_trait;
use chrono::{Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Default look-back when no start date is given: enough history for a
/// 200-day average over roughly three years.
pub const DEFAULT_LOOKBACK_DAYS: i64 = 365 * 3 + 30;

/// Bar size of the requested history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Interval {
    #[default]
    Daily,
}

impl Interval {
    pub fn as_str(&self) -> &'static str {
        match self {
            Interval::Daily => "1d",
        }
    }
}

/// What to fetch. Missing bounds are filled in by [`HistoryRequest::date_range`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRequest {
    pub ticker: String,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub interval: Interval,
}

impl HistoryRequest {
    pub fn new(ticker: impl Into<String>) -> Self {
        Self {
            ticker: ticker.into(),
            start: None,
            end: None,
            interval: Interval::Daily,
        }
    }

    pub fn with_start(mut self, start: Option<NaiveDate>) -> Self {
        self.start = start;
        self
    }

    pub fn with_end(mut self, end: Option<NaiveDate>) -> Self {
        self.end = end;
        self
    }

    /// `(start, end)` with defaults applied relative to `today`
    pub fn date_range_from(&self, today: NaiveDate) -> (NaiveDate, NaiveDate) {
        let end = self.end.unwrap_or(today);
        let start = self
            .start
            .unwrap_or_else(|| end - Duration::days(DEFAULT_LOOKBACK_DAYS));
        (start, end)
    }

    pub fn date_range(&self) -> (NaiveDate, NaiveDate) {
        self.date_range_from(Utc::now().date_naive())
    }
}

#[async_trait]
pub trait MarketDataProvider {
    /// Raw price table for the requested ticker and window
    async fn fetch_history(&self, request: &HistoryRequest) -> Result<RawFrame, DataError>;
}
