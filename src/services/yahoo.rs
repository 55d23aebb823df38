//! Yahoo Finance chart API provider

use crate::data::frame::{ColumnLabel, RawFrame};
use crate::services::error::DataError;
use crate::services::market_data::{HistoryRequest, MarketDataProvider};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate};
use serde::Deserialize;
use tracing::{debug, info};
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartResult,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    result: Option<Vec<ChartData>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartData {
    meta: Option<ChartMeta>,
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChartMeta {
    gmtoffset: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    quote: Vec<QuoteData>,
    adjclose: Option<Vec<AdjClose>>,
}

#[derive(Debug, Default, Deserialize)]
struct QuoteData {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<f64>>,
}

#[derive(Debug, Deserialize)]
struct AdjClose {
    adjclose: Vec<Option<f64>>,
}

/// Fetches daily history from the public chart endpoint.
///
/// Columns are labelled `[field, ticker]`, the shape a multi-symbol download
/// produces, so the normalizer sees the same layout for one or many tickers.
#[derive(Debug, Clone)]
pub struct YahooMarketDataProvider {
    base_url: String,
    client: reqwest::Client,
}

impl YahooMarketDataProvider {
    pub fn new() -> Result<Self, DataError> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, DataError> {
        let client = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self {
            base_url: base_url.into(),
            client,
        })
    }

    fn build_url(&self, request: &HistoryRequest) -> Result<Url, DataError> {
        let (start, end) = request.date_range();
        if start > end {
            return Err(DataError::InvalidDate(format!(
                "start {} is after end {}",
                start, end
            )));
        }

        let mut url = Url::parse(&self.base_url)?;
        url.path_segments_mut()
            .map_err(|_| DataError::InvalidUrl(self.base_url.clone()))?
            .pop_if_empty()
            .push(&request.ticker);
        url.query_pairs_mut()
            .append_pair("period1", &unix_midnight(start).to_string())
            .append_pair("period2", &unix_midnight(end).to_string())
            .append_pair("interval", request.interval.as_str())
            .append_pair("events", "div,splits")
            .append_pair("includeAdjustedClose", "true");
        Ok(url)
    }
}

#[async_trait]
impl MarketDataProvider for YahooMarketDataProvider {
    async fn fetch_history(&self, request: &HistoryRequest) -> Result<RawFrame, DataError> {
        let url = self.build_url(request)?;
        info!(ticker = %request.ticker, "Fetching price history");
        debug!(url = %url, "Chart request");

        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        match serde_json::from_str::<ChartResponse>(&body) {
            Ok(parsed) => parse_chart(parsed, &request.ticker),
            Err(_) if !status.is_success() => Err(DataError::Api {
                code: status.as_u16().to_string(),
                description: body.chars().take(200).collect(),
            }),
            Err(e) => Err(e.into()),
        }
    }
}

fn unix_midnight(date: NaiveDate) -> i64 {
    date.and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc().timestamp())
        .unwrap_or_default()
}

fn parse_chart(response: ChartResponse, ticker: &str) -> Result<RawFrame, DataError> {
    if let Some(error) = response.chart.error {
        return Err(DataError::Api {
            code: error.code,
            description: error.description,
        });
    }

    let data = response
        .chart
        .result
        .and_then(|results| results.into_iter().next())
        .ok_or_else(|| DataError::NoData(ticker.to_string()))?;

    if data.timestamp.is_empty() {
        return Err(DataError::NoData(ticker.to_string()));
    }

    // bar timestamps are exchange-local session starts; shift before taking the date
    let offset = data.meta.and_then(|m| m.gmtoffset).unwrap_or(0);
    let index = data
        .timestamp
        .iter()
        .map(|&ts| {
            DateTime::from_timestamp(ts + offset, 0)
                .map(|dt| dt.date_naive())
                .ok_or_else(|| DataError::InvalidDate(format!("timestamp {} out of range", ts)))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let quote = data.indicators.quote.into_iter().next().unwrap_or_default();
    let label = |field: &str| ColumnLabel::new([field, ticker]);

    let mut frame = RawFrame::new(index)
        .with_column(label("Open"), quote.open)
        .with_column(label("High"), quote.high)
        .with_column(label("Low"), quote.low)
        .with_column(label("Close"), quote.close);

    if let Some(adj) = data
        .indicators
        .adjclose
        .and_then(|adj| adj.into_iter().next())
    {
        frame.push_column(label("Adj Close"), adj.adjclose);
    }

    Ok(frame.with_column(label("Volume"), quote.volume))
}
