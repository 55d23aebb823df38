//! Errors raised while retrieving raw price data.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DataError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error("invalid date: {0}")]
    InvalidDate(String),

    #[error("API error [{code}]: {description}")]
    Api { code: String, description: String },

    #[error("no data returned for {0}")]
    NoData(String),
}
