//! Engine parameters and environment lookups.
//!
//! Engine parameters are plain values handed in by the caller. The environment
//! is only consulted for the logging format and the database connection.

use serde::{Deserialize, Serialize};
use std::env;

pub const DEFAULT_SHORT_WINDOW: usize = 50;
pub const DEFAULT_LONG_WINDOW: usize = 200;
pub const DEFAULT_FAST_SPAN: usize = 12;
pub const DEFAULT_SLOW_SPAN: usize = 26;
pub const DEFAULT_SIGNAL_SPAN: usize = 9;
pub const DEFAULT_LAST_N: usize = 10;

/// Which price column both engines read.
///
/// Resolved once per frame by the normalizer, never per row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PriceField {
    #[default]
    Close,
    AdjClose,
    /// `AdjClose` when the frame carries that column, `Close` otherwise
    Auto,
}

impl PriceField {
    pub fn label(&self) -> &'static str {
        match self {
            PriceField::Close => "Close",
            PriceField::AdjClose => "Adj Close",
            PriceField::Auto => "Auto",
        }
    }
}

/// SMA crossover windows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmaParams {
    pub short_window: usize,
    pub long_window: usize,
}

impl SmaParams {
    pub fn new(short_window: usize, long_window: usize) -> Self {
        Self {
            short_window,
            long_window,
        }
    }
}

impl Default for SmaParams {
    fn default() -> Self {
        Self::new(DEFAULT_SHORT_WINDOW, DEFAULT_LONG_WINDOW)
    }
}

/// MACD EMA spans
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacdParams {
    pub fast: usize,
    pub slow: usize,
    pub signal_span: usize,
}

impl MacdParams {
    pub fn new(fast: usize, slow: usize, signal_span: usize) -> Self {
        Self {
            fast,
            slow,
            signal_span,
        }
    }
}

impl Default for MacdParams {
    fn default() -> Self {
        Self::new(DEFAULT_FAST_SPAN, DEFAULT_SLOW_SPAN, DEFAULT_SIGNAL_SPAN)
    }
}

/// Deployment environment name (`APP_ENV`, falling back to `ENVIRONMENT`)
pub fn get_environment() -> String {
    env::var("APP_ENV")
        .or_else(|_| env::var("ENVIRONMENT"))
        .unwrap_or_else(|_| "development".to_string())
        .to_lowercase()
}

/// Postgres connection string.
///
/// `DATABASE_URL` wins; otherwise it is assembled from the libpq-style
/// `PGHOST`/`PGPORT`/`PGUSER`/`PGPASSWORD`/`PGDATABASE` variables.
pub fn get_database_url() -> String {
    if let Ok(url) = env::var("DATABASE_URL") {
        return url;
    }

    let host = env::var("PGHOST").unwrap_or_else(|_| "localhost".to_string());
    let port = env::var("PGPORT").unwrap_or_else(|_| "5432".to_string());
    let user = env::var("PGUSER").unwrap_or_else(|_| "postgres".to_string());
    let dbname = env::var("PGDATABASE").unwrap_or_else(|_| "postgres".to_string());

    let mut url = format!("host={} port={} user={} dbname={}", host, port, user, dbname);
    if let Ok(password) = env::var("PGPASSWORD") {
        url.push_str(&format!(" password={}", password));
    }
    url
}
