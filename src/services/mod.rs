//! Market data sources feeding the normalizer.

pub mod csv_source;
pub mod error;
pub mod market_data;
pub mod yahoo;

pub use csv_source::CsvMarketDataProvider;
pub use error::DataError;
pub use market_data::{HistoryRequest, Interval, MarketDataProvider};
pub use yahoo::YahooMarketDataProvider;
