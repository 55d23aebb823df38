//! Engine error taxonomy.
//!
//! Every variant is raised before any output is produced; the engine never
//! hands back a partially-populated series.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SignalError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignalError {
    /// The input had zero usable rows
    #[error("price series is empty")]
    EmptySeries,

    /// A required OHLCV field could not be resolved from the column labels
    #[error("missing required field: {0}")]
    MissingField(String),

    /// SMA window misconfiguration
    #[error("invalid window: {0}")]
    InvalidWindow(String),

    /// MACD span misconfiguration
    #[error("invalid span: {0}")]
    InvalidSpan(String),
}
