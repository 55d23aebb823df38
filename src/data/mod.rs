//! Raw tabular input and its normalization into a [`crate::models::PriceSeries`].

pub mod frame;
pub mod normalizer;

pub use frame::{ColumnLabel, RawFrame};
pub use normalizer::SeriesNormalizer;
