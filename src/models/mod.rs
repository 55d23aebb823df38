//! Shared data models spanning the engine layers.

pub mod indicators;
pub mod price;
pub mod signal;

pub use indicators::MacdIndicator;
pub use price::{PricePoint, PriceSeries};
pub use signal::{DerivedRow, DerivedSeries, Signal, Stance};
