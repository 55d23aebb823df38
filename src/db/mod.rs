//! Persistence for fetched price history.

pub mod postgres;

pub use postgres::PriceDatabase;
