//! Moving-average crossover and MACD signal derivation for daily price series.
//!
//! Data flows strictly forward: a [`data::RawFrame`] is normalized into a
//! [`models::PriceSeries`], the indicator engines derive their series from it,
//! and [`signals::SignalReport`] turns the result into rows for display/export.

pub mod config;
pub mod data;
pub mod db;
pub mod error;
pub mod indicators;
pub mod logging;
pub mod models;
pub mod services;
pub mod signals;

pub use error::{Result, SignalError};
