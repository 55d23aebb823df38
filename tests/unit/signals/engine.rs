//! Unit tests for signal engine

use chrono::NaiveDate;
use ma_signals::config::{MacdParams, SmaParams};
use ma_signals::models::{PriceSeries, Signal};
use ma_signals::signals::engine::SignalEngine;
use ma_signals::SignalError;

fn create_series(closes: &[f64]) -> PriceSeries {
    PriceSeries::from_closes("QQQ", NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(), closes).unwrap()
}

fn create_uptrend_series(count: usize) -> PriceSeries {
    let closes: Vec<f64> = (0..count)
        .map(|i| 100.0 + i as f64 * 0.5 + (i as f64 * 0.4).sin() * 4.0)
        .collect();
    create_series(&closes)
}

#[test]
fn test_evaluate_aligns_rows_with_input() {
    let series = create_uptrend_series(60);
    let derived = SignalEngine::evaluate(&series, &SmaParams::new(5, 20), None).unwrap();

    assert_eq!(derived.len(), series.len());
    assert_eq!(derived.ticker, "QQQ");
    for (row, point) in derived.rows.iter().zip(series.points()) {
        assert_eq!(row.timestamp, point.timestamp);
        assert_eq!(row.close, point.close);
        assert!(row.macd.is_none());
    }
}

#[test]
fn test_evaluate_with_macd() {
    let series = create_uptrend_series(60);
    let derived =
        SignalEngine::evaluate(&series, &SmaParams::new(5, 20), Some(&MacdParams::default())).unwrap();

    assert_eq!(derived.macd, Some(MacdParams::default()));
    assert!(derived.rows.iter().all(|row| row.macd.is_some()));
    let first = derived.rows[0].macd.unwrap();
    assert_eq!(first.macd, 0.0);
    assert_eq!(first.signal, 0.0);
}

#[test]
fn test_golden_cross_row() {
    let series = create_series(&[10.0, 10.0, 10.0, 10.0, 10.0, 12.0, 12.0, 12.0, 12.0, 12.0]);
    let derived = SignalEngine::evaluate(&series, &SmaParams::new(2, 4), None).unwrap();

    let signals: Vec<(NaiveDate, Signal)> = derived
        .signal_rows()
        .map(|row| (row.timestamp, row.signal))
        .collect();
    assert_eq!(
        signals,
        vec![(NaiveDate::from_ymd_opt(2024, 1, 6).unwrap(), Signal::Buy)]
    );
}

#[test]
fn test_invalid_window_produces_no_output() {
    let series = create_uptrend_series(10);
    let result = SignalEngine::evaluate(&series, &SmaParams::new(5, 20), None);
    assert!(matches!(result, Err(SignalError::InvalidWindow(_))));
}

#[test]
fn test_invalid_span_produces_no_output() {
    let series = create_uptrend_series(30);
    let result = SignalEngine::evaluate(
        &series,
        &SmaParams::new(5, 20),
        Some(&MacdParams::new(26, 12, 9)),
    );
    assert!(matches!(result, Err(SignalError::InvalidSpan(_))));
}

#[test]
fn test_evaluate_is_idempotent_and_leaves_input_untouched() {
    let series = create_uptrend_series(120);
    let before = series.clone();
    let sma = SmaParams::new(10, 30);
    let macd = MacdParams::default();

    let first = SignalEngine::evaluate(&series, &sma, Some(&macd)).unwrap();
    let second = SignalEngine::evaluate(&series, &sma, Some(&macd)).unwrap();

    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
    assert_eq!(series, before);
}

#[test]
fn test_independent_runs_in_parallel() {
    let handles: Vec<_> = (0..4)
        .map(|n| {
            std::thread::spawn(move || {
                let series = create_uptrend_series(80 + n * 10);
                SignalEngine::evaluate(&series, &SmaParams::new(5, 20), Some(&MacdParams::default()))
                    .map(|derived| derived.len())
            })
        })
        .collect();

    for (n, handle) in handles.into_iter().enumerate() {
        assert_eq!(handle.join().unwrap(), Ok(80 + n * 10));
    }
}
