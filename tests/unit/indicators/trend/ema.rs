//! Unit tests for EMA indicator

use chrono::NaiveDate;
use ma_signals::indicators::trend::{calculate_ema, ema_series, smoothing_factor};
use ma_signals::models::PriceSeries;
use ma_signals::SignalError;

fn create_test_series(count: usize, base_price: f64) -> PriceSeries {
    let closes: Vec<f64> = (0..count).map(|i| base_price + i as f64 * 0.1).collect();
    PriceSeries::from_closes("TEST", NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(), &closes).unwrap()
}

#[test]
fn test_smoothing_factor() {
    assert_eq!(smoothing_factor(9), 0.2);
    assert_eq!(smoothing_factor(1), 1.0);
}

#[test]
fn test_ema_seeded_by_first_value() {
    for span in [1, 2, 12, 26, 200] {
        let ema = ema_series(&[3.7, 4.2, 5.1], span);
        assert_eq!(ema[0], 3.7);
    }
}

#[test]
fn test_ema_recurrence() {
    // span 3 -> alpha 0.5
    let ema = ema_series(&[1.0, 2.0, 3.0], 3);
    assert_eq!(ema, vec![1.0, 1.5, 2.25]);
}

#[test]
fn test_ema_has_no_warm_up_gap() {
    let series = create_test_series(10, 100.0);
    let ema = calculate_ema(&series, 26).unwrap();
    assert_eq!(ema.len(), 10);
    assert!(ema.iter().all(|v| v.is_finite()));
}

#[test]
fn test_ema_empty_input() {
    assert!(ema_series(&[], 5).is_empty());
}

#[test]
fn test_ema_zero_span_rejected() {
    let series = create_test_series(10, 100.0);
    assert!(matches!(
        calculate_ema(&series, 0),
        Err(SignalError::InvalidSpan(_))
    ));
}

#[test]
fn test_ema_lags_rising_prices() {
    let series = create_test_series(50, 100.0);
    let closes = series.closes();
    let ema = calculate_ema(&series, 12).unwrap();
    for i in 1..closes.len() {
        assert!(ema[i] < closes[i]);
    }
}
