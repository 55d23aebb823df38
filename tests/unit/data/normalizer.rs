//! Unit tests for the series normalizer

use chrono::NaiveDate;
use ma_signals::config::PriceField;
use ma_signals::data::{ColumnLabel, RawFrame, SeriesNormalizer};
use ma_signals::SignalError;

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
}

fn values(v: &[f64]) -> Vec<Option<f64>> {
    v.iter().copied().map(Some).collect()
}

fn flat_frame(closes: &[f64]) -> RawFrame {
    let index = (1..=closes.len() as u32).map(day).collect();
    RawFrame::new(index)
        .with_column(ColumnLabel::flat("Open"), values(closes))
        .with_column(ColumnLabel::flat("High"), values(closes))
        .with_column(ColumnLabel::flat("Low"), values(closes))
        .with_column(ColumnLabel::flat("Close"), values(closes))
        .with_column(ColumnLabel::flat("Volume"), values(&vec![100.0; closes.len()]))
}

fn multi_symbol_frame() -> RawFrame {
    let mut frame = RawFrame::new(vec![day(1), day(2)]);
    for ticker in ["SPY", "QQQ"] {
        let base = if ticker == "QQQ" { 400.0 } else { 500.0 };
        for field in ["Open", "High", "Low", "Close", "Adj Close", "Volume"] {
            let offset = if field == "Adj Close" { -1.0 } else { 0.0 };
            frame.push_column(
                ColumnLabel::new([field, ticker]),
                values(&[base + offset, base + 1.0 + offset]),
            );
        }
    }
    frame
}

#[test]
fn test_flat_frame() {
    let series = SeriesNormalizer::default()
        .normalize(&flat_frame(&[1.0, 2.0, 3.0]), "QQQ")
        .unwrap();
    assert_eq!(series.closes(), vec![1.0, 2.0, 3.0]);
    assert_eq!(series.price_field(), PriceField::Close);
    assert_eq!(series.points()[0].volume, 100.0);
}

#[test]
fn test_hierarchical_labels_prefer_ticker() {
    let series = SeriesNormalizer::new(PriceField::Close)
        .normalize(&multi_symbol_frame(), "QQQ")
        .unwrap();
    assert_eq!(series.closes(), vec![400.0, 401.0]);

    let series = SeriesNormalizer::new(PriceField::Close)
        .normalize(&multi_symbol_frame(), "spy")
        .unwrap();
    assert_eq!(series.closes(), vec![500.0, 501.0]);
}

#[test]
fn test_ticker_spelled_like_a_field() {
    let fields = ["Open", "High", "Low", "Close", "Volume"];
    for ticker in ["LOW", "OPEN", "close"] {
        let mut frame = RawFrame::new(vec![day(1)]);
        for (i, field) in fields.iter().enumerate() {
            frame.push_column(ColumnLabel::new([*field, ticker]), values(&[i as f64 + 1.0]));
        }

        let series = SeriesNormalizer::default().normalize(&frame, ticker).unwrap();
        let p = &series.points()[0];
        assert_eq!(
            (p.open, p.high, p.low, p.close, p.volume),
            (1.0, 2.0, 3.0, 4.0, 5.0),
            "ticker {}",
            ticker
        );
    }
}

#[test]
fn test_ticker_level_does_not_satisfy_missing_field() {
    let frame = RawFrame::new(vec![day(1)])
        .with_column(ColumnLabel::new(["Open", "LOW"]), values(&[1.0]))
        .with_column(ColumnLabel::new(["High", "LOW"]), values(&[2.0]))
        .with_column(ColumnLabel::new(["Close", "LOW"]), values(&[4.0]))
        .with_column(ColumnLabel::new(["Volume", "LOW"]), values(&[5.0]));

    let result = SeriesNormalizer::default().normalize(&frame, "LOW");
    assert_eq!(result, Err(SignalError::MissingField("Low".to_string())));
}

#[test]
fn test_auto_prefers_adjusted_close() {
    let series = SeriesNormalizer::new(PriceField::Auto)
        .normalize(&multi_symbol_frame(), "QQQ")
        .unwrap();
    assert_eq!(series.price_field(), PriceField::AdjClose);
    assert_eq!(series.closes(), vec![399.0, 400.0]);
}

#[test]
fn test_auto_falls_back_to_close() {
    let series = SeriesNormalizer::new(PriceField::Auto)
        .normalize(&flat_frame(&[5.0, 6.0]), "QQQ")
        .unwrap();
    assert_eq!(series.price_field(), PriceField::Close);
    assert_eq!(series.closes(), vec![5.0, 6.0]);
}

#[test]
fn test_adjusted_close_required_when_requested() {
    let result = SeriesNormalizer::new(PriceField::AdjClose).normalize(&flat_frame(&[5.0]), "QQQ");
    assert_eq!(result, Err(SignalError::MissingField("Adj Close".to_string())));
}

#[test]
fn test_label_matching_ignores_case_and_separators() {
    let frame = RawFrame::new(vec![day(1)])
        .with_column(ColumnLabel::flat("open"), values(&[1.0]))
        .with_column(ColumnLabel::flat("HIGH"), values(&[2.0]))
        .with_column(ColumnLabel::flat("low"), values(&[0.5]))
        .with_column(ColumnLabel::flat("close"), values(&[1.5]))
        .with_column(ColumnLabel::flat("adj_close"), values(&[1.4]))
        .with_column(ColumnLabel::flat("volume"), values(&[10.0]));

    let series = SeriesNormalizer::new(PriceField::AdjClose)
        .normalize(&frame, "QQQ")
        .unwrap();
    assert_eq!(series.closes(), vec![1.4]);
    assert_eq!(series.points()[0].high, 2.0);
}

#[test]
fn test_missing_volume_column() {
    let frame = RawFrame::new(vec![day(1)])
        .with_column(ColumnLabel::flat("Open"), values(&[1.0]))
        .with_column(ColumnLabel::flat("High"), values(&[1.0]))
        .with_column(ColumnLabel::flat("Low"), values(&[1.0]))
        .with_column(ColumnLabel::flat("Close"), values(&[1.0]));

    let result = SeriesNormalizer::default().normalize(&frame, "QQQ");
    assert_eq!(result, Err(SignalError::MissingField("Volume".to_string())));
}

#[test]
fn test_empty_frame() {
    let result = SeriesNormalizer::default().normalize(&RawFrame::new(Vec::new()), "QQQ");
    assert_eq!(result, Err(SignalError::EmptySeries));
}

#[test]
fn test_incomplete_rows_dropped() {
    let mut frame = flat_frame(&[1.0, 2.0, 3.0]);
    let mut with_gap = RawFrame::new(frame.index().to_vec());
    for (position, label) in frame.columns().to_vec().into_iter().enumerate() {
        let mut column = frame.column(position).unwrap().to_vec();
        if label.names_field("Close") {
            column[1] = None;
        }
        if label.names_field("Low") {
            column[2] = Some(f64::NAN);
        }
        with_gap.push_column(label, column);
    }
    frame = with_gap;

    let series = SeriesNormalizer::default().normalize(&frame, "QQQ").unwrap();
    assert_eq!(series.closes(), vec![1.0]);
}

#[test]
fn test_all_rows_incomplete_is_empty() {
    let frame = RawFrame::new(vec![day(1), day(2)])
        .with_column(ColumnLabel::flat("Open"), vec![None, None])
        .with_column(ColumnLabel::flat("High"), vec![None, None])
        .with_column(ColumnLabel::flat("Low"), vec![None, None])
        .with_column(ColumnLabel::flat("Close"), vec![None, None])
        .with_column(ColumnLabel::flat("Volume"), vec![None, None]);

    let result = SeriesNormalizer::default().normalize(&frame, "QQQ");
    assert_eq!(result, Err(SignalError::EmptySeries));
}

#[test]
fn test_unsorted_index_with_duplicates() {
    let frame = RawFrame::new(vec![day(3), day(1), day(3), day(2)])
        .with_column(ColumnLabel::flat("Open"), values(&[3.0, 1.0, 30.0, 2.0]))
        .with_column(ColumnLabel::flat("High"), values(&[3.0, 1.0, 30.0, 2.0]))
        .with_column(ColumnLabel::flat("Low"), values(&[3.0, 1.0, 30.0, 2.0]))
        .with_column(ColumnLabel::flat("Close"), values(&[3.0, 1.0, 30.0, 2.0]))
        .with_column(ColumnLabel::flat("Volume"), values(&[1.0, 1.0, 1.0, 1.0]));

    let series = SeriesNormalizer::default().normalize(&frame, "QQQ").unwrap();
    let dates: Vec<NaiveDate> = series.points().iter().map(|p| p.timestamp).collect();
    assert_eq!(dates, vec![day(1), day(2), day(3)]);
    assert_eq!(series.closes(), vec![1.0, 2.0, 30.0]);
}

#[test]
fn test_short_column_is_padded() {
    let frame = flat_frame(&[1.0, 2.0]).with_column(ColumnLabel::flat("Extra"), vec![Some(1.0)]);
    assert_eq!(frame.column(5).unwrap(), &[Some(1.0), None]);
}
