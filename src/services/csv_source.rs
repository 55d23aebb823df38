//! Price history loaded from a CSV file saved by an earlier run or another tool.
//!
//! The first column is the date. One or more header rows precede the data;
//! every row whose first cell is not a date counts as another header level,
//! which covers the `Price,Close,... / Ticker,QQQ,... / Date,,...` layout.

use crate::data::frame::{ColumnLabel, RawFrame};
use crate::services::error::DataError;
use crate::services::market_data::{HistoryRequest, MarketDataProvider};
use async_trait::async_trait;
use chrono::NaiveDate;
use csv::StringRecord;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use tracing::info;

pub struct CsvMarketDataProvider {
    path: PathBuf,
}

impl CsvMarketDataProvider {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

#[async_trait]
impl MarketDataProvider for CsvMarketDataProvider {
    /// Reads the whole file, then keeps rows inside the explicitly requested
    /// bounds. Missing bounds do not filter.
    async fn fetch_history(&self, request: &HistoryRequest) -> Result<RawFrame, DataError> {
        info!(path = %self.path.display(), ticker = %request.ticker, "Loading price history from CSV");
        let file = File::open(&self.path)?;
        let frame = read_price_csv(BufReader::new(file))?;
        Ok(filter_dates(frame, request.start, request.end))
    }
}

/// Parse a date cell; anything after the `YYYY-MM-DD` prefix (time, offset)
/// is ignored.
pub fn parse_date(cell: &str) -> Option<NaiveDate> {
    let cell = cell.trim();
    let prefix = cell.get(..10).unwrap_or(cell);
    NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok()
}

/// Read a date-indexed price table. Non-numeric or empty cells become `None`.
pub fn read_price_csv<R: Read>(reader: R) -> Result<RawFrame, DataError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut header_rows: Vec<StringRecord> = Vec::new();
    let mut index = Vec::new();
    let mut cells: Vec<Vec<Option<f64>>> = Vec::new();

    for record in reader.records() {
        let record = record?;
        let first = record.get(0).unwrap_or("");

        match parse_date(first) {
            Some(date) if !header_rows.is_empty() => {
                index.push(date);
                cells.push(
                    record
                        .iter()
                        .skip(1)
                        .map(|cell| cell.parse::<f64>().ok())
                        .collect(),
                );
            }
            _ if index.is_empty() => header_rows.push(record),
            _ => {
                return Err(DataError::InvalidDate(format!(
                    "row {} starts with '{}'",
                    header_rows.len() + index.len() + 1,
                    first
                )))
            }
        }
    }

    let width = header_rows.first().map(|h| h.len().saturating_sub(1)).unwrap_or(0);
    if width == 0 {
        return Err(DataError::NoData("CSV input has no columns".to_string()));
    }

    let mut frame = RawFrame::new(index);
    for column in 0..width {
        let label = ColumnLabel::new(
            header_rows
                .iter()
                .filter_map(|row| row.get(column + 1))
                .filter(|level| !level.is_empty())
                .map(str::to_string),
        );
        let values = cells
            .iter()
            .map(|row| row.get(column).copied().flatten())
            .collect();
        frame.push_column(label, values);
    }

    Ok(frame)
}

fn filter_dates(frame: RawFrame, start: Option<NaiveDate>, end: Option<NaiveDate>) -> RawFrame {
    if start.is_none() && end.is_none() {
        return frame;
    }

    let keep: Vec<usize> = frame
        .index()
        .iter()
        .enumerate()
        .filter(|(_, date)| start.map_or(true, |s| **date >= s) && end.map_or(true, |e| **date <= e))
        .map(|(i, _)| i)
        .collect();

    let mut filtered = RawFrame::new(keep.iter().map(|&i| frame.index()[i]).collect());
    for (position, label) in frame.columns().iter().enumerate() {
        let column = frame.column(position).unwrap_or_default();
        let values = keep
            .iter()
            .map(|&i| column.get(i).copied().flatten())
            .collect();
        filtered.push_column(label.clone(), values);
    }
    filtered
}
