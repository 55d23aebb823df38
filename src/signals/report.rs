//! Signal reporter: filters a derived series down to its crossover rows and
//! renders them as text or CSV. No indicator math happens here.

use crate::config::{MacdParams, SmaParams};
use crate::models::signal::{DerivedRow, DerivedSeries, Signal, Stance};
use chrono::NaiveDate;
use serde::Serialize;
use std::io::Write;

/// Crossover rows retained for display, plus the latest stance
#[derive(Debug, Clone, PartialEq)]
pub struct SignalReport {
    pub ticker: String,
    pub sma: SmaParams,
    pub macd: Option<MacdParams>,
    pub rows: Vec<DerivedRow>,
    pub stance: Option<Stance>,
}

impl SignalReport {
    /// Keep rows whose signal is not `Hold`, truncated to the last `last_n`
    /// when given.
    pub fn build(derived: &DerivedSeries, last_n: Option<usize>) -> Self {
        let mut rows: Vec<DerivedRow> = derived.signal_rows().cloned().collect();
        if let Some(n) = last_n {
            let skip = rows.len().saturating_sub(n);
            rows.drain(..skip);
        }

        Self {
            ticker: derived.ticker.clone(),
            sma: derived.sma,
            macd: derived.macd,
            rows,
            stance: derived.latest_stance(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn header(&self) -> String {
        format!(
            "SMA crossover signals for {} (short={}, long={}):",
            self.ticker, self.sma.short_window, self.sma.long_window
        )
    }

    /// One line per retained row
    pub fn summary_lines(&self) -> Vec<String> {
        self.rows
            .iter()
            .map(|row| format_signal_row(row, &self.sma))
            .collect()
    }

    /// e.g. `Latest stance: BULLISH (50>200)`
    pub fn stance_line(&self) -> Option<String> {
        let (short, long) = (self.sma.short_window, self.sma.long_window);
        self.stance.map(|stance| match stance {
            Stance::Bullish => format!("Latest stance: {} ({}>{})", stance, short, long),
            Stance::Bearish => format!("Latest stance: {} ({}<={})", stance, short, long),
        })
    }

    /// Full-precision export of the retained rows
    pub fn write_csv<W: Write>(&self, writer: W) -> csv::Result<()> {
        write_rows_csv(&self.rows, writer)
    }
}

/// `2024-03-01 | BUY | Close=101.25 SMA50=99.80 SMA200=98.10`, with MACD
/// fields appended when present.
pub fn format_signal_row(row: &DerivedRow, sma: &SmaParams) -> String {
    let mut line = format!(
        "{} | {} | Close={:.2} SMA{}={} SMA{}={}",
        row.timestamp,
        row.signal,
        row.close,
        sma.short_window,
        format_optional(row.sma_short),
        sma.long_window,
        format_optional(row.sma_long),
    );
    if let Some(macd) = row.macd {
        line.push_str(&format!(
            " MACD={:.2} Signal={:.2} Hist={:.2}",
            macd.macd, macd.signal, macd.histogram
        ));
    }
    line
}

fn format_optional(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.2}", v),
        None => "n/a".to_string(),
    }
}

/// Column names of [`ExportRecord`], in field order
const EXPORT_COLUMNS: [&str; 12] = [
    "timestamp",
    "open",
    "high",
    "low",
    "close",
    "volume",
    "sma_short",
    "sma_long",
    "signal",
    "macd",
    "macd_signal",
    "macd_hist",
];

/// Flat CSV record; undefined values become empty cells
#[derive(Debug, Serialize)]
struct ExportRecord {
    timestamp: NaiveDate,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volume: f64,
    sma_short: Option<f64>,
    sma_long: Option<f64>,
    signal: Signal,
    macd: Option<f64>,
    macd_signal: Option<f64>,
    macd_hist: Option<f64>,
}

impl From<&DerivedRow> for ExportRecord {
    fn from(row: &DerivedRow) -> Self {
        Self {
            timestamp: row.timestamp,
            open: row.open,
            high: row.high,
            low: row.low,
            close: row.close,
            volume: row.volume,
            sma_short: row.sma_short,
            sma_long: row.sma_long,
            signal: row.signal,
            macd: row.macd.map(|m| m.macd),
            macd_signal: row.macd.map(|m| m.signal),
            macd_hist: row.macd.map(|m| m.histogram),
        }
    }
}

/// Write `rows` as CSV. The header line is written even when there are no
/// rows.
pub fn write_rows_csv<'a, W, I>(rows: I, writer: W) -> csv::Result<()>
where
    W: Write,
    I: IntoIterator<Item = &'a DerivedRow>,
{
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    writer.write_record(EXPORT_COLUMNS)?;
    for row in rows {
        writer.serialize(ExportRecord::from(row))?;
    }
    writer.flush()?;
    Ok(())
}
