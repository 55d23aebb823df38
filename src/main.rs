//! ma-signals
//!
//! Computes short/long SMA golden/death cross signals (and optionally MACD)
//! for one ticker and prints the most recent crossovers.

use chrono::NaiveDate;
use clap::{Parser, ValueEnum};
use dotenvy::dotenv;
use ma_signals::config::{
    MacdParams, PriceField, SmaParams, DEFAULT_FAST_SPAN, DEFAULT_LAST_N, DEFAULT_LONG_WINDOW,
    DEFAULT_SHORT_WINDOW, DEFAULT_SIGNAL_SPAN, DEFAULT_SLOW_SPAN,
};
use ma_signals::data::SeriesNormalizer;
use ma_signals::db::PriceDatabase;
use ma_signals::indicators::validate_window_order;
use ma_signals::logging;
use ma_signals::models::PriceSeries;
use ma_signals::services::{
    CsvMarketDataProvider, HistoryRequest, MarketDataProvider, YahooMarketDataProvider,
};
use ma_signals::signals::{write_rows_csv, SignalEngine, SignalReport};
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use tracing::{info, warn};

type CliResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PriceFieldArg {
    Close,
    AdjClose,
    Auto,
}

impl From<PriceFieldArg> for PriceField {
    fn from(arg: PriceFieldArg) -> Self {
        match arg {
            PriceFieldArg::Close => PriceField::Close,
            PriceFieldArg::AdjClose => PriceField::AdjClose,
            PriceFieldArg::Auto => PriceField::Auto,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "ma-signals")]
#[command(about = "Compute short/long SMA crossover signals (golden/death cross)", long_about = None)]
struct Cli {
    /// Ticker symbol
    #[arg(long, default_value = "QQQ")]
    ticker: String,

    /// Start date YYYY-MM-DD (default: ~3y before end)
    #[arg(long)]
    start: Option<NaiveDate>,

    /// End date YYYY-MM-DD (default: today)
    #[arg(long)]
    end: Option<NaiveDate>,

    /// Price interval
    #[arg(long, default_value = "1d", value_parser = ["1d"])]
    interval: String,

    /// Short SMA window
    #[arg(long, default_value_t = DEFAULT_SHORT_WINDOW)]
    short: usize,

    /// Long SMA window
    #[arg(long, default_value_t = DEFAULT_LONG_WINDOW)]
    long: usize,

    /// Show last N signals
    #[arg(long, default_value_t = DEFAULT_LAST_N)]
    last: usize,

    /// Price column both averages are computed from
    #[arg(long, value_enum, default_value = "close")]
    price_field: PriceFieldArg,

    /// Also compute MACD and include it in the output
    #[arg(long)]
    macd: bool,

    /// MACD fast EMA span
    #[arg(long, default_value_t = DEFAULT_FAST_SPAN)]
    fast: usize,

    /// MACD slow EMA span
    #[arg(long, default_value_t = DEFAULT_SLOW_SPAN)]
    slow: usize,

    /// MACD signal line span
    #[arg(long = "signal", default_value_t = DEFAULT_SIGNAL_SPAN)]
    signal_span: usize,

    /// Read prices from a CSV file instead of fetching them
    #[arg(long, conflicts_with = "from_db")]
    input: Option<PathBuf>,

    /// Read prices previously stored by `ingest`
    #[arg(long)]
    from_db: bool,

    /// Save the full enriched series (all rows) as CSV
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Save only the reported signal rows as CSV
    #[arg(long)]
    signals_csv: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> CliResult<()> {
    dotenv().ok();
    logging::init_logging();

    let cli = Cli::parse();

    let sma = SmaParams::new(cli.short, cli.long);
    validate_window_order(&sma)?;
    let macd = cli
        .macd
        .then(|| MacdParams::new(cli.fast, cli.slow, cli.signal_span));

    let series = load_series(&cli).await?;
    info!(ticker = %cli.ticker, rows = series.len(), "Loaded price series");

    let derived = SignalEngine::evaluate(&series, &sma, macd.as_ref())?;
    let report = SignalReport::build(&derived, Some(cli.last));

    println!("\n{}", report.header());
    if report.is_empty() {
        println!("No crossover signals in the selected period.");
    } else {
        for line in report.summary_lines() {
            println!("{}", line);
        }
    }
    if let Some(stance) = report.stance_line() {
        println!("\n{}", stance);
    }

    if let Some(path) = &cli.csv {
        write_rows_csv(&derived.rows, BufWriter::new(File::create(path)?))?;
        println!(
            "\nSaved enriched data with SMAs and signals to: {}",
            path.display()
        );
    }

    if let Some(path) = &cli.signals_csv {
        report.write_csv(BufWriter::new(File::create(path)?))?;
        println!("\nSaved signal rows to: {}", path.display());
    }

    Ok(())
}

async fn load_series(cli: &Cli) -> CliResult<PriceSeries> {
    let request = HistoryRequest::new(&cli.ticker)
        .with_start(cli.start)
        .with_end(cli.end);

    if cli.from_db {
        if !matches!(cli.price_field, PriceFieldArg::Close) {
            warn!("Stored prices only carry Close; ignoring --price-field");
        }
        let db = PriceDatabase::new().await?;
        let points = db
            .get_prices(&cli.ticker)
            .await?
            .into_iter()
            .filter(|p| cli.start.map_or(true, |s| p.timestamp >= s))
            .filter(|p| cli.end.map_or(true, |e| p.timestamp <= e))
            .collect();
        return Ok(PriceSeries::new(&cli.ticker, PriceField::Close, points)?);
    }

    let frame = match &cli.input {
        Some(path) => CsvMarketDataProvider::new(path).fetch_history(&request).await?,
        None => {
            YahooMarketDataProvider::new()?
                .fetch_history(&request)
                .await?
        }
    };

    let normalizer = SeriesNormalizer::new(cli.price_field.into());
    Ok(normalizer.normalize(&frame, &cli.ticker)?)
}
