//! Price ingestion
//!
//! Fetches daily history for a set of tickers and upserts it into the
//! `stock_data` table. A failure for one ticker is logged and the rest
//! still run.

use chrono::NaiveDate;
use clap::Parser;
use dotenvy::dotenv;
use ma_signals::data::SeriesNormalizer;
use ma_signals::db::PriceDatabase;
use ma_signals::logging;
use ma_signals::services::{HistoryRequest, MarketDataProvider, YahooMarketDataProvider};
use tracing::{error, info};

type IngestResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

#[derive(Parser, Debug)]
#[command(name = "ingest")]
#[command(about = "Fetch daily prices and upsert them into Postgres", long_about = None)]
struct Args {
    /// Tickers to fetch
    #[arg(default_values = ["AAPL", "GOOGL", "MSFT", "AMZN"])]
    tickers: Vec<String>,

    /// Start date YYYY-MM-DD (default: ~3y before end)
    #[arg(long)]
    start: Option<NaiveDate>,

    /// End date YYYY-MM-DD (default: today)
    #[arg(long)]
    end: Option<NaiveDate>,
}

#[tokio::main]
async fn main() -> IngestResult<()> {
    dotenv().ok();
    logging::init_logging();

    let args = Args::parse();
    let env = ma_signals::config::get_environment();
    info!(environment = %env, tickers = ?args.tickers, "Starting price ingestion");

    let db = PriceDatabase::new().await?;
    info!("Connected to Postgres");

    let provider = YahooMarketDataProvider::new()?;

    let mut failed = 0usize;
    for ticker in &args.tickers {
        let request = HistoryRequest::new(ticker)
            .with_start(args.start)
            .with_end(args.end);

        match ingest_ticker(&db, &provider, &request).await {
            Ok(written) => info!(ticker = %ticker, rows = written, "Stored price history"),
            Err(e) => {
                failed += 1;
                error!(ticker = %ticker, error = %e, "Failed to ingest ticker");
            }
        }
    }

    info!(
        succeeded = args.tickers.len() - failed,
        failed, "Ingestion finished"
    );
    Ok(())
}

async fn ingest_ticker(
    db: &PriceDatabase,
    provider: &YahooMarketDataProvider,
    request: &HistoryRequest,
) -> IngestResult<u64> {
    let frame = provider.fetch_history(request).await?;
    let series = SeriesNormalizer::default().normalize(&frame, &request.ticker)?;
    db.upsert_prices(series.ticker(), series.points()).await
}
