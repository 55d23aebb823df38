//! Postgres (TimescaleDB-compatible) storage for daily price bars

use crate::config;
use crate::models::price::PricePoint;
use chrono::{DateTime, NaiveDate, Utc};
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio_postgres::{Client, NoTls};

pub type DbResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

fn db_error(context: &str, e: tokio_postgres::Error) -> Box<dyn std::error::Error + Send + Sync> {
    Box::new(std::io::Error::other(format!("{}: {}", context, e)))
}

pub struct PriceDatabase {
    client: Arc<RwLock<Client>>,
}

impl PriceDatabase {
    /// Connect using [`config::get_database_url`] and make sure the table exists
    pub async fn new() -> DbResult<Self> {
        Self::connect(&config::get_database_url()).await
    }

    pub async fn connect(database_url: &str) -> DbResult<Self> {
        let (client, connection) = tokio_postgres::connect(database_url, NoTls)
            .await
            .map_err(|e| {
                Box::new(std::io::Error::new(
                    std::io::ErrorKind::ConnectionRefused,
                    format!("Failed to connect to Postgres: {}", e),
                )) as Box<dyn std::error::Error + Send + Sync>
            })?;

        // Spawn connection task
        tokio::spawn(async move {
            if let Err(e) = connection.await {
                tracing::error!(error = %e, "Postgres connection error");
            }
        });

        let db = Self {
            client: Arc::new(RwLock::new(client)),
        };
        db.init_schema().await?;

        Ok(db)
    }

    async fn init_schema(&self) -> DbResult<()> {
        let client = self.client.read().await;
        client
            .execute(
                "CREATE TABLE IF NOT EXISTS stock_data (
                    symbol VARCHAR(10) NOT NULL,
                    timestamp TIMESTAMPTZ NOT NULL,
                    open DOUBLE PRECISION,
                    high DOUBLE PRECISION,
                    low DOUBLE PRECISION,
                    close DOUBLE PRECISION,
                    volume BIGINT,
                    PRIMARY KEY (symbol, timestamp)
                )",
                &[],
            )
            .await
            .map_err(|e| db_error("Failed to create stock_data table", e))?;

        // Hypertable conversion only exists with the TimescaleDB extension
        if let Err(e) = client
            .execute(
                "SELECT create_hypertable('stock_data', 'timestamp', if_not_exists => TRUE)",
                &[],
            )
            .await
        {
            tracing::debug!(error = %e, "Skipping hypertable conversion");
        }

        Ok(())
    }

    /// Insert or update every bar of `points` for `symbol` in one transaction.
    /// Returns the number of rows written.
    pub async fn upsert_prices(&self, symbol: &str, points: &[PricePoint]) -> DbResult<u64> {
        let mut client = self.client.write().await;
        let tx = client
            .transaction()
            .await
            .map_err(|e| db_error("Failed to open transaction", e))?;

        let statement = tx
            .prepare(
                "INSERT INTO stock_data (symbol, timestamp, open, high, low, close, volume)
                 VALUES ($1, $2, $3, $4, $5, $6, $7)
                 ON CONFLICT (symbol, timestamp) DO UPDATE
                 SET open = EXCLUDED.open,
                     high = EXCLUDED.high,
                     low = EXCLUDED.low,
                     close = EXCLUDED.close,
                     volume = EXCLUDED.volume",
            )
            .await
            .map_err(|e| db_error("Failed to prepare upsert", e))?;

        let mut written = 0;
        for point in points {
            let timestamp = date_to_utc(point.timestamp);
            let volume = point.volume.round() as i64;
            written += tx
                .execute(
                    &statement,
                    &[
                        &symbol,
                        &timestamp,
                        &point.open,
                        &point.high,
                        &point.low,
                        &point.close,
                        &volume,
                    ],
                )
                .await
                .map_err(|e| db_error("Failed to upsert price", e))?;
        }

        tx.commit()
            .await
            .map_err(|e| db_error("Failed to commit prices", e))?;

        Ok(written)
    }

    /// Stored bars for `symbol`, oldest first
    pub async fn get_prices(&self, symbol: &str) -> DbResult<Vec<PricePoint>> {
        let client = self.client.read().await;
        let rows = client
            .query(
                "SELECT timestamp, open, high, low, close, volume
                 FROM stock_data
                 WHERE symbol = $1
                 ORDER BY timestamp ASC",
                &[&symbol],
            )
            .await
            .map_err(|e| db_error("Failed to query prices", e))?;

        let mut points = Vec::with_capacity(rows.len());
        for row in rows {
            let timestamp: DateTime<Utc> = row.get(0);
            let open: Option<f64> = row.get(1);
            let high: Option<f64> = row.get(2);
            let low: Option<f64> = row.get(3);
            let close: Option<f64> = row.get(4);
            let volume: Option<i64> = row.get(5);

            if let (Some(open), Some(high), Some(low), Some(close), Some(volume)) =
                (open, high, low, close, volume)
            {
                points.push(PricePoint::new(
                    timestamp.date_naive(),
                    open,
                    high,
                    low,
                    close,
                    volume as f64,
                ));
            }
        }

        Ok(points)
    }
}

fn date_to_utc(date: NaiveDate) -> DateTime<Utc> {
    date.and_hms_opt(0, 0, 0).unwrap_or_default().and_utc()
}
