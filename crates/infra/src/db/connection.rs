//! SQLite connection pool management.

use std::str::FromStr;
use std::time::Duration;

use sqlx::pool::PoolConnection;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use sqlx::{Sqlite, Transaction};
use tracing::info;

use crate::config::AppConfig;
use crate::error::ServiceResult;

const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS products (
        product_id  TEXT PRIMARY KEY NOT NULL,
        name        TEXT NOT NULL,
        description TEXT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS locations (
        location_id TEXT PRIMARY KEY NOT NULL,
        name        TEXT NOT NULL,
        address     TEXT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS movements (
        movement_id   TEXT PRIMARY KEY NOT NULL,
        timestamp_us  INTEGER NOT NULL,
        from_location TEXT NULL REFERENCES locations (location_id),
        to_location   TEXT NULL REFERENCES locations (location_id),
        product_id    TEXT NOT NULL REFERENCES products (product_id),
        qty           INTEGER NOT NULL CHECK (qty BETWEEN 1 AND 2147483647),
        CHECK (from_location IS NOT NULL OR to_location IS NOT NULL)
    )
    "#,
    "CREATE INDEX IF NOT EXISTS movements_by_time ON movements (timestamp_us DESC)",
    "CREATE INDEX IF NOT EXISTS movements_by_product ON movements (product_id)",
];

/// Wrapper around the sqlx SQLite connection pool.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open the pool described by `config` and make sure the schema exists.
    pub async fn connect(config: &AppConfig) -> ServiceResult<Self> {
        info!(
            url = %config.database_url,
            max_connections = config.max_connections,
            "connecting to SQLite"
        );

        let mut options = SqliteConnectOptions::from_str(&config.database_url)?
            .create_if_missing(true)
            .foreign_keys(true)
            .busy_timeout(Duration::from_secs(5));
        if !config.is_in_memory() {
            // Readers keep going while a writer holds the lock.
            options = options.journal_mode(SqliteJournalMode::Wal);
        }

        let mut pool_options = SqlitePoolOptions::new().max_connections(config.max_connections);
        if config.is_in_memory() {
            // Every connection to `:memory:` is its own database: pin exactly one.
            pool_options = pool_options
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None);
        }

        let pool = pool_options.connect_with(options).await?;
        let db = Self { pool };
        db.ensure_schema().await?;

        info!("database ready");
        Ok(db)
    }

    /// Convenience for tests: a fresh in-memory database with the schema applied.
    pub async fn in_memory() -> ServiceResult<Self> {
        Self::connect(&AppConfig::in_memory()).await
    }

    async fn ensure_schema(&self) -> ServiceResult<()> {
        for statement in SCHEMA {
            sqlx::query(*statement).execute(&self.pool).await?;
        }
        Ok(())
    }

    /// Start a write transaction; dropping it without `commit` rolls back.
    ///
    /// `BEGIN IMMEDIATE` takes the write lock up front, so concurrent writers
    /// wait on `busy_timeout` instead of failing to upgrade a read lock.
    pub async fn begin(&self) -> ServiceResult<Transaction<'static, Sqlite>> {
        Ok(self.pool.begin_with("BEGIN IMMEDIATE").await?)
    }

    /// A pooled connection for single-statement reads.
    pub async fn acquire(&self) -> ServiceResult<PoolConnection<Sqlite>> {
        Ok(self.pool.acquire().await?)
    }

    pub async fn health_check(&self) -> ServiceResult<bool> {
        let one: i64 = sqlx::query_scalar("SELECT 1").fetch_one(&self.pool).await?;
        Ok(one == 1)
    }

    pub async fn close(&self) {
        self.pool.close().await;
        info!("database pool closed");
    }
}
