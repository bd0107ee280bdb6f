use std::str::FromStr;
use std::time::Duration;

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;
use tracing::info;

use crate::error::SyncError;

/// Shared Postgres handle.
///
/// The pool is created lazily so the process can come up (and serve its
/// status endpoint) even while the store is down; each pass re-checks
/// connectivity with `ping` before touching progress state.
#[derive(Clone)]
pub struct Db {
    pub pool: PgPool,
}

impl Db {
    pub fn connect_lazy(database_url: &str, max_connections: u32) -> anyhow::Result<Self> {
        let connect_options = PgConnectOptions::from_str(database_url)?;
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(600))
            .connect_lazy_with(connect_options);
        Ok(Self { pool })
    }

    /// Round-trip connectivity check, run at pass start.
    pub async fn ping(&self) -> Result<(), SyncError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map(|_| ())
            .map_err(|source| SyncError::Connection { source })
    }

    /// Idempotent schema bootstrap. No migration framework: the schema is
    /// two tables and the service must run against whatever already exists.
    pub async fn ensure_schema(&self) -> Result<(), SyncError> {
        for ddl in [
            "CREATE TABLE IF NOT EXISTS products (
                 product_id BIGINT PRIMARY KEY,
                 doc JSONB NOT NULL,
                 updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
             )",
            "CREATE TABLE IF NOT EXISTS product_ids (
                 product_id BIGINT PRIMARY KEY
             )",
        ] {
            sqlx::query(ddl)
                .execute(&self.pool)
                .await
                .map_err(|source| SyncError::Connection { source })?;
        }
        info!("schema ensured");
        Ok(())
    }
}
