use anyhow::Result;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;

/// Shared handle to the SQLite database behind the holdings table and the
/// market data cache. Clones share the underlying pool.
#[derive(Clone)]
pub struct PortfolioDb {
    pool: SqlitePool,
}

impl PortfolioDb {
    /// Open the database at `database_url`, creating the file on first use,
    /// and make sure the schema is in place.
    pub async fn new(database_url: &str) -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(SqliteConnectOptions::from_str(database_url)?.create_if_missing(true))
            .await?;

        apply_schema(&pool).await?;

        Ok(Self { pool })
    }

    /// In-memory database, used by tests.
    pub async fn in_memory() -> Result<Self> {
        Self::new("sqlite::memory:").await
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

/// `schema.sql` holds several CREATE statements; sqlx runs one statement per
/// query, so they are fed through individually.
async fn apply_schema(pool: &SqlitePool) -> Result<()> {
    for statement in include_str!("../../../schema.sql").split(';') {
        let stmt = statement.trim();
        if !stmt.is_empty() {
            sqlx::query(stmt).execute(pool).await?;
        }
    }

    Ok(())
}
