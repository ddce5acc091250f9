use anyhow::Result;
use portfolio_core::Holding;

use crate::db::PortfolioDb;

/// Store of portfolio positions. The whole table is replaced on each CSV
/// upload; there is no incremental update path.
#[derive(Clone)]
pub struct HoldingsStore {
    db: PortfolioDb,
}

impl HoldingsStore {
    pub fn new(db: PortfolioDb) -> Self {
        Self { db }
    }

    /// Replace the entire holding set with `holdings`.
    ///
    /// Delete and inserts run in one transaction, so readers either see the
    /// old set or the new set, never a transiently empty table.
    pub async fn replace_all(&self, holdings: &[Holding]) -> Result<usize> {
        let mut tx = self.db.pool().begin().await?;

        sqlx::query("DELETE FROM holdings").execute(&mut *tx).await?;

        for h in holdings {
            sqlx::query(
                r#"
                INSERT INTO holdings
                (ticker, exchange, currency, start_value, end_value,
                 start_price, end_price, dividends, fees)
                VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(&h.ticker)
            .bind(&h.exchange)
            .bind(&h.currency)
            .bind(h.start_value)
            .bind(h.end_value)
            .bind(h.start_price)
            .bind(h.end_price)
            .bind(h.dividends)
            .bind(h.fees)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(holdings.len())
    }

    /// All holdings, largest current value first (dashboard display order).
    pub async fn all(&self) -> Result<Vec<Holding>> {
        let holdings = sqlx::query_as::<_, Holding>(
            "SELECT * FROM holdings ORDER BY end_value DESC",
        )
        .fetch_all(self.db.pool())
        .await?;

        Ok(holdings)
    }

    /// Distinct tickers that still carry value, i.e. the ones worth a quote
    /// lookup.
    pub async fn active_tickers(&self) -> Result<Vec<String>> {
        let tickers: Vec<(String,)> = sqlx::query_as(
            "SELECT DISTINCT ticker FROM holdings WHERE end_value > 0",
        )
        .fetch_all(self.db.pool())
        .await?;

        Ok(tickers.into_iter().map(|(t,)| t).collect())
    }
}
