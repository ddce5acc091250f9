use anyhow::Result;
use portfolio_core::{MarketQuote, Quote};

use crate::db::PortfolioDb;

/// Cache of the last-fetched quote snapshot per ticker, overwritten on each
/// refresh.
#[derive(Clone)]
pub struct MarketDataCache {
    db: PortfolioDb,
}

impl MarketDataCache {
    pub fn new(db: PortfolioDb) -> Self {
        Self { db }
    }

    /// Replace the whole cache with this batch, in one transaction.
    pub async fn replace_all(&self, quotes: &[(String, Quote)]) -> Result<()> {
        let mut tx = self.db.pool().begin().await?;

        sqlx::query("DELETE FROM market_data")
            .execute(&mut *tx)
            .await?;

        for (ticker, quote) in quotes {
            sqlx::query(
                r#"
                INSERT INTO market_data
                (ticker, current_price, day_change, volume, market_cap)
                VALUES (?, ?, ?, ?, ?)
                "#,
            )
            .bind(ticker)
            .bind(quote.price)
            .bind(quote.change)
            .bind(quote.volume)
            .bind(quote.market_cap)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(())
    }

    pub async fn all(&self) -> Result<Vec<MarketQuote>> {
        let quotes = sqlx::query_as::<_, MarketQuote>(
            "SELECT * FROM market_data ORDER BY ticker",
        )
        .fetch_all(self.db.pool())
        .await?;

        Ok(quotes)
    }
}
