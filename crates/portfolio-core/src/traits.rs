use async_trait::async_trait;

use crate::{PortfolioError, TickerQuote};

/// Capability interface over an external market-data provider.
///
/// The batch fetcher and the recommendation/aggregation logic only ever see
/// this trait, so they can be tested deterministically without network access.
#[async_trait]
pub trait QuoteProvider: Send + Sync {
    async fn quote(&self, ticker: &str) -> Result<TickerQuote, PortfolioError>;
}
