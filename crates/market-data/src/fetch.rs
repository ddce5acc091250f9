use portfolio_core::{Quote, QuoteProvider};
use std::sync::Arc;
use std::time::Duration;

/// Batch quote fetcher over a [`QuoteProvider`].
///
/// A fixed delay between requests keeps the provider's rate limiter happy. A
/// failed lookup for one ticker degrades to a zeroed quote and never aborts
/// the batch.
pub struct MarketDataFetcher {
    provider: Arc<dyn QuoteProvider>,
    delay: Duration,
}

impl MarketDataFetcher {
    pub fn new(provider: Arc<dyn QuoteProvider>, delay: Duration) -> Self {
        Self { provider, delay }
    }

    /// Fetch quotes for all tickers, in order. Always returns one entry per
    /// ticker.
    pub async fn fetch_all(&self, tickers: &[String]) -> Vec<(String, Quote)> {
        let mut quotes = Vec::with_capacity(tickers.len());

        for (i, ticker) in tickers.iter().enumerate() {
            let quote = match self.provider.quote(ticker).await {
                Ok(raw) => {
                    let change = if raw.previous_close != 0.0 {
                        (raw.current_price - raw.previous_close) / raw.previous_close * 100.0
                    } else {
                        0.0
                    };
                    Quote {
                        price: raw.current_price,
                        change,
                        volume: raw.volume,
                        market_cap: raw.market_cap,
                    }
                }
                Err(e) => {
                    tracing::warn!("Error fetching {}: {}", ticker, e);
                    Quote::zeroed()
                }
            };

            quotes.push((ticker.clone(), quote));

            if i + 1 < tickers.len() {
                tokio::time::sleep(self.delay).await;
            }
        }

        quotes
    }
}
