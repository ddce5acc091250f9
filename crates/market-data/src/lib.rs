use async_trait::async_trait;
use portfolio_core::{PortfolioError, QuoteProvider, TickerQuote};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

pub mod fetch;

pub use fetch::MarketDataFetcher;

const BASE_URL: &str = "https://query1.finance.yahoo.com";

/// Quote client against the Yahoo Finance quote endpoint.
#[derive(Clone)]
pub struct YahooQuoteClient {
    client: Client,
}

impl YahooQuoteClient {
    pub fn new(timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent("portfolio-analyzer/0.1")
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { client }
    }
}

#[async_trait]
impl QuoteProvider for YahooQuoteClient {
    async fn quote(&self, ticker: &str) -> Result<TickerQuote, PortfolioError> {
        let url = format!("{}/v7/finance/quote", BASE_URL);

        let response = self
            .client
            .get(&url)
            .query(&[("symbols", ticker)])
            .send()
            .await
            .map_err(|e| PortfolioError::QuoteError(e.to_string()))?;

        if !response.status().is_success() {
            return Err(PortfolioError::QuoteError(format!(
                "HTTP {}: {}",
                response.status(),
                response.text().await.unwrap_or_default()
            )));
        }

        let body: QuoteEnvelope = response
            .json()
            .await
            .map_err(|e| PortfolioError::QuoteError(e.to_string()))?;

        let result = body
            .quote_response
            .result
            .into_iter()
            .next()
            .ok_or_else(|| {
                PortfolioError::QuoteError(format!("No quote returned for {}", ticker))
            })?;

        let previous_close = result.regular_market_previous_close.unwrap_or(0.0);
        // Live price field can be absent outside market hours.
        let current_price = result.regular_market_price.unwrap_or(previous_close);

        Ok(TickerQuote {
            current_price,
            previous_close,
            volume: result.regular_market_volume.unwrap_or(0),
            market_cap: result.market_cap.unwrap_or(0.0),
        })
    }
}

#[derive(Deserialize)]
struct QuoteEnvelope {
    #[serde(rename = "quoteResponse")]
    quote_response: QuoteResponse,
}

#[derive(Deserialize)]
struct QuoteResponse {
    #[serde(default)]
    result: Vec<QuoteResult>,
}

#[derive(Deserialize)]
struct QuoteResult {
    #[serde(rename = "regularMarketPrice")]
    regular_market_price: Option<f64>,
    #[serde(rename = "regularMarketPreviousClose")]
    regular_market_previous_close: Option<f64>,
    #[serde(rename = "regularMarketVolume")]
    regular_market_volume: Option<i64>,
    #[serde(rename = "marketCap")]
    market_cap: Option<f64>,
}
