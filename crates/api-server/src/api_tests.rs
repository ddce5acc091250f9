use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use market_data::MarketDataFetcher;
use portfolio_core::{PortfolioError, QuoteProvider, TickerQuote};
use portfolio_store::{HoldingsStore, MarketDataCache, PortfolioDb};
use serde_json::Value;
use tower::ServiceExt;

use crate::{build_router, AppState};

struct StaticQuotes(HashMap<String, TickerQuote>);

#[async_trait]
impl QuoteProvider for StaticQuotes {
    async fn quote(&self, ticker: &str) -> Result<TickerQuote, PortfolioError> {
        self.0
            .get(ticker)
            .cloned()
            .ok_or_else(|| PortfolioError::QuoteError(format!("no data for {}", ticker)))
    }
}

async fn test_app(quotes: HashMap<String, TickerQuote>) -> (Router, AppState) {
    let db = PortfolioDb::in_memory().await.unwrap();
    let state = AppState {
        holdings: HoldingsStore::new(db.clone()),
        market_data: MarketDataCache::new(db),
        fetcher: Arc::new(MarketDataFetcher::new(
            Arc::new(StaticQuotes(quotes)),
            Duration::ZERO,
        )),
    };
    (build_router(state.clone()), state)
}

async fn get_json(router: &Router, uri: &str) -> (StatusCode, Value) {
    let response = router
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

const BOUNDARY: &str = "portfolio-test-boundary";

fn upload_request(field_name: &str, filename: &str, csv: &str) -> Request<Body> {
    let body = format!(
        "--{BOUNDARY}\r\n\
         Content-Disposition: form-data; name=\"{field_name}\"; filename=\"{filename}\"\r\n\
         Content-Type: text/csv\r\n\r\n\
         {csv}\r\n\
         --{BOUNDARY}--\r\n"
    );
    Request::builder()
        .method("POST")
        .uri("/api/upload")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

fn sample_csv(tickers: &[(&str, f64, f64)]) -> String {
    let mut csv = String::from(
        "Investment ticker symbol,Exchange,Currency,\
         Starting investment dollar value,Ending investment dollar value,\
         Starting share price,Ending share price,\
         Dividends and distributions,Transaction fees\n",
    );
    for (ticker, start, end) in tickers {
        csv.push_str(&format!("{ticker},NASDAQ,USD,{start},{end},0,0,0,0\n"));
    }
    csv
}

async fn upload(router: &Router, csv: &str) -> (StatusCode, Value) {
    let response = router
        .clone()
        .oneshot(upload_request("file", "portfolio.csv", csv))
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_empty_portfolio_shape() {
    let (router, _) = test_app(HashMap::new()).await;

    let (status, body) = get_json(&router, "/api/portfolio").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["holdings"].as_array().unwrap().len(), 0);
    assert_eq!(body["summary"]["total_value"], 0.0);
    assert_eq!(body["summary"]["return_percentage"], 0.0);
    assert_eq!(body["summary"]["holdings_count"], 0);
}

#[tokio::test]
async fn test_upload_replaces_holdings() {
    let (router, _) = test_app(HashMap::new()).await;

    let five = sample_csv(&[
        ("A", 100.0, 110.0),
        ("B", 100.0, 110.0),
        ("C", 100.0, 110.0),
        ("D", 100.0, 110.0),
        ("E", 100.0, 110.0),
    ]);
    let (status, body) = upload(&router, &five).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Portfolio uploaded successfully");
    assert_eq!(body["holdings_count"], 5);

    let three = sample_csv(&[("X", 100.0, 110.0), ("Y", 100.0, 110.0), ("Z", 100.0, 110.0)]);
    let (_, body) = upload(&router, &three).await;
    assert_eq!(body["holdings_count"], 3);

    let (_, body) = get_json(&router, "/api/portfolio").await;
    assert_eq!(body["holdings"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_upload_without_file_field_is_400() {
    let (router, _) = test_app(HashMap::new()).await;

    let response = router
        .oneshot(upload_request("notes", "notes.txt", "hello"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["error"], "No file provided");
}

#[tokio::test]
async fn test_upload_with_empty_filename_is_400() {
    let (router, _) = test_app(HashMap::new()).await;

    // A `file` part is present but nothing was picked in the file dialog.
    let response = router
        .oneshot(upload_request("file", "", "ignored"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["error"], "No file selected");
}

#[tokio::test]
async fn test_upload_unparseable_csv_is_400_and_store_untouched() {
    let (router, _) = test_app(HashMap::new()).await;

    let good = sample_csv(&[("AAPL", 1000.0, 1200.0)]);
    upload(&router, &good).await;

    // No recognizable ticker column.
    let (status, body) = upload(&router, "Exchange,Currency\nNASDAQ,USD\n").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("ticker"));

    let (_, body) = get_json(&router, "/api/portfolio").await;
    assert_eq!(body["holdings"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_recommendations_empty_and_populated() {
    let (router, _) = test_app(HashMap::new()).await;

    let (status, body) = get_json(&router, "/api/recommendations").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["recommendations"].as_array().unwrap().len(), 0);
    assert_eq!(body["message"], "No holdings found");

    let csv = sample_csv(&[("AAPL", 1000.0, 1200.0)]);
    upload(&router, &csv).await;

    let (_, body) = get_json(&router, "/api/recommendations").await;
    let recs = body["recommendations"].as_array().unwrap();
    assert_eq!(recs.len(), 1);
    assert_eq!(recs[0]["ticker"], "AAPL");
    assert_eq!(recs[0]["recommendation"], "HOLD");
    assert_eq!(recs[0]["action"], "Maintain");
    assert_eq!(recs[0]["return_percentage"], 20.0);
    assert!(body["generated_at"].is_string());
}

#[tokio::test]
async fn test_market_data_without_holdings() {
    let (router, _) = test_app(HashMap::new()).await;

    let (status, body) = get_json(&router, "/api/market-data").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["market_data"], serde_json::json!({}));
    assert_eq!(body["message"], "No holdings to update");
}

#[tokio::test]
async fn test_market_data_fetch_and_cache() {
    let mut quotes = HashMap::new();
    quotes.insert(
        "AAPL".to_string(),
        TickerQuote {
            current_price: 110.0,
            previous_close: 100.0,
            volume: 2_000,
            market_cap: 5e11,
        },
    );
    let (router, state) = test_app(quotes).await;

    // AAPL has a quote, DARK does not; the failed lookup degrades to zeros.
    let csv = sample_csv(&[("AAPL", 1000.0, 1200.0), ("DARK", 500.0, 400.0)]);
    upload(&router, &csv).await;

    let (status, body) = get_json(&router, "/api/market-data").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["market_data"]["AAPL"]["price"], 110.0);
    assert_eq!(body["market_data"]["AAPL"]["change"], 10.0);
    assert_eq!(body["market_data"]["DARK"]["price"], 0.0);
    assert!(body["last_updated"].is_string());

    let cached = state.market_data.all().await.unwrap();
    assert_eq!(cached.len(), 2);
}
