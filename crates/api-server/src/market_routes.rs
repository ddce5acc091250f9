use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Map, Value};

use crate::{AppError, AppState};

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/market-data", get(get_market_data))
}

/// Refresh quotes for every ticker still carrying value and return the new
/// snapshot. Runs inline in the request; the caller waits for the whole batch
/// including inter-request delays.
async fn get_market_data(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let tickers = state.holdings.active_tickers().await?;

    if tickers.is_empty() {
        return Ok(Json(json!({
            "market_data": {},
            "message": "No holdings to update",
        })));
    }

    let quotes = state.fetcher.fetch_all(&tickers).await;
    state.market_data.replace_all(&quotes).await?;

    let mut market_data = Map::new();
    for (ticker, quote) in quotes {
        market_data.insert(ticker, serde_json::to_value(quote)?);
    }

    Ok(Json(json!({
        "market_data": market_data,
        "last_updated": chrono::Utc::now().to_rfc3339(),
    })))
}
