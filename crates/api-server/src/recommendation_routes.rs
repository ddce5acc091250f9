use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use portfolio_core::recommend::recommend;
use serde_json::{json, Value};

use crate::{AppError, AppState};

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/recommendations", get(get_recommendations))
}

/// Rule-based action per holding, recomputed from the current holding set.
async fn get_recommendations(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let holdings = state.holdings.all().await?;

    if holdings.is_empty() {
        return Ok(Json(json!({
            "recommendations": [],
            "message": "No holdings found",
        })));
    }

    let recommendations: Vec<_> = holdings.iter().map(recommend).collect();

    Ok(Json(json!({
        "recommendations": recommendations,
        "generated_at": chrono::Utc::now().to_rfc3339(),
    })))
}
