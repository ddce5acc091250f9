use axum::extract::{Multipart, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use portfolio_core::summary::summarize;
use portfolio_store::parse_holdings;
use serde_json::{json, Value};

use crate::{AppError, AppState};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/portfolio", get(get_portfolio))
        .route("/api/upload", post(upload_portfolio))
}

/// Current holdings plus aggregate summary. An empty store is a normal
/// response, not an error.
async fn get_portfolio(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let holdings = state.holdings.all().await?;
    let summary = summarize(&holdings);

    Ok(Json(json!({
        "holdings": holdings,
        "summary": summary,
    })))
}

/// Upload a portfolio CSV (multipart field `file`), replacing the entire
/// holding set.
async fn upload_portfolio(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<Value>, AppError> {
    let mut upload: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Failed to read multipart field: {}", e)))?
    {
        if field.name() == Some("file") {
            let filename = field.file_name().unwrap_or("").to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(format!("Failed to read file content: {}", e)))?;
            upload = Some((filename, bytes.to_vec()));
        }
    }

    let (filename, bytes) =
        upload.ok_or_else(|| AppError::BadRequest("No file provided".to_string()))?;
    if filename.is_empty() {
        return Err(AppError::BadRequest("No file selected".to_string()));
    }

    let text = String::from_utf8(bytes).map_err(|e| AppError::BadRequest(e.to_string()))?;
    let holdings = parse_holdings(&text).map_err(|e| AppError::BadRequest(e.to_string()))?;

    let count = state.holdings.replace_all(&holdings).await?;
    tracing::info!("Imported {} holdings from {}", count, filename);

    Ok(Json(json!({
        "message": "Portfolio uploaded successfully",
        "holdings_count": count,
    })))
}
