use axum::http::StatusCode;
use axum::response::{Html, IntoResponse};
use rust_embed::Embed;

#[derive(Embed)]
#[folder = "../../frontend/"]
pub struct FrontendAssets;

/// Serve the single-page dashboard.
pub async fn index() -> impl IntoResponse {
    match FrontendAssets::get("index.html") {
        Some(file) => Html(String::from_utf8_lossy(&file.data).into_owned()).into_response(),
        None => (StatusCode::NOT_FOUND, "dashboard not built in").into_response(),
    }
}
