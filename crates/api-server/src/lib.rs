use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::routing::get;
use axum::Router;
use market_data::{MarketDataFetcher, YahooQuoteClient};
use portfolio_store::{HoldingsStore, MarketDataCache, PortfolioDb};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

mod config;
mod dashboard;
mod error;
mod market_routes;
mod portfolio_routes;
mod recommendation_routes;

#[cfg(test)]
mod api_tests;

pub use config::ServerConfig;
pub use error::AppError;

/// Shared application state. Clones share the underlying connection pool.
#[derive(Clone)]
pub struct AppState {
    pub holdings: HoldingsStore,
    pub market_data: MarketDataCache,
    pub fetcher: Arc<MarketDataFetcher>,
}

/// Assemble the full route tree with CORS and request tracing.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(dashboard::index))
        .merge(portfolio_routes::routes())
        .merge(market_routes::routes())
        .merge(recommendation_routes::routes())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run_server() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("Starting Portfolio Analyzer");

    let config = ServerConfig::from_env()?;
    tracing::info!("  Database: {}", config.database_url);
    tracing::info!("  Quote delay: {}ms", config.quote_delay_ms);

    let db = PortfolioDb::new(&config.database_url).await?;
    tracing::info!("Database initialized");

    let provider = Arc::new(YahooQuoteClient::new(Duration::from_secs(
        config.quote_timeout_secs,
    )));
    let state = AppState {
        holdings: HoldingsStore::new(db.clone()),
        market_data: MarketDataCache::new(db),
        fetcher: Arc::new(MarketDataFetcher::new(
            provider,
            Duration::from_millis(config.quote_delay_ms),
        )),
    };

    let router = build_router(state);

    let addr = SocketAddr::from(([127, 0, 0, 1], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Dashboard available at http://localhost:{}", config.port);

    axum::serve(listener, router).await?;

    Ok(())
}
