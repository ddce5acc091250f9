use anyhow::Result;
use std::env;

/// Server configuration, loaded from the environment (and `.env` via dotenvy).
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub database_url: String,
    /// Fixed delay between per-ticker quote requests.
    pub quote_delay_ms: u64,
    /// Per-request timeout against the quote provider.
    pub quote_timeout_secs: u64,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| "5000".to_string())
                .parse()?,
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite:portfolio.db".to_string()),
            quote_delay_ms: env::var("QUOTE_DELAY_MS")
                .unwrap_or_else(|_| "100".to_string())
                .parse()?,
            quote_timeout_secs: env::var("QUOTE_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()?,
        })
    }
}
