pub mod db;
pub mod holdings;
pub mod import;
pub mod market_cache;

pub use db::PortfolioDb;
pub use holdings::HoldingsStore;
pub use import::parse_holdings;
pub use market_cache::MarketDataCache;
