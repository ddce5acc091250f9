use serde::{Deserialize, Serialize};

/// One portfolio position tracked across a start and end valuation point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Holding {
    pub id: Option<i64>,
    pub ticker: String,
    pub exchange: String,
    pub currency: String,
    pub start_value: f64,
    pub end_value: f64,
    pub start_price: f64,
    pub end_price: f64,
    pub dividends: f64,
    pub fees: f64,
    pub date_added: Option<String>,
}

impl Holding {
    /// Fresh holding with the field defaults applied on CSV import.
    pub fn new(ticker: impl Into<String>) -> Self {
        Self {
            id: None,
            ticker: ticker.into(),
            exchange: String::new(),
            currency: "USD".to_string(),
            start_value: 0.0,
            end_value: 0.0,
            start_price: 0.0,
            end_price: 0.0,
            dividends: 0.0,
            fees: 0.0,
            date_added: None,
        }
    }
}

/// Last-fetched quote snapshot for one ticker.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct MarketQuote {
    pub id: Option<i64>,
    pub ticker: String,
    pub current_price: f64,
    pub day_change: f64,
    pub volume: i64,
    pub market_cap: f64,
    pub last_updated: Option<String>,
}

/// Raw quote fields as returned by an external market-data provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TickerQuote {
    pub current_price: f64,
    pub previous_close: f64,
    pub volume: i64,
    pub market_cap: f64,
}

/// Quote snapshot in the shape the API exposes per ticker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub price: f64,
    pub change: f64,
    pub volume: i64,
    pub market_cap: f64,
}

impl Quote {
    /// Placeholder used when a provider lookup fails for one ticker.
    pub fn zeroed() -> Self {
        Self {
            price: 0.0,
            change: 0.0,
            volume: 0,
            market_cap: 0.0,
        }
    }
}

/// Aggregate portfolio metrics, recomputed on every read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSummary {
    pub total_value: f64,
    pub total_return: f64,
    pub return_percentage: f64,
    pub total_dividends: f64,
    pub holdings_count: usize,
}

impl PortfolioSummary {
    pub fn empty() -> Self {
        Self {
            total_value: 0.0,
            total_return: 0.0,
            return_percentage: 0.0,
            total_dividends: 0.0,
            holdings_count: 0,
        }
    }
}

/// Classification outcome for one holding.
///
/// `Buy` is part of the public contract but no rule in the chain currently
/// emits it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Verdict {
    Buy,
    Hold,
    Sell,
    Closed,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Buy => "BUY",
            Verdict::Hold => "HOLD",
            Verdict::Sell => "SELL",
            Verdict::Closed => "CLOSED",
        }
    }
}

/// Rule-based action for one holding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub ticker: String,
    pub current_value: f64,
    pub return_percentage: f64,
    pub recommendation: Verdict,
    pub action: String,
    pub rationale: String,
}
