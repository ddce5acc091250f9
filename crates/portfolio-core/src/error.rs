use thiserror::Error;

#[derive(Error, Debug)]
pub enum PortfolioError {
    #[error("Import error: {0}")]
    ImportError(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Quote error: {0}")]
    QuoteError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}
