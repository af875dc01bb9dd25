use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("S-expression parse error: {0}")]
    ParseError(String),

    #[error("Missing expected data: {0}")]
    MissingData(String),

    #[error("Symbol construction failed: {0}")]
    InvalidSymbol(String),

    #[error("Painting failed: {0}")]
    PaintError(String),

    #[error("JSON deserialization failed: {0}")]
    JsonError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
