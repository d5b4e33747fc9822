use thiserror::Error;

/// Validation and contract errors exposed by `tickboard-core`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("symbol cannot be empty")]
    EmptySymbol,
    #[error("symbol length {len} exceeds max {max}")]
    SymbolTooLong { len: usize, max: usize },
    #[error("symbol must start with an ASCII letter: '{ch}'")]
    SymbolInvalidStart { ch: char },
    #[error("symbol contains invalid character '{ch}' at index {index}")]
    SymbolInvalidChar { ch: char, index: usize },

    #[error("timestamp must be UTC, RFC3339 or 'YYYY-MM-DD HH:MM:SS': '{value}'")]
    InvalidTimestamp { value: String },

    #[error("currency must be a 3-letter ISO code: '{value}'")]
    InvalidCurrency { value: String },

    #[error("market cap must be a decimal number: '{value}'")]
    InvalidMarketCap { value: String },

    #[error("field '{field}' must be finite")]
    NonFiniteValue { field: &'static str },
    #[error("field '{field}' must be non-negative")]
    NegativeValue { field: &'static str },

    #[error("invalid price range '{value}', expected 'MIN-MAX' or 'MIN+'")]
    InvalidPriceRange { value: String },
    #[error("invalid market cap bucket '{value}', expected one of small, mid, large")]
    InvalidCapBucket { value: String },
    #[error("invalid change direction '{value}', expected positive or negative")]
    InvalidChangeDirection { value: String },

    #[error("page number must be 1-based, got {value}")]
    InvalidPageNumber { value: usize },
    #[error("page size must be greater than zero")]
    InvalidPageSize,
}

/// Top-level error type for core operations.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
