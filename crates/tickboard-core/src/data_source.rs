//! Data source trait and its error type.
//!
//! The dashboard consumes exactly three read-only operations from a
//! backing source. Everything behind this trait is replaceable: the
//! bundled mock dataset, the REST backend, or a test double.
//!
//! | Operation | Returns | Failure |
//! |-----------|---------|---------|
//! | [`list_instruments`](MarketDataSource::list_instruments) | instruments in display order | fatal to the page |
//! | [`instrument_detail`](MarketDataSource::instrument_detail) | one instrument | `NotFound` for unknown symbols |
//! | [`price_series`](MarketDataSource::price_series) | OHLCV history | `NotFound` when no history exists |

use std::fmt::{Display, Formatter};
use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};

use crate::{Instrument, PriceSeries, Symbol};

/// Source-level error classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceErrorKind {
    /// Unknown symbol, or a known symbol with no price history.
    NotFound,
    /// Network or backend failure; surfaced to the caller, never retried
    /// automatically by the core.
    Unavailable,
    /// A wire record failed validation and was rejected rather than
    /// coerced.
    MalformedRecord,
    InvalidRequest,
    Internal,
}

/// Structured source error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceError {
    kind: SourceErrorKind,
    message: String,
    retryable: bool,
}

impl SourceError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::NotFound,
            message: message.into(),
            retryable: false,
        }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::Unavailable,
            message: message.into(),
            retryable: true,
        }
    }

    pub fn malformed_record(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::MalformedRecord,
            message: message.into(),
            retryable: false,
        }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::InvalidRequest,
            message: message.into(),
            retryable: false,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::Internal,
            message: message.into(),
            retryable: false,
        }
    }

    pub const fn kind(&self) -> SourceErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Whether a caller could reasonably try again. The core itself never
    /// retries; this is advisory for outer layers.
    pub const fn retryable(&self) -> bool {
        self.retryable
    }

    pub const fn code(&self) -> &'static str {
        match self.kind {
            SourceErrorKind::NotFound => "source.not_found",
            SourceErrorKind::Unavailable => "source.unavailable",
            SourceErrorKind::MalformedRecord => "source.malformed_record",
            SourceErrorKind::InvalidRequest => "source.invalid_request",
            SourceErrorKind::Internal => "source.internal",
        }
    }
}

impl Display for SourceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code())
    }
}

impl std::error::Error for SourceError {}

/// Read-only market data contract consumed by the dashboard.
///
/// Implementations must be `Send + Sync`; the fetch session shares one
/// source across the whole price-series batch.
pub trait MarketDataSource: Send + Sync {
    /// Fetches the instrument list. Its order defines the default
    /// display order of the dashboard.
    fn list_instruments<'a>(
        &'a self,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<Instrument>, SourceError>> + Send + 'a>>;

    /// Fetches one instrument's metadata.
    ///
    /// # Errors
    ///
    /// Returns a [`SourceError`] of kind `NotFound` when the symbol is
    /// unknown.
    fn instrument_detail<'a>(
        &'a self,
        symbol: &'a Symbol,
    ) -> Pin<Box<dyn Future<Output = Result<Instrument, SourceError>> + Send + 'a>>;

    /// Fetches one instrument's price history.
    ///
    /// # Errors
    ///
    /// Returns a [`SourceError`] of kind `NotFound` when no history
    /// exists for a known symbol.
    fn price_series<'a>(
        &'a self,
        symbol: &'a Symbol,
    ) -> Pin<Box<dyn Future<Output = Result<PriceSeries, SourceError>> + Send + 'a>>;
}
