use serde::{Deserialize, Serialize};

use crate::{MarketCap, Symbol, UtcDateTime, ValidationError};

/// Canonical instrument class, from the wire's `instrumentType` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstrumentType {
    Equity,
    Etf,
    Index,
    Fund,
    Other,
}

impl InstrumentType {
    /// Map the wire spelling. Unknown types are carried as `Other`,
    /// not rejected.
    pub fn from_wire(value: &str) -> Self {
        match value.trim().to_ascii_uppercase().as_str() {
            "EQUITY" => Self::Equity,
            "ETF" => Self::Etf,
            "INDEX" => Self::Index,
            "MUTUALFUND" | "FUND" => Self::Fund,
            _ => Self::Other,
        }
    }
}

/// A tradable security and its descriptive metadata.
///
/// Immutable once fetched; a refetch replaces the whole value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instrument {
    pub symbol: Symbol,
    pub display_name: String,
    pub long_name: String,
    pub sector: String,
    pub industry: String,
    pub market_cap: MarketCap,
    pub currency: String,
    pub exchange_code: String,
    pub instrument_type: InstrumentType,
    pub last_updated: UtcDateTime,
}

impl Instrument {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        symbol: Symbol,
        display_name: impl Into<String>,
        long_name: impl Into<String>,
        sector: impl Into<String>,
        industry: impl Into<String>,
        market_cap: MarketCap,
        currency: impl AsRef<str>,
        exchange_code: impl Into<String>,
        instrument_type: InstrumentType,
        last_updated: UtcDateTime,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            symbol,
            display_name: display_name.into(),
            long_name: long_name.into(),
            sector: sector.into(),
            industry: industry.into(),
            market_cap,
            currency: validate_currency_code(currency.as_ref())?,
            exchange_code: exchange_code.into(),
            instrument_type,
            last_updated,
        })
    }
}

/// Trend sign carried in the last price-record field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Up,
    Down,
}

/// One OHLCV observation at a point in time.
///
/// The `low <= open,close <= high` relation is an expectation on the
/// source, not enforced here; the engine must work with whatever ordering
/// the backend delivered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// 1-based ordinal within the series.
    pub sequence: u32,
    pub timestamp: UtcDateTime,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
    pub trend: Trend,
}

impl PricePoint {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        sequence: u32,
        timestamp: UtcDateTime,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: u64,
        trend: Trend,
    ) -> Result<Self, ValidationError> {
        validate_non_negative("open", open)?;
        validate_non_negative("high", high)?;
        validate_non_negative("low", low)?;
        validate_non_negative("close", close)?;

        Ok(Self {
            sequence,
            timestamp,
            open,
            high,
            low,
            close,
            volume,
            trend,
        })
    }
}

/// Ordered price history for one symbol, ascending by timestamp.
///
/// Insertion order from the source is chronological order; nothing here
/// re-sorts. Empty is valid (no trading history yet).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    pub points: Vec<PricePoint>,
}

impl PriceSeries {
    pub fn new(points: Vec<PricePoint>) -> Self {
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn last(&self) -> Option<&PricePoint> {
        self.points.last()
    }
}

/// Validate and normalize currency to uppercase 3-letter code.
pub fn validate_currency_code(input: &str) -> Result<String, ValidationError> {
    let normalized = input.trim().to_ascii_uppercase();
    let is_valid = normalized.len() == 3 && normalized.chars().all(|ch| ch.is_ascii_alphabetic());

    if !is_valid {
        return Err(ValidationError::InvalidCurrency {
            value: input.to_owned(),
        });
    }

    Ok(normalized)
}

fn validate_non_negative(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NonFiniteValue { field });
    }
    if value < 0.0 {
        return Err(ValidationError::NegativeValue { field });
    }
    Ok(())
}
