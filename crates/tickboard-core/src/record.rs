//! Positional wire records.
//!
//! The backend ships instruments and price points as fixed-arity JSON
//! arrays. Index-based access is a latent-bug source (the final price
//! field has meant different things across backend revisions), so every
//! record is decoded into a named-field struct here, at the data-source
//! boundary, and nowhere else.
//!
//! A record that fails validation is rejected individually; it is never
//! coerced to zeroes, and it does not take its siblings down with it.

use serde_json::Value;
use thiserror::Error;

use crate::{
    Instrument, InstrumentType, MarketCap, PricePoint, PriceSeries, Symbol, Trend, UtcDateTime,
};

pub const INSTRUMENT_ARITY: usize = 10;
pub const PRICE_ARITY: usize = 10;

/// Per-record decode failure.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RecordError {
    #[error("record must be a JSON array, got {found}")]
    NotAnArray { found: &'static str },
    #[error("record must have {expected} fields, got {got}")]
    WrongArity { expected: usize, got: usize },
    #[error("field {index} ({name}): {reason}")]
    Field {
        index: usize,
        name: &'static str,
        reason: String,
    },
}

/// Decode one 10-field instrument record:
/// `[symbol, displayName, longName, sector, industry, marketCap,
///   currency, exchangeCode, instrumentType, lastUpdated]`.
pub fn decode_instrument(value: &Value) -> Result<Instrument, RecordError> {
    let fields = as_record(value, INSTRUMENT_ARITY)?;

    let symbol = Symbol::parse(str_field(fields, 0, "symbol")?)
        .map_err(|error| field_error(0, "symbol", error))?;
    let display_name = str_field(fields, 1, "displayName")?;
    let long_name = str_field(fields, 2, "longName")?;
    let sector = str_field(fields, 3, "sector")?;
    let industry = str_field(fields, 4, "industry")?;
    let market_cap = MarketCap::parse(str_field(fields, 5, "marketCap")?)
        .map_err(|error| field_error(5, "marketCap", error))?;
    let currency = str_field(fields, 6, "currency")?;
    let exchange_code = str_field(fields, 7, "exchangeCode")?;
    let instrument_type = InstrumentType::from_wire(str_field(fields, 8, "instrumentType")?);
    let last_updated = UtcDateTime::parse(str_field(fields, 9, "lastUpdated")?)
        .map_err(|error| field_error(9, "lastUpdated", error))?;

    Instrument::new(
        symbol,
        display_name,
        long_name,
        sector,
        industry,
        market_cap,
        currency,
        exchange_code,
        instrument_type,
        last_updated,
    )
    .map_err(|error| field_error(6, "currency", error))
}

/// Decode one 10-field price record:
/// `[sequence, timestamp, open, high, low, close, volume,
///   reserved1, reserved2, trend]`.
///
/// The final field is pinned to the trend indicator (`+1`/`-1`); the
/// backend revision that echoes the symbol there is treated as malformed.
pub fn decode_price_point(value: &Value) -> Result<PricePoint, RecordError> {
    let fields = as_record(value, PRICE_ARITY)?;

    let sequence = u32_field(fields, 0, "sequence")?;
    let timestamp = UtcDateTime::parse(str_field(fields, 1, "timestamp")?)
        .map_err(|error| field_error(1, "timestamp", error))?;
    let open = price_field(fields, 2, "open")?;
    let high = price_field(fields, 3, "high")?;
    let low = price_field(fields, 4, "low")?;
    let close = price_field(fields, 5, "close")?;
    let volume = u64_field(fields, 6, "volume")?;
    // Fields 7 and 8 are reserved; their presence is checked by arity only.
    let trend = trend_field(fields, 9, "trend")?;

    // All numeric fields were validated above; the struct can be built as-is.
    Ok(PricePoint {
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

/// Decode a batch of price records, keeping the valid ones and reporting
/// the rejects alongside.
pub fn decode_price_series(values: &[Value]) -> (PriceSeries, Vec<RecordError>) {
    let mut points = Vec::with_capacity(values.len());
    let mut rejected = Vec::new();

    for value in values {
        match decode_price_point(value) {
            Ok(point) => points.push(point),
            Err(error) => rejected.push(error),
        }
    }

    (PriceSeries::new(points), rejected)
}

/// Decode a batch of instrument records, keeping the valid ones and
/// reporting the rejects alongside.
pub fn decode_instruments(values: &[Value]) -> (Vec<Instrument>, Vec<RecordError>) {
    let mut instruments = Vec::with_capacity(values.len());
    let mut rejected = Vec::new();

    for value in values {
        match decode_instrument(value) {
            Ok(instrument) => instruments.push(instrument),
            Err(error) => rejected.push(error),
        }
    }

    (instruments, rejected)
}

fn as_record(value: &Value, expected: usize) -> Result<&[Value], RecordError> {
    let fields = value.as_array().ok_or(RecordError::NotAnArray {
        found: json_type(value),
    })?;

    if fields.len() != expected {
        return Err(RecordError::WrongArity {
            expected,
            got: fields.len(),
        });
    }

    Ok(fields.as_slice())
}

fn str_field<'a>(
    fields: &'a [Value],
    index: usize,
    name: &'static str,
) -> Result<&'a str, RecordError> {
    fields[index].as_str().ok_or_else(|| RecordError::Field {
        index,
        name,
        reason: format!("expected a string, got {}", json_type(&fields[index])),
    })
}

fn price_field(fields: &[Value], index: usize, name: &'static str) -> Result<f64, RecordError> {
    let value = fields[index].as_f64().ok_or_else(|| RecordError::Field {
        index,
        name,
        reason: format!("expected a number, got {}", json_type(&fields[index])),
    })?;

    if !value.is_finite() {
        return Err(RecordError::Field {
            index,
            name,
            reason: String::from("expected a finite number"),
        });
    }

    if value < 0.0 {
        return Err(RecordError::Field {
            index,
            name,
            reason: String::from("expected a non-negative price"),
        });
    }

    Ok(value)
}

fn field_error(
    index: usize,
    name: &'static str,
    error: impl std::fmt::Display,
) -> RecordError {
    RecordError::Field {
        index,
        name,
        reason: error.to_string(),
    }
}

fn u32_field(fields: &[Value], index: usize, name: &'static str) -> Result<u32, RecordError> {
    let value = fields[index].as_u64().ok_or_else(|| RecordError::Field {
        index,
        name,
        reason: format!(
            "expected a non-negative integer, got {}",
            json_type(&fields[index])
        ),
    })?;

    u32::try_from(value).map_err(|_| RecordError::Field {
        index,
        name,
        reason: format!("value {value} out of range"),
    })
}

fn u64_field(fields: &[Value], index: usize, name: &'static str) -> Result<u64, RecordError> {
    fields[index].as_u64().ok_or_else(|| RecordError::Field {
        index,
        name,
        reason: format!(
            "expected a non-negative integer, got {}",
            json_type(&fields[index])
        ),
    })
}

fn trend_field(fields: &[Value], index: usize, name: &'static str) -> Result<Trend, RecordError> {
    match fields[index].as_i64() {
        Some(1) => Ok(Trend::Up),
        Some(-1) => Ok(Trend::Down),
        Some(other) => Err(RecordError::Field {
            index,
            name,
            reason: format!("expected +1 or -1, got {other}"),
        }),
        None => Err(RecordError::Field {
            index,
            name,
            reason: format!("expected +1 or -1, got {}", json_type(&fields[index])),
        }),
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
