//! Canonical domain types for the dashboard: symbols, timestamps,
//! market caps, instruments, and price series.

mod market_cap;
mod models;
mod symbol;
mod timestamp;

pub use market_cap::{CapBucket, MarketCap};
pub use models::{
    validate_currency_code, Instrument, InstrumentType, PricePoint, PriceSeries, Trend,
};
pub use symbol::Symbol;
pub use timestamp::UtcDateTime;
