//! Bundled in-memory dataset.
//!
//! Mirrors the backend's wire contract exactly: the catalog and the
//! generated histories are emitted as positional records and pushed
//! through the same decoder the REST adapter uses, so the mock exercises
//! the full boundary. The price walk is seeded from the symbol instead of
//! a random source, which keeps every run reproducible.

use std::collections::HashSet;
use std::future::Future;
use std::pin::Pin;

use serde_json::{json, Value};
use time::macros::datetime;

use crate::data_source::{MarketDataSource, SourceError};
use crate::record::{decode_instruments, decode_price_series};
use crate::{Instrument, PriceSeries, Symbol};

const HISTORY_DAYS: usize = 30;
const LAST_UPDATED: &str = "2024-11-11 05:33:12.803444";

struct CatalogRow {
    symbol: &'static str,
    display_name: &'static str,
    long_name: &'static str,
    sector: &'static str,
    industry: &'static str,
    market_cap: &'static str,
    currency: &'static str,
    exchange_code: &'static str,
    instrument_type: &'static str,
    base_price: f64,
}

const fn row(
    symbol: &'static str,
    display_name: &'static str,
    long_name: &'static str,
    sector: &'static str,
    industry: &'static str,
    market_cap: &'static str,
    exchange_code: &'static str,
    base_price: f64,
) -> CatalogRow {
    CatalogRow {
        symbol,
        display_name,
        long_name,
        sector,
        industry,
        market_cap,
        currency: "USD",
        exchange_code,
        instrument_type: "EQUITY",
        base_price,
    }
}

const CATALOG: &[CatalogRow] = &[
    row("AAPL", "Apple Inc.", "Apple Inc.", "Technology", "Consumer Electronics", "3430681935872", "NMS", 225.50),
    row("MSFT", "Microsoft", "Microsoft Corporation", "Technology", "Software", "2890681935872", "NMS", 335.75),
    row("GOOGL", "Alphabet", "Alphabet Inc.", "Technology", "Internet Services", "1890681935872", "NMS", 140.25),
    row("AMZN", "Amazon", "Amazon.com Inc.", "Consumer Cyclical", "Internet Retail", "1590681935872", "NMS", 145.80),
    row("META", "Meta", "Meta Platforms Inc.", "Technology", "Internet Services", "890681935872", "NMS", 325.90),
    row("NVDA", "NVIDIA", "NVIDIA Corporation", "Technology", "Semiconductors", "1120681935872", "NMS", 485.90),
    row("WMT", "Walmart", "Walmart Inc.", "Consumer Defensive", "Retail", "420681935872", "NYSE", 169.50),
    row("JPM", "JPMorgan", "JPMorgan Chase & Co.", "Financial", "Banks", "510681935872", "NYSE", 152.75),
    row("V", "Visa", "Visa Inc.", "Financial", "Credit Services", "495681935872", "NYSE", 245.30),
    row("JNJ", "Johnson & Johnson", "Johnson & Johnson", "Healthcare", "Drug Manufacturers", "380681935872", "NYSE", 158.90),
    row("UNH", "UnitedHealth", "UnitedHealth Group Inc.", "Healthcare", "Healthcare Plans", "445681935872", "NYSE", 528.40),
    row("XOM", "ExxonMobil", "Exxon Mobil Corporation", "Energy", "Oil & Gas", "468681935872", "NYSE", 105.80),
    row("NFLX", "Netflix", "Netflix Inc.", "Communication Services", "Entertainment", "215681935872", "NMS", 435.60),
    row("DIS", "Disney", "The Walt Disney Company", "Communication Services", "Entertainment", "198681935872", "NYSE", 92.75),
    row("TSLA", "Tesla", "Tesla Inc.", "Consumer Cyclical", "Auto Manufacturers", "856681935872", "NMS", 238.45),
];

/// In-memory data source with the bundled 15-instrument catalog.
#[derive(Debug, Clone, Default)]
pub struct MockMarketData {
    missing_history: HashSet<Symbol>,
}

impl MockMarketData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Treat the given symbols as known instruments with no trading
    /// history, so `price_series` answers `NotFound` for them.
    pub fn with_missing_history(mut self, symbols: impl IntoIterator<Item = Symbol>) -> Self {
        self.missing_history.extend(symbols);
        self
    }

    fn catalog_rows() -> Vec<Value> {
        CATALOG.iter().map(wire_instrument).collect()
    }

    fn catalog_entry(symbol: &Symbol) -> Option<&'static CatalogRow> {
        CATALOG.iter().find(|entry| entry.symbol == symbol.as_str())
    }

    fn history_rows(symbol: &Symbol, base_price: f64) -> Vec<Value> {
        let seed = symbol_seed(symbol);
        let volatility = base_price * 0.02;
        let start = datetime!(2024-10-01 00:00:00 UTC);

        let mut current = base_price;
        let mut rows = Vec::with_capacity(HISTORY_DAYS);

        for day in 0..HISTORY_DAYS {
            let date = start + time::Duration::days(day as i64);
            let timestamp = format!(
                "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
                date.year(),
                u8::from(date.month()),
                date.day(),
                date.hour(),
                date.minute(),
                date.second()
            );

            let daily_move = (unit(seed, day, 0) - 0.5) * volatility;
            let open = round2(current);
            let close = round2(current + daily_move);
            let high = round2(open.max(close) + unit(seed, day, 1) * volatility * 0.5);
            let low = round2(open.min(close) - unit(seed, day, 2) * volatility * 0.5);
            let volume = 10_000_000 + (unit(seed, day, 3) * 20_000_000.0) as u64;
            let trend = if close > open { 1 } else { -1 };

            rows.push(json!([day + 1, timestamp, open, high, low, close, volume, 0, 0, trend]));

            current = close;
        }

        rows
    }
}

impl MarketDataSource for MockMarketData {
    fn list_instruments<'a>(
        &'a self,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<Instrument>, SourceError>> + Send + 'a>> {
        Box::pin(async move {
            let rows = Self::catalog_rows();
            let (instruments, rejected) = decode_instruments(&rows);
            if let Some(error) = rejected.first() {
                return Err(SourceError::internal(format!(
                    "bundled catalog row failed to decode: {error}"
                )));
            }
            Ok(instruments)
        })
    }

    fn instrument_detail<'a>(
        &'a self,
        symbol: &'a Symbol,
    ) -> Pin<Box<dyn Future<Output = Result<Instrument, SourceError>> + Send + 'a>> {
        Box::pin(async move {
            let instruments = self.list_instruments().await?;
            instruments
                .into_iter()
                .find(|instrument| &instrument.symbol == symbol)
                .ok_or_else(|| SourceError::not_found(format!("unknown symbol '{symbol}'")))
        })
    }

    fn price_series<'a>(
        &'a self,
        symbol: &'a Symbol,
    ) -> Pin<Box<dyn Future<Output = Result<PriceSeries, SourceError>> + Send + 'a>> {
        Box::pin(async move {
            let entry = Self::catalog_entry(symbol)
                .ok_or_else(|| SourceError::not_found(format!("unknown symbol '{symbol}'")))?;

            if self.missing_history.contains(symbol) {
                return Err(SourceError::not_found(format!(
                    "no price history for '{symbol}'"
                )));
            }

            let rows = Self::history_rows(symbol, entry.base_price);
            let (series, rejected) = decode_price_series(&rows);
            if let Some(error) = rejected.first() {
                return Err(SourceError::internal(format!(
                    "generated history row failed to decode: {error}"
                )));
            }
            Ok(series)
        })
    }
}

fn wire_instrument(entry: &CatalogRow) -> Value {
    json!([
        entry.symbol,
        entry.display_name,
        entry.long_name,
        entry.sector,
        entry.industry,
        entry.market_cap,
        entry.currency,
        entry.exchange_code,
        entry.instrument_type,
        LAST_UPDATED
    ])
}

fn symbol_seed(symbol: &Symbol) -> u64 {
    symbol.as_str().bytes().fold(0_u64, |acc, byte| {
        acc.wrapping_mul(33).wrapping_add(byte as u64)
    })
}

/// Deterministic value in `[0, 1)` keyed by symbol seed, day, and salt.
fn unit(seed: u64, day: usize, salt: u64) -> f64 {
    let mixed = seed
        .wrapping_add((day as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15))
        .wrapping_add(salt.wrapping_mul(0xD1B5_4A32_D192_ED03))
        .wrapping_mul(6_364_136_223_846_793_005)
        .wrapping_add(1_442_695_040_888_963_407);
    (mixed >> 11) as f64 / (1_u64 << 53) as f64
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
