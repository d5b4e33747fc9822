//! # Tickboard Core
//!
//! Data layer and query engine for the tickboard stock dashboard.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Canonical domain models** for instruments, price series, and
//!   arbitrary-precision market caps
//! - **Positional-record decoding** with per-record validation at the
//!   data-source boundary
//! - **Data source trait** with a bundled mock dataset and a REST
//!   backend adapter
//! - **Quote store & fetch session** that batches the per-instrument
//!   history fetches with per-symbol failure isolation
//! - **Derivation & query engine**: latest price/volume, daily change,
//!   filters, search, and pagination as pure functions
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`adapters`] | Data sources (mock dataset, REST backend) |
//! | [`data_source`] | Data source trait and error types |
//! | [`domain`] | Domain models (Instrument, PricePoint, MarketCap) |
//! | [`engine`] | Derivations, filters, search, pagination |
//! | [`error`] | Core error types |
//! | [`format`] | Compact big-number display helpers |
//! | [`http_client`] | HTTP client abstraction |
//! | [`record`] | Positional wire-record decoding |
//! | [`session`] | Fetch session (list + series batch) |
//! | [`store`] | Session-scoped quote store |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use tickboard_core::{derive_board, MockMarketData, QueryState, SessionLoader};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let loader = SessionLoader::new(Arc::new(MockMarketData::new()));
//!     let store = loader.load().await?;
//!
//!     let query = QueryState::new().with_search("apple");
//!     let page = derive_board(&query, &store)?;
//!
//!     for row in &page.items {
//!         println!("{}: {:?}", row.symbol, row.latest_price);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────┐
//! │  CLI / caller    │
//! └────────┬─────────┘
//!          │
//!          ▼
//! ┌──────────────────┐     ┌──────────────────┐
//! │  SessionLoader   │────▶│ MarketDataSource │
//! └────────┬─────────┘     │ (mock / REST)    │
//!          │               └────────┬─────────┘
//!          ▼                        ▼
//! ┌──────────────────┐     ┌──────────────────┐
//! │    QuoteStore    │     │  record decoder  │
//! └────────┬─────────┘     └──────────────────┘
//!          │
//!          ▼
//! ┌──────────────────┐
//! │  Query Engine    │
//! │ (filter/search/  │
//! │  derive/page)    │
//! └──────────────────┘
//! ```

pub mod adapters;
pub mod data_source;
pub mod domain;
pub mod engine;
pub mod error;
pub mod format;
pub mod http_client;
pub mod record;
pub mod session;
pub mod store;

// Re-export commonly used types at crate root for convenience

// Adapter implementations
pub use adapters::{MockMarketData, RestMarketData};

// Data source trait and errors
pub use data_source::{MarketDataSource, SourceError, SourceErrorKind};

// Domain models
pub use domain::{
    validate_currency_code, CapBucket, Instrument, InstrumentType, MarketCap, PricePoint,
    PriceSeries, Symbol, Trend, UtcDateTime,
};

// Engine
pub use engine::{
    chart_points, daily_change, derive_board, detail_stats, latest_price, latest_volume,
    matches_search, paginate, sectors, BoardRow, ChangeDirection, DailyChange, DetailStats,
    FilterCriteria, Page, PageRequest, PriceRange, QueryState,
};

// Error types
pub use error::{CoreError, ValidationError};

// HTTP client types
pub use http_client::{
    HttpClient, HttpError, HttpRequest, HttpResponse, NoopHttpClient, ReqwestHttpClient,
};

// Record decoding
pub use record::{
    decode_instrument, decode_instruments, decode_price_point, decode_price_series, RecordError,
};

// Session and store
pub use session::{SessionConfig, SessionLoader};
pub use store::{QuoteStore, SeriesSlot};
