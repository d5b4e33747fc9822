//! Fetch session: instrument list plus the price-series batch.
//!
//! The list fetch is fatal on failure (there is nothing to display
//! without it). The per-symbol series fetches run as one unordered
//! batch; the whole batch is awaited before the store is returned, so
//! the engine never sees instruments whose history is still in flight.
//! A failure or timeout for one symbol is recorded in that symbol's slot
//! and never aborts the rest of the batch.
//!
//! Cancellation safety: loading builds a fresh [`QuoteStore`] and hands
//! it back by value. Dropping the `load` future mid-flight discards the
//! partial batch with it; no shared state exists for a later session to
//! inherit.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinSet;
use tracing::{info, warn};

use crate::data_source::{MarketDataSource, SourceError, SourceErrorKind};
use crate::store::{QuoteStore, SeriesSlot};

const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(5);

/// Tuning for one fetch session.
#[derive(Debug, Clone, Copy)]
pub struct SessionConfig {
    /// Upper bound on each individual series fetch. A timeout is
    /// isolated to its symbol, like any other per-symbol failure.
    pub fetch_timeout: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
        }
    }
}

/// Loads a [`QuoteStore`] snapshot from a data source.
pub struct SessionLoader {
    source: Arc<dyn MarketDataSource>,
    config: SessionConfig,
}

impl SessionLoader {
    pub fn new(source: Arc<dyn MarketDataSource>) -> Self {
        Self {
            source,
            config: SessionConfig::default(),
        }
    }

    pub fn with_config(mut self, config: SessionConfig) -> Self {
        self.config = config;
        self
    }

    /// Fetch the instrument list and every instrument's price series.
    ///
    /// # Errors
    ///
    /// Fails only when the instrument list itself cannot be fetched;
    /// per-symbol series failures are recorded in the store instead.
    pub async fn load(&self) -> Result<QuoteStore, SourceError> {
        let instruments = self.source.list_instruments().await?;
        info!(count = instruments.len(), "loaded instrument list");

        let mut batch = JoinSet::new();
        for instrument in &instruments {
            let source = Arc::clone(&self.source);
            let symbol = instrument.symbol.clone();
            let timeout = self.config.fetch_timeout;

            batch.spawn(async move {
                let result =
                    tokio::time::timeout(timeout, source.price_series(&symbol)).await;
                let slot = match result {
                    Ok(Ok(series)) => SeriesSlot::Loaded(series),
                    Ok(Err(error)) => {
                        warn!(%symbol, %error, "price series fetch failed");
                        SeriesSlot::Failed(error.kind())
                    }
                    Err(_) => {
                        warn!(%symbol, timeout_ms = timeout.as_millis() as u64,
                            "price series fetch timed out");
                        SeriesSlot::Failed(SourceErrorKind::Unavailable)
                    }
                };
                (symbol, slot)
            });
        }

        let mut series = HashMap::with_capacity(instruments.len());
        while let Some(joined) = batch.join_next().await {
            match joined {
                Ok((symbol, slot)) => {
                    series.insert(symbol, slot);
                }
                Err(error) => {
                    // A panicked fetch task loses its symbol; the affected
                    // instrument falls back to the absent-series sentinel.
                    warn!(%error, "price series fetch task failed to join");
                }
            }
        }

        Ok(QuoteStore::new(instruments, series))
    }
}
