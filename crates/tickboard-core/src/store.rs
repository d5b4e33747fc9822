//! Session-scoped quote store.
//!
//! Pure data holder: the instrument list in load order plus one series
//! slot per symbol. It computes nothing; every derived value lives in
//! [`crate::engine`]. A new fetch session replaces the store wholesale.

use std::collections::HashMap;

use crate::data_source::SourceErrorKind;
use crate::{Instrument, PriceSeries, Symbol};

/// Outcome of one instrument's price-series fetch.
#[derive(Debug, Clone, PartialEq)]
pub enum SeriesSlot {
    Loaded(PriceSeries),
    /// The fetch failed; the instrument still appears on the board with
    /// sentinel derived values instead of disappearing silently.
    Failed(SourceErrorKind),
}

/// Fetched instruments and their price histories for one session.
#[derive(Debug, Clone, Default)]
pub struct QuoteStore {
    instruments: Vec<Instrument>,
    series: HashMap<Symbol, SeriesSlot>,
}

impl QuoteStore {
    pub fn new(instruments: Vec<Instrument>, series: HashMap<Symbol, SeriesSlot>) -> Self {
        Self {
            instruments,
            series,
        }
    }

    /// Instruments in default display order (source load order).
    pub fn instruments(&self) -> &[Instrument] {
        &self.instruments
    }

    pub fn instrument(&self, symbol: &Symbol) -> Option<&Instrument> {
        self.instruments
            .iter()
            .find(|instrument| &instrument.symbol == symbol)
    }

    /// The loaded series for a symbol, if its fetch succeeded.
    pub fn series(&self, symbol: &Symbol) -> Option<&PriceSeries> {
        match self.series.get(symbol) {
            Some(SeriesSlot::Loaded(series)) => Some(series),
            _ => None,
        }
    }

    /// The recorded fetch failure for a symbol, if any.
    pub fn series_failure(&self, symbol: &Symbol) -> Option<SourceErrorKind> {
        match self.series.get(symbol) {
            Some(SeriesSlot::Failed(kind)) => Some(*kind),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.instruments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instruments.is_empty()
    }
}
