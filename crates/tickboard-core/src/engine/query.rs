//! Combined query state and the board derivation.
//!
//! The dashboard's filter, search term, page number, and page size move
//! together: a change to any of the first three invalidates the page
//! number, which silently truncates to an empty page if left stale.
//! [`QueryState`] is therefore an immutable value object whose setters
//! enforce the reset, and [`derive_board`] is a pure function of
//! `(query, store)` — there is no other state to fall out of sync.

use serde::{Deserialize, Serialize};

use crate::data_source::SourceErrorKind;
use crate::engine::derive::{daily_change, latest_price, latest_volume, DailyChange};
use crate::engine::filter::FilterCriteria;
use crate::engine::page::{paginate, Page, PageRequest};
use crate::engine::search::matches_search;
use crate::store::QuoteStore;
use crate::{MarketCap, Symbol};

const DEFAULT_PAGE_SIZE: usize = 10;

/// Immutable dashboard query: criteria + search + page.
///
/// Changing the criteria, the search term, or the page size resets the
/// page number to 1; only an explicit page navigation keeps the rest of
/// the state and moves the page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryState {
    criteria: FilterCriteria,
    search: Option<String>,
    page_number: usize,
    page_size: usize,
}

impl Default for QueryState {
    fn default() -> Self {
        Self {
            criteria: FilterCriteria::default(),
            search: None,
            page_number: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl QueryState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    pub fn page_number(&self) -> usize {
        self.page_number
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Replace the filter criteria and reset to page 1.
    pub fn with_criteria(self, criteria: FilterCriteria) -> Self {
        Self {
            criteria,
            page_number: 1,
            ..self
        }
    }

    /// Replace the search term and reset to page 1. A blank term clears
    /// the search.
    pub fn with_search(self, term: impl Into<String>) -> Self {
        let term = term.into();
        let trimmed = term.trim();
        Self {
            search: (!trimmed.is_empty()).then(|| trimmed.to_owned()),
            page_number: 1,
            ..self
        }
    }

    /// Replace the page size and reset to page 1.
    pub fn with_page_size(self, page_size: usize) -> Self {
        Self {
            page_size,
            page_number: 1,
            ..self
        }
    }

    /// Navigate to a page, keeping everything else.
    pub fn with_page(self, page_number: usize) -> Self {
        Self {
            page_number,
            ..self
        }
    }

    fn page_request(&self) -> Result<PageRequest, crate::ValidationError> {
        PageRequest::new(self.page_number, self.page_size)
    }
}

/// One list-page row: everything the dashboard renders per instrument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardRow {
    pub symbol: Symbol,
    pub display_name: String,
    pub sector: String,
    pub market_cap: MarketCap,
    pub currency: String,
    pub latest_price: Option<f64>,
    pub latest_volume: Option<u64>,
    pub change: DailyChange,
    /// Present when this symbol's series fetch failed; the row is shown
    /// with sentinel values instead of being dropped.
    pub series_error: Option<SourceErrorKind>,
}

/// Derive the visible page from the query state and a store snapshot.
///
/// Filter and search are AND-combined predicates over the same candidate
/// set; row order is store load order throughout.
pub fn derive_board(
    query: &QueryState,
    store: &QuoteStore,
) -> Result<Page<BoardRow>, crate::ValidationError> {
    let request = query.page_request()?;
    let term = query.search().unwrap_or("");

    let rows: Vec<BoardRow> = store
        .instruments()
        .iter()
        .filter(|instrument| {
            let series = store.series(&instrument.symbol);
            query.criteria.matches(instrument, series) && matches_search(instrument, term)
        })
        .map(|instrument| {
            let series = store.series(&instrument.symbol);
            BoardRow {
                symbol: instrument.symbol.clone(),
                display_name: instrument.display_name.clone(),
                sector: instrument.sector.clone(),
                market_cap: instrument.market_cap.clone(),
                currency: instrument.currency.clone(),
                latest_price: latest_price(series),
                latest_volume: latest_volume(series),
                change: daily_change(series),
                series_error: store.series_failure(&instrument.symbol),
            }
        })
        .collect();

    Ok(paginate(rows, request))
}

/// Distinct sectors in first-seen order, for the filter dropdown.
pub fn sectors(store: &QuoteStore) -> Vec<String> {
    let mut seen = Vec::new();
    for instrument in store.instruments() {
        if !seen.contains(&instrument.sector) {
            seen.push(instrument.sector.clone());
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::filter::ChangeDirection;
    use crate::store::SeriesSlot;
    use crate::{Instrument, InstrumentType, UtcDateTime};
    use std::collections::HashMap;

    fn instrument(symbol: &str, display_name: &str, sector: &str) -> Instrument {
        Instrument::new(
            Symbol::parse(symbol).expect("valid symbol"),
            display_name,
            display_name,
            sector,
            "Industry",
            MarketCap::parse("1000000000").expect("valid cap"),
            "USD",
            "NMS",
            InstrumentType::Equity,
            UtcDateTime::parse("2024-11-11 05:33:12").expect("valid timestamp"),
        )
        .expect("valid instrument")
    }

    fn store_of(instruments: Vec<Instrument>) -> QuoteStore {
        QuoteStore::new(instruments, HashMap::new())
    }

    #[test]
    fn setters_reset_the_page_number() {
        let navigated = QueryState::new().with_page(4);
        assert_eq!(navigated.page_number(), 4);

        assert_eq!(
            navigated.clone().with_search("apple").page_number(),
            1,
            "search change must reset the page"
        );
        assert_eq!(
            navigated
                .clone()
                .with_criteria(FilterCriteria {
                    change: Some(ChangeDirection::Positive),
                    ..FilterCriteria::default()
                })
                .page_number(),
            1,
            "criteria change must reset the page"
        );
        assert_eq!(
            navigated.with_page_size(25).page_number(),
            1,
            "page size change must reset the page"
        );
    }

    #[test]
    fn blank_search_clears_the_term() {
        let state = QueryState::new().with_search("apple").with_search("   ");
        assert_eq!(state.search(), None);
    }

    #[test]
    fn unconstrained_query_returns_every_instrument_in_load_order() {
        let store = store_of(vec![
            instrument("XOM", "ExxonMobil", "Energy"),
            instrument("AAPL", "Apple Inc.", "Technology"),
            instrument("JPM", "JPMorgan", "Financial"),
        ]);

        let page = derive_board(&QueryState::new(), &store).expect("must derive");
        let symbols: Vec<_> = page.items.iter().map(|row| row.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["XOM", "AAPL", "JPM"]);
        assert_eq!(page.total_items, 3);
    }

    #[test]
    fn search_and_filter_compose_with_and() {
        let store = store_of(vec![
            instrument("AAPL", "Apple Inc.", "Technology"),
            instrument("MSFT", "Microsoft", "Technology"),
            instrument("XOM", "ExxonMobil", "Energy"),
        ]);

        let query = QueryState::new()
            .with_criteria(FilterCriteria {
                sector: Some(String::from("Technology")),
                ..FilterCriteria::default()
            })
            .with_search("ap");

        let page = derive_board(&query, &store).expect("must derive");
        let symbols: Vec<_> = page.items.iter().map(|row| row.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["AAPL"]);
    }

    #[test]
    fn failed_series_rows_carry_the_failure_and_sentinels() {
        let aapl = Symbol::parse("AAPL").expect("valid symbol");
        let mut slots = HashMap::new();
        slots.insert(aapl.clone(), SeriesSlot::Failed(SourceErrorKind::Unavailable));

        let store = QuoteStore::new(vec![instrument("AAPL", "Apple Inc.", "Technology")], slots);
        let page = derive_board(&QueryState::new(), &store).expect("must derive");

        let row = &page.items[0];
        assert_eq!(row.latest_price, None);
        assert_eq!(row.latest_volume, None);
        assert_eq!(row.change, DailyChange::default());
        assert_eq!(row.series_error, Some(SourceErrorKind::Unavailable));
    }

    #[test]
    fn distinct_sectors_in_first_seen_order() {
        let store = store_of(vec![
            instrument("AAPL", "Apple Inc.", "Technology"),
            instrument("MSFT", "Microsoft", "Technology"),
            instrument("XOM", "ExxonMobil", "Energy"),
            instrument("JPM", "JPMorgan", "Financial"),
            instrument("CVX", "Chevron", "Energy"),
        ]);

        assert_eq!(sectors(&store), vec!["Technology", "Energy", "Financial"]);
    }
}
