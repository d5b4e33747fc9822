//! Behavior-driven tests for the derivation & query engine.
//!
//! These tests verify the engine's externally observable contract:
//! sentinel defaults, filter composition, bucket totality, pagination
//! arithmetic, and the query-state reset invariant.

use std::collections::HashMap;

use tickboard_core::{
    daily_change, derive_board, latest_price, latest_volume, matches_search, paginate, CapBucket,
    ChangeDirection, DailyChange, FilterCriteria, MarketCap, PageRequest, PriceRange, PriceSeries,
    QueryState, QuoteStore, SeriesSlot, Symbol,
};
use tickboard_tests::{instrument, series_of_closes};

fn store_with_series(rows: Vec<(tickboard_core::Instrument, Option<PriceSeries>)>) -> QuoteStore {
    let mut instruments = Vec::new();
    let mut slots = HashMap::new();
    for (inst, series) in rows {
        if let Some(series) = series {
            slots.insert(inst.symbol.clone(), SeriesSlot::Loaded(series));
        }
        instruments.push(inst);
    }
    QuoteStore::new(instruments, slots)
}

// =============================================================================
// Derivations: sentinels instead of errors
// =============================================================================

#[test]
fn when_a_series_is_empty_or_absent_latest_values_are_the_no_data_sentinel() {
    // Given: no fetched history
    let empty = PriceSeries::default();

    // Then: the derivations answer None, they do not fail
    assert_eq!(latest_price(None), None);
    assert_eq!(latest_price(Some(&empty)), None);
    assert_eq!(latest_volume(None), None);
    assert_eq!(latest_volume(Some(&empty)), None);
}

#[test]
fn when_fewer_than_two_points_exist_daily_change_is_the_zero_sentinel() {
    for series in [None, Some(PriceSeries::default()), Some(series_of_closes(&[42.0]))] {
        assert_eq!(daily_change(series.as_ref()), DailyChange::default());
    }
}

#[test]
fn daily_change_derives_from_the_last_two_closes() {
    // Given: the closing prices 100 then 105
    let series = series_of_closes(&[100.0, 105.0]);

    // When: the change is derived
    let change = daily_change(Some(&series));

    // Then: +5 absolute, +5.0 percent
    assert_eq!(change.absolute, 5.0);
    assert_eq!(change.percent, 5.0);
}

// =============================================================================
// Filter: identity, composition, bucket totality
// =============================================================================

#[test]
fn when_every_criterion_is_absent_the_filter_is_the_identity() {
    let store = store_with_series(vec![
        (instrument("AAPL", "Apple Inc.", "Technology", "3430681935872"), None),
        (instrument("XOM", "ExxonMobil", "Energy", "468681935872"), None),
        (instrument("DIS", "Disney", "Communication Services", "198681935872"), None),
    ]);

    let query = QueryState::new().with_criteria(FilterCriteria::default());
    let page = derive_board(&query, &store).expect("must derive");

    assert_eq!(page.total_items, 3, "identity filter keeps every row");
    let symbols: Vec<_> = page.items.iter().map(|row| row.symbol.as_str()).collect();
    assert_eq!(symbols, vec!["AAPL", "XOM", "DIS"], "order is load order");
}

#[test]
fn large_cap_filter_keeps_both_scenario_instruments() {
    // AAPL at 3.4e12 and XOM at 4.6e11 are both >= 10e9.
    let store = store_with_series(vec![
        (instrument("AAPL", "Apple Inc.", "Technology", "3400000000000"), None),
        (instrument("XOM", "ExxonMobil", "Energy", "460000000000"), None),
    ]);

    let query = QueryState::new().with_criteria(FilterCriteria {
        market_cap: Some(CapBucket::Large),
        ..FilterCriteria::default()
    });
    let page = derive_board(&query, &store).expect("must derive");
    assert_eq!(page.total_items, 2);

    let energy_only = QueryState::new().with_criteria(FilterCriteria {
        sector: Some(String::from("Energy")),
        ..FilterCriteria::default()
    });
    let page = derive_board(&energy_only, &store).expect("must derive");
    let symbols: Vec<_> = page.items.iter().map(|row| row.symbol.as_str()).collect();
    assert_eq!(symbols, vec!["XOM"]);
}

#[test]
fn every_market_cap_value_lands_in_exactly_one_bucket() {
    let samples = [
        "0",
        "1",
        "1999999999",
        "1999999999.999999",
        "2000000000",
        "2000000000.000001",
        "9999999999",
        "10000000000",
        "10000000000.000001",
        "3430681935872",
        "9007199254740993000",
    ];

    for raw in samples {
        let cap = MarketCap::parse(raw).expect("must parse");
        let memberships = [CapBucket::Small, CapBucket::Mid, CapBucket::Large]
            .into_iter()
            .filter(|bucket| cap.bucket() == *bucket)
            .count();
        assert_eq!(memberships, 1, "value {raw} must match exactly one bucket");
    }
}

#[test]
fn an_instrument_without_history_passes_positive_change_but_fails_a_price_floor() {
    let store = store_with_series(vec![(
        instrument("AAPL", "Apple Inc.", "Technology", "3430681935872"),
        None,
    )]);

    let positive = QueryState::new().with_criteria(FilterCriteria {
        change: Some(ChangeDirection::Positive),
        ..FilterCriteria::default()
    });
    assert_eq!(
        derive_board(&positive, &store).expect("must derive").total_items,
        1,
        "zero-change sentinel counts as positive"
    );

    let priced = QueryState::new().with_criteria(FilterCriteria {
        price_range: Some(PriceRange::AtLeast { min: 500.0 }),
        ..FilterCriteria::default()
    });
    assert_eq!(
        derive_board(&priced, &store).expect("must derive").total_items,
        0,
        "missing history derives a zero latest price"
    );
}

#[test]
fn filter_and_search_compose_as_and_in_either_order() {
    let tech = FilterCriteria {
        sector: Some(String::from("Technology")),
        ..FilterCriteria::default()
    };
    let rows = vec![
        (instrument("AAPL", "Apple Inc.", "Technology", "3430681935872"), Some(series_of_closes(&[100.0, 105.0]))),
        (instrument("MSFT", "Microsoft", "Technology", "2890681935872"), Some(series_of_closes(&[300.0, 310.0]))),
        (instrument("AMZN", "Amazon", "Consumer Cyclical", "1590681935872"), Some(series_of_closes(&[140.0, 139.0]))),
    ];
    let store = store_with_series(rows);

    // Predicate-level: both evaluation orders agree on every instrument.
    for inst in store.instruments() {
        let series = store.series(&inst.symbol);
        let filter_then_search = tech.matches(inst, series) && matches_search(inst, "a");
        let search_then_filter = matches_search(inst, "a") && tech.matches(inst, series);
        assert_eq!(filter_then_search, search_then_filter);
    }

    // Query-level: "a" matches AAPL by symbol and Amazon by name; the
    // sector clause then keeps only AAPL.
    let query = QueryState::new().with_criteria(tech).with_search("a");
    let page = derive_board(&query, &store).expect("must derive");
    let symbols: Vec<_> = page.items.iter().map(|row| row.symbol.as_str()).collect();
    assert_eq!(symbols, vec!["AAPL"]);
}

#[test]
fn search_matches_symbol_and_display_name_case_insensitively() {
    let aapl = instrument("AAPL", "Apple Inc.", "Technology", "3430681935872");
    let snap = instrument("SNAP", "Snap Inc.", "Technology", "20000000000");

    // "AP" hits the AAPL symbol and the lowercase "ap" inside "Snap".
    assert!(matches_search(&aapl, "AP"));
    assert!(matches_search(&snap, "AP"));
    assert!(!matches_search(&snap, "XY"));
}

// =============================================================================
// Pagination
// =============================================================================

#[test]
fn concatenating_every_page_reconstructs_the_input_exactly() {
    let items: Vec<u32> = (1..=47).collect();
    let request = PageRequest::new(1, 9).expect("valid request");
    let total_pages = paginate(items.clone(), request).total_pages;

    let mut rebuilt = Vec::new();
    for page_number in 1..=total_pages {
        let request = PageRequest::new(page_number, 9).expect("valid request");
        rebuilt.extend(paginate(items.clone(), request).items);
    }

    assert_eq!(rebuilt, items, "no duplicate or missing element");
}

#[test]
fn out_of_range_pages_are_empty_and_total_pages_never_drops_below_one() {
    let request = PageRequest::new(99, 10).expect("valid request");
    let page = paginate((1..=15).collect::<Vec<_>>(), request);
    assert!(page.is_empty());
    assert_eq!(page.total_pages, 2);

    let request = PageRequest::new(1, 10).expect("valid request");
    let empty = paginate(Vec::<u32>::new(), request);
    assert_eq!(empty.total_pages, 1);
    assert_eq!(empty.total_items, 0);
}

#[test]
fn showing_range_matches_the_visible_rows() {
    let request = PageRequest::new(2, 10).expect("valid request");
    let page = paginate((1..=15).collect::<Vec<_>>(), request);

    assert_eq!(page.items, (11..=15).collect::<Vec<_>>());
    assert_eq!((page.showing_from, page.showing_to), (11, 15));
}

// =============================================================================
// Query state
// =============================================================================

#[test]
fn changing_page_size_search_or_criteria_resets_the_page_number() {
    let state = QueryState::new().with_page(7);

    assert_eq!(state.clone().with_page_size(25).page_number(), 1);
    assert_eq!(state.clone().with_search("apple").page_number(), 1);
    assert_eq!(
        state
            .with_criteria(FilterCriteria {
                sector: Some(String::from("Energy")),
                ..FilterCriteria::default()
            })
            .page_number(),
        1
    );
}

#[test]
fn a_stale_page_number_would_clip_to_an_empty_page_without_the_reset() {
    // Ten instruments, page 2 of 5-per-page is valid.
    let rows: Vec<_> = (0..10)
        .map(|index| {
            (
                instrument(
                    &format!("SYM{index}"),
                    &format!("Company {index}"),
                    "Technology",
                    "3000000000",
                ),
                None,
            )
        })
        .collect();
    let store = store_with_series(rows);

    let paged = QueryState::new().with_page_size(5).with_page(2);
    assert_eq!(derive_board(&paged, &store).expect("must derive").items.len(), 5);

    // Narrow the search while keeping the stale page: the reset saves
    // the caller from an empty page.
    let searched = paged.with_search("Company 3");
    assert_eq!(searched.page_number(), 1);
    let page = derive_board(&searched, &store).expect("must derive");
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].symbol.as_str(), "SYM3");
}

// =============================================================================
// Board rows
// =============================================================================

#[test]
fn failed_fetches_keep_their_row_with_sentinel_values() {
    let aapl = Symbol::parse("AAPL").expect("valid symbol");
    let mut slots = HashMap::new();
    slots.insert(
        aapl.clone(),
        SeriesSlot::Failed(tickboard_core::SourceErrorKind::Unavailable),
    );
    let store = QuoteStore::new(
        vec![instrument("AAPL", "Apple Inc.", "Technology", "3430681935872")],
        slots,
    );

    let page = derive_board(&QueryState::new(), &store).expect("must derive");
    assert_eq!(page.total_items, 1, "the instrument does not disappear");

    let row = &page.items[0];
    assert_eq!(row.latest_price, None);
    assert_eq!(row.change, DailyChange::default());
    assert_eq!(
        row.series_error,
        Some(tickboard_core::SourceErrorKind::Unavailable)
    );
}
