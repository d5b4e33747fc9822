//! Free-text search over the board.
//!
//! Case-insensitive substring match against the symbol or the display
//! name. Search composes with [`crate::engine::FilterCriteria`] as a
//! plain AND; evaluation order never changes the result set.

use crate::Instrument;

/// Whether the instrument matches the search term.
///
/// An empty or whitespace-only term matches everything.
pub fn matches_search(instrument: &Instrument, term: &str) -> bool {
    let term = term.trim();
    if term.is_empty() {
        return true;
    }

    let needle = term.to_lowercase();
    instrument.symbol.as_str().to_lowercase().contains(&needle)
        || instrument.display_name.to_lowercase().contains(&needle)
}
