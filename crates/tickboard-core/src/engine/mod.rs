//! The derivation & query engine.
//!
//! Stateless, pure functions over a [`crate::store::QuoteStore`]
//! snapshot: scalar derivations, filter predicates, search, pagination,
//! and the combined query state. Nothing in this module performs I/O or
//! mutates its inputs.

mod derive;
mod filter;
mod page;
mod query;
mod search;

pub use derive::{
    chart_points, daily_change, detail_stats, latest_price, latest_volume, DailyChange,
    DetailStats,
};
pub use filter::{ChangeDirection, FilterCriteria, PriceRange};
pub use page::{paginate, Page, PageRequest};
pub use query::{derive_board, sectors, BoardRow, QueryState};
pub use search::matches_search;
