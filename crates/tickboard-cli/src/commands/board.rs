use std::fmt::Write as _;

use tickboard_core::format::{format_market_cap, format_volume};
use tickboard_core::{
    derive_board, BoardRow, FilterCriteria, Page, PriceRange, QueryState, QuoteStore,
};

use crate::cli::BoardArgs;
use crate::error::CliError;

pub fn run(args: &BoardArgs, store: &QuoteStore) -> Result<super::CommandOutput, CliError> {
    let criteria = FilterCriteria {
        sector: args.sector.clone(),
        price_range: args
            .price_range
            .as_deref()
            .map(str::parse::<PriceRange>)
            .transpose()?,
        market_cap: args.market_cap.map(Into::into),
        change: args.change.map(Into::into),
    };

    let mut query = QueryState::new()
        .with_criteria(criteria)
        .with_page_size(args.page_size);
    if let Some(term) = &args.search {
        query = query.with_search(term.clone());
    }
    // Page navigation last; every setter above resets it to 1.
    query = query.with_page(args.page);

    let page = derive_board(&query, store)?;
    let data = serde_json::to_value(&page)?;

    Ok(super::CommandOutput {
        table: render_table(&page),
        data,
    })
}

fn render_table(page: &Page<BoardRow>) -> String {
    let mut table = String::new();

    let _ = writeln!(
        table,
        "{:<8} {:<26} {:<24} {:>20} {:>12} {:>10} {:>12}",
        "Symbol", "Name", "Sector", "Daily Change", "Price", "Volume", "Market Cap"
    );

    for row in &page.items {
        let _ = writeln!(
            table,
            "{:<8} {:<26} {:<24} {:>20} {:>12} {:>10} {:>12}",
            row.symbol,
            row.display_name,
            row.sector,
            format_change(row),
            format_price(row.latest_price),
            row.latest_volume.map_or_else(|| String::from("-"), format_volume),
            format_market_cap(&row.market_cap),
        );
    }

    if page.is_empty() {
        let _ = writeln!(table, "(no instruments match the current query)");
    }

    let _ = writeln!(
        table,
        "Showing {} to {} of {} (page {} of {})",
        page.showing_from, page.showing_to, page.total_items, page.page_number, page.total_pages
    );

    table
}

fn format_price(price: Option<f64>) -> String {
    match price {
        Some(price) => format!("${price:.2}"),
        None => String::from("-"),
    }
}

fn format_change(row: &BoardRow) -> String {
    if row.series_error.is_some() {
        return String::from("unavailable");
    }
    format!(
        "{}${:.2} ({:.2}%)",
        if row.change.is_positive() { "+" } else { "-" },
        row.change.absolute.abs(),
        row.change.percent
    )
}
