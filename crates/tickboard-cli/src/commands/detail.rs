use std::fmt::Write as _;

use serde_json::json;

use tickboard_core::format::{format_market_cap, format_volume};
use tickboard_core::{
    detail_stats, DetailStats, Instrument, MarketDataSource, SourceErrorKind, Symbol,
};

use crate::cli::DetailArgs;
use crate::error::CliError;

pub async fn run(
    args: &DetailArgs,
    source: &dyn MarketDataSource,
) -> Result<super::CommandOutput, CliError> {
    let symbol = Symbol::parse(&args.symbol)?;
    let instrument = source.instrument_detail(&symbol).await?;

    // A known symbol with no history is a valid detail view: the card
    // shows sentinel values. Anything else still fails.
    let series = match source.price_series(&symbol).await {
        Ok(series) => Some(series),
        Err(error) if error.kind() == SourceErrorKind::NotFound => None,
        Err(error) => return Err(error.into()),
    };

    let stats = detail_stats(series.as_ref());
    let data = json!({
        "instrument": instrument,
        "stats": stats,
    });

    Ok(super::CommandOutput {
        table: render_table(&instrument, &stats),
        data,
    })
}

fn render_table(instrument: &Instrument, stats: &DetailStats) -> String {
    let mut table = String::new();

    let _ = writeln!(table, "{} - {}", instrument.symbol, instrument.long_name);
    let _ = writeln!(
        table,
        "{} / {} ({})",
        instrument.sector, instrument.industry, instrument.exchange_code
    );
    let _ = writeln!(table);

    let price = stats
        .latest_price
        .map_or_else(|| String::from("-"), |price| format!("${price:.2}"));
    let volume = stats
        .latest_volume
        .map_or_else(|| String::from("-"), format_volume);
    let high = stats
        .high_watermark
        .map_or_else(|| String::from("-"), |high| format!("${high:.2}"));

    let _ = writeln!(table, "{:<16} {}", "Current Price", price);
    let _ = writeln!(
        table,
        "{:<16} ${:.2} ({:.2}%)",
        "Daily Change", stats.change.absolute, stats.change.percent
    );
    let _ = writeln!(table, "{:<16} {}", "Volume", volume);
    let _ = writeln!(
        table,
        "{:<16} {} {}",
        "Market Cap",
        format_market_cap(&instrument.market_cap),
        instrument.currency
    );
    let _ = writeln!(table, "{:<16} {}", "High Watermark", high);
    let _ = writeln!(table, "{:<16} {}", "Last Updated", instrument.last_updated);

    table
}
