use std::fmt::Write as _;

use serde_json::json;

use tickboard_core::{MarketDataSource, PricePoint, Symbol, Trend};

use crate::cli::HistoryArgs;
use crate::error::CliError;

pub async fn run(
    args: &HistoryArgs,
    source: &dyn MarketDataSource,
) -> Result<super::CommandOutput, CliError> {
    let symbol = Symbol::parse(&args.symbol)?;
    let series = source.price_series(&symbol).await?;

    let skip = match args.limit {
        Some(limit) => series.len().saturating_sub(limit),
        None => 0,
    };
    let points: Vec<&PricePoint> = series.points.iter().skip(skip).collect();

    let data = json!({
        "symbol": symbol,
        "points": points,
    });

    Ok(super::CommandOutput {
        table: render_table(&symbol, &points),
        data,
    })
}

fn render_table(symbol: &Symbol, points: &[&PricePoint]) -> String {
    let mut table = String::new();

    let _ = writeln!(table, "Price history for {symbol}");
    let _ = writeln!(
        table,
        "{:>4} {:<22} {:>10} {:>10} {:>10} {:>10} {:>12} {:>6}",
        "#", "Timestamp", "Open", "High", "Low", "Close", "Volume", "Trend"
    );

    for point in points {
        let trend = match point.trend {
            Trend::Up => "up",
            Trend::Down => "down",
        };
        let _ = writeln!(
            table,
            "{:>4} {:<22} {:>10.2} {:>10.2} {:>10.2} {:>10.2} {:>12} {:>6}",
            point.sequence,
            point.timestamp.to_string(),
            point.open,
            point.high,
            point.low,
            point.close,
            point.volume,
            trend
        );
    }

    if points.is_empty() {
        let _ = writeln!(table, "(no trading history)");
    }

    table
}
