//! Display helpers for big numbers.
//!
//! The dashboard shows market caps and volumes in compact form
//! (`3.43T`, `890.68B`, `25.5M`). These helpers are display-only; the
//! underlying values stay exact.

use bigdecimal::ToPrimitive;

use crate::MarketCap;

/// Compact form of a market cap: `3.43T`, `890.68B`, ...
pub fn format_market_cap(cap: &MarketCap) -> String {
    // Precision only matters for storage and comparisons; two display
    // decimals are well within f64.
    format_scaled(cap.as_decimal().to_f64().unwrap_or(0.0))
}

/// Compact form of a share volume: `25.50M`, `980.00K`, ...
pub fn format_volume(volume: u64) -> String {
    format_scaled(volume as f64)
}

fn format_scaled(value: f64) -> String {
    const SCALES: [(f64, &str); 4] = [
        (1e12, "T"),
        (1e9, "B"),
        (1e6, "M"),
        (1e3, "K"),
    ];

    for (scale, suffix) in SCALES {
        if value >= scale {
            return format!("{:.2}{}", value / scale, suffix);
        }
    }

    format!("{value:.2}")
}
