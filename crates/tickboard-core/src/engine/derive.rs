//! Pure derivations over a price series.
//!
//! Every function takes the series by reference (or its absence) and
//! returns a scalar result; nothing here mutates or re-sorts. "No data"
//! is a sentinel, never an error: an instrument without history is a
//! valid dashboard row.

use serde::{Deserialize, Serialize};

use crate::{PriceSeries, UtcDateTime};

/// Day-over-day movement of the closing price.
///
/// The zero value doubles as the "no signal" sentinel: fewer than two
/// points, or a zero previous close, both derive to zero rather than an
/// error or a non-finite number.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DailyChange {
    pub absolute: f64,
    pub percent: f64,
}

impl DailyChange {
    pub const fn is_positive(&self) -> bool {
        self.absolute >= 0.0
    }
}

/// Closing price of the chronologically last point; `None` when the
/// series is absent or empty.
pub fn latest_price(series: Option<&PriceSeries>) -> Option<f64> {
    series?.last().map(|point| point.close)
}

/// Volume of the chronologically last point; `None` when the series is
/// absent or empty.
pub fn latest_volume(series: Option<&PriceSeries>) -> Option<u64> {
    series?.last().map(|point| point.volume)
}

/// Change between the last two closes.
///
/// Needs at least two points; otherwise returns the zero sentinel. A
/// zero previous close would divide to infinity, so it also resolves to
/// the sentinel.
pub fn daily_change(series: Option<&PriceSeries>) -> DailyChange {
    let Some(series) = series else {
        return DailyChange::default();
    };

    let points = &series.points;
    if points.len() < 2 {
        return DailyChange::default();
    }

    let current = points[points.len() - 1].close;
    let previous = points[points.len() - 2].close;
    if previous == 0.0 {
        return DailyChange::default();
    }

    let absolute = current - previous;
    DailyChange {
        absolute,
        percent: absolute / previous * 100.0,
    }
}

/// Detail-card statistics for one instrument's fetched history.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DetailStats {
    pub latest_price: Option<f64>,
    pub latest_volume: Option<u64>,
    pub change: DailyChange,
    /// Highest `high` across the fetched series; `None` when empty.
    pub high_watermark: Option<f64>,
}

pub fn detail_stats(series: Option<&PriceSeries>) -> DetailStats {
    let high_watermark = series.and_then(|series| {
        series
            .points
            .iter()
            .map(|point| point.high)
            .fold(None, |max: Option<f64>, high| {
                Some(max.map_or(high, |value| value.max(high)))
            })
    });

    DetailStats {
        latest_price: latest_price(series),
        latest_volume: latest_volume(series),
        change: daily_change(series),
        high_watermark,
    }
}

/// `(timestamp, close)` pairs for the charting collaborator.
pub fn chart_points(series: &PriceSeries) -> Vec<(UtcDateTime, f64)> {
    series
        .points
        .iter()
        .map(|point| (point.timestamp, point.close))
        .collect()
}
