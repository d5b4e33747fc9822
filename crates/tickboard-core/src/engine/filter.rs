//! Filter criteria and predicate evaluation.
//!
//! One instrument passes when every present clause passes; absent
//! clauses always pass. Clauses are checked in a fixed order (sector,
//! price range, market-cap bucket, change direction) and short-circuit
//! on the first failure.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::engine::derive::{daily_change, latest_price};
use crate::{CapBucket, Instrument, PriceSeries, ValidationError};

/// Latest-price constraint. Both bounds are inclusive; the open-ended
/// form (`500+`) has no upper bound.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceRange {
    Between { min: f64, max: f64 },
    AtLeast { min: f64 },
}

impl PriceRange {
    pub fn contains(&self, price: f64) -> bool {
        match self {
            Self::Between { min, max } => price >= *min && price <= *max,
            Self::AtLeast { min } => price >= *min,
        }
    }
}

impl Display for PriceRange {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Between { min, max } => write!(f, "{min}-{max}"),
            Self::AtLeast { min } => write!(f, "{min}+"),
        }
    }
}

/// Parses the dashboard's range spellings: `0-50`, `100-500`, `500+`.
impl FromStr for PriceRange {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        let invalid = || ValidationError::InvalidPriceRange {
            value: value.to_owned(),
        };

        if let Some(min) = trimmed.strip_suffix('+') {
            let min: f64 = min.parse().map_err(|_| invalid())?;
            if !min.is_finite() || min < 0.0 {
                return Err(invalid());
            }
            return Ok(Self::AtLeast { min });
        }

        let (min, max) = trimmed.split_once('-').ok_or_else(invalid)?;
        let min: f64 = min.parse().map_err(|_| invalid())?;
        let max: f64 = max.parse().map_err(|_| invalid())?;
        if !min.is_finite() || !max.is_finite() || min < 0.0 || max < min {
            return Err(invalid());
        }

        Ok(Self::Between { min, max })
    }
}

/// Daily-change sign constraint. Zero change counts as positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeDirection {
    Positive,
    Negative,
}

impl FromStr for ChangeDirection {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "positive" => Ok(Self::Positive),
            "negative" => Ok(Self::Negative),
            other => Err(ValidationError::InvalidChangeDirection {
                value: other.to_owned(),
            }),
        }
    }
}

/// Board filter; every field absent means "no constraint".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Exact, case-sensitive sector match.
    pub sector: Option<String>,
    pub price_range: Option<PriceRange>,
    pub market_cap: Option<CapBucket>,
    pub change: Option<ChangeDirection>,
}

impl FilterCriteria {
    pub fn is_unconstrained(&self) -> bool {
        self.sector.is_none()
            && self.price_range.is_none()
            && self.market_cap.is_none()
            && self.change.is_none()
    }

    /// Evaluate the combined predicate for one instrument.
    ///
    /// An instrument with no fetched series derives a latest price of
    /// zero and the zero-change sentinel: it passes a `positive` change
    /// clause but fails any price range that requires `> 0`.
    pub fn matches(&self, instrument: &Instrument, series: Option<&PriceSeries>) -> bool {
        if let Some(sector) = &self.sector {
            if &instrument.sector != sector {
                return false;
            }
        }

        if let Some(range) = &self.price_range {
            let price = latest_price(series).unwrap_or(0.0);
            if !range.contains(price) {
                return false;
            }
        }

        if let Some(bucket) = &self.market_cap {
            if instrument.market_cap.bucket() != *bucket {
                return false;
            }
        }

        if let Some(direction) = &self.change {
            let change = daily_change(series);
            let passes = match direction {
                ChangeDirection::Positive => change.is_positive(),
                ChangeDirection::Negative => !change.is_positive(),
            };
            if !passes {
                return false;
            }
        }

        true
    }
}
