use std::fmt::{Display, Formatter};
use std::str::FromStr;
use std::sync::LazyLock;

use bigdecimal::BigDecimal;
use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::ValidationError;

static MID_FLOOR: LazyLock<BigDecimal> = LazyLock::new(|| BigDecimal::from(2_000_000_000_u64));
static LARGE_FLOOR: LazyLock<BigDecimal> = LazyLock::new(|| BigDecimal::from(10_000_000_000_u64));

/// Market capitalization in the instrument's currency.
///
/// Kept as an arbitrary-precision decimal: source values exceed 2^53 and
/// must not be rounded through `f64`. The wire form is a decimal string.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct MarketCap(BigDecimal);

impl MarketCap {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        let value =
            BigDecimal::from_str(trimmed).map_err(|_| ValidationError::InvalidMarketCap {
                value: input.to_owned(),
            })?;

        if value < BigDecimal::from(0) {
            return Err(ValidationError::InvalidMarketCap {
                value: input.to_owned(),
            });
        }

        Ok(Self(value))
    }

    pub fn as_decimal(&self) -> &BigDecimal {
        &self.0
    }

    /// Size-class bucket. Every value lands in exactly one bucket:
    /// small `< 2e9`, mid `[2e9, 10e9)`, large `>= 10e9`.
    pub fn bucket(&self) -> CapBucket {
        if self.0 >= *LARGE_FLOOR {
            CapBucket::Large
        } else if self.0 >= *MID_FLOOR {
            CapBucket::Mid
        } else {
            CapBucket::Small
        }
    }
}

impl Display for MarketCap {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for MarketCap {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value)
    }
}

impl Serialize for MarketCap {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0.to_string())
    }
}

impl<'de> Deserialize<'de> for MarketCap {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Self::parse(&value).map_err(D::Error::custom)
    }
}

/// Market-cap size class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CapBucket {
    Small,
    Mid,
    Large,
}

impl CapBucket {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Mid => "mid",
            Self::Large => "large",
        }
    }
}

impl Display for CapBucket {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CapBucket {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "small" => Ok(Self::Small),
            "mid" => Ok(Self::Mid),
            "large" => Ok(Self::Large),
            other => Err(ValidationError::InvalidCapBucket {
                value: other.to_owned(),
            }),
        }
    }
}
