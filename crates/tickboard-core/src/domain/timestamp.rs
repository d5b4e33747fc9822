use std::fmt::{Display, Formatter};

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{OffsetDateTime, PrimitiveDateTime, UtcOffset};

use crate::ValidationError;

/// Timestamp guaranteed to be UTC.
///
/// Parses RFC3339 as well as the backend's space-separated wire form
/// (`2024-11-11 05:33:12.803444`, with or without fractional seconds),
/// which carries no offset and is taken to be UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UtcDateTime(OffsetDateTime);

const WIRE_WITH_SUBSECOND: &[time::format_description::BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second].[subsecond]");
const WIRE_PLAIN: &[time::format_description::BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

impl UtcDateTime {
    pub fn now() -> Self {
        Self(OffsetDateTime::now_utc())
    }

    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        if let Ok(parsed) = OffsetDateTime::parse(input, &Rfc3339) {
            return Self::from_offset_datetime(parsed).map_err(|_| {
                ValidationError::InvalidTimestamp {
                    value: input.to_owned(),
                }
            });
        }

        let naive = PrimitiveDateTime::parse(input, WIRE_WITH_SUBSECOND)
            .or_else(|_| PrimitiveDateTime::parse(input, WIRE_PLAIN))
            .map_err(|_| ValidationError::InvalidTimestamp {
                value: input.to_owned(),
            })?;

        Ok(Self(naive.assume_utc()))
    }

    pub fn from_offset_datetime(value: OffsetDateTime) -> Result<Self, ValidationError> {
        if value.offset() != UtcOffset::UTC {
            return Err(ValidationError::InvalidTimestamp {
                value: value
                    .format(&Rfc3339)
                    .unwrap_or_else(|_| String::from("<unformattable>")),
            });
        }

        Ok(Self(value))
    }

    pub fn into_inner(self) -> OffsetDateTime {
        self.0
    }

    pub fn format_rfc3339(self) -> String {
        self.0
            .format(&Rfc3339)
            .expect("UtcDateTime must be RFC3339 formattable")
    }
}

impl Display for UtcDateTime {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.format_rfc3339())
    }
}

impl Serialize for UtcDateTime {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.format_rfc3339())
    }
}

impl<'de> Deserialize<'de> for UtcDateTime {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Self::parse(&value).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rfc3339_timestamp() {
        let parsed = UtcDateTime::parse("2024-01-01T00:00:00Z").expect("must parse");
        assert_eq!(parsed.format_rfc3339(), "2024-01-01T00:00:00Z");
    }

    #[test]
    fn parses_wire_timestamp_with_subsecond() {
        let parsed = UtcDateTime::parse("2024-11-11 05:33:12.803444").expect("must parse");
        assert_eq!(parsed.into_inner().hour(), 5);
        assert_eq!(parsed.into_inner().microsecond(), 803_444);
    }

    #[test]
    fn parses_wire_timestamp_without_subsecond() {
        let parsed = UtcDateTime::parse("2024-10-01 00:00:00").expect("must parse");
        assert_eq!(parsed.format_rfc3339(), "2024-10-01T00:00:00Z");
    }

    #[test]
    fn rejects_non_utc_timestamp() {
        let err = UtcDateTime::parse("2024-01-01T01:00:00+01:00").expect_err("must fail");
        assert!(matches!(err, ValidationError::InvalidTimestamp { .. }));
    }

    #[test]
    fn rejects_garbage() {
        let err = UtcDateTime::parse("yesterday").expect_err("must fail");
        assert!(matches!(err, ValidationError::InvalidTimestamp { .. }));
    }
}
