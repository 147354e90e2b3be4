//! Wire-format helpers shared by request and response types.
//!
//! The gateway uses a few conventions that serde does not handle out of the
//! box: space-separated timestamps, dates without a time part, booleans sent
//! as `0`/`1` and money amounts that may arrive as numbers or strings.

use chrono::{NaiveDate, NaiveDateTime};
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serializer};
use std::fmt;

/// Timestamp format used in every response (`YYYY-MM-DD HH:MM:SS`).
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Date format used by the search endpoints (`YYYY-MM-DD`).
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses a gateway timestamp.
///
/// # Examples
///
/// ```
/// use cardlink_rs::utils::parse_datetime;
///
/// let at = parse_datetime("2024-01-01 12:00:00").unwrap();
/// assert_eq!(at.to_string(), "2024-01-01 12:00:00");
/// assert!(parse_datetime("2024-01-01T12:00:00Z").is_err());
/// ```
pub fn parse_datetime(s: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    NaiveDateTime::parse_from_str(s, DATETIME_FORMAT)
}

/// Formats a date the way the search endpoints expect it.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use cardlink_rs::utils::format_date;
///
/// let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
/// assert_eq!(format_date(&date), "2024-03-09");
/// ```
pub fn format_date(date: &NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Serde adapter for `created_at` fields.
pub(crate) mod gateway_datetime {
    use super::*;

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse_datetime(&raw)
            .map_err(|e| de::Error::custom(format!("invalid timestamp `{}`: {}", raw, e)))
    }
}

/// Serde adapter for optional date-range parameters.
///
/// Pair with `skip_serializing_if = "Option::is_none"`, absent dates are never
/// sent as `null`.
pub(crate) mod gateway_date {
    use super::*;

    pub fn serialize<S: Serializer>(date: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error> {
        match date {
            Some(date) => serializer.serialize_str(&format_date(date)),
            None => serializer.serialize_none(),
        }
    }
}

/// Serializes a flag as the integer `0` or `1`.
pub(crate) fn bool_as_int<S: Serializer>(flag: &bool, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u8(u8::from(*flag))
}

/// Accepts an amount as a JSON number or a numeric string.
pub(crate) fn amount<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    struct AmountVisitor;

    impl<'de> Visitor<'de> for AmountVisitor {
        type Value = f64;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a number or a numeric string")
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<f64, E> {
            Ok(v)
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<f64, E> {
            Ok(v as f64)
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<f64, E> {
            Ok(v as f64)
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<f64, E> {
            v.trim()
                .parse()
                .map_err(|_| E::custom(format!("invalid amount `{}`", v)))
        }
    }

    deserializer.deserialize_any(AmountVisitor)
}

/// Accepts a flag as a JSON bool or the integers `0`/`1`.
pub(crate) fn flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    struct FlagVisitor;

    impl<'de> Visitor<'de> for FlagVisitor {
        type Value = bool;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a boolean or 0/1")
        }

        fn visit_bool<E: de::Error>(self, v: bool) -> Result<bool, E> {
            Ok(v)
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<bool, E> {
            match v {
                0 => Ok(false),
                1 => Ok(true),
                _ => Err(E::custom(format!("invalid flag `{}`", v))),
            }
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<bool, E> {
            match v {
                0 => Ok(false),
                1 => Ok(true),
                _ => Err(E::custom(format!("invalid flag `{}`", v))),
            }
        }
    }

    deserializer.deserialize_any(FlagVisitor)
}
