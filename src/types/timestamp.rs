//! JSON timestamp wrapper.

use crate::stringify::{Stringify, PACKAGE_NAME};
use chrono::{DateTime, Datelike, SecondsFormat, TimeZone, Utc};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Seconds between the Unix epoch and `0001-01-01T00:00:00Z`.
const ZERO_UNIX_SECONDS: i64 = -62_135_596_800;

/// A point in time as sent by the GitHub API.
///
/// Accepts RFC 3339 strings as well as Unix timestamps (seconds, or
/// milliseconds when the value would land past year 3000).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(pub DateTime<Utc>);

impl Timestamp {
    /// Wraps a UTC date-time.
    pub fn new(time: DateTime<Utc>) -> Self {
        Self(time)
    }

    /// Builds a timestamp from Unix seconds.
    pub fn from_unix(seconds: i64) -> Option<Self> {
        Utc.timestamp_opt(seconds, 0).single().map(Self)
    }

    /// Returns the wrapped date-time.
    pub fn time(&self) -> DateTime<Utc> {
        self.0
    }

    /// Returns true for the zero instant `0001-01-01 00:00:00 UTC`.
    pub fn is_zero(&self) -> bool {
        self.0.timestamp() == ZERO_UNIX_SECONDS && self.0.timestamp_subsec_nanos() == 0
    }

    fn from_number(value: i64) -> Option<Self> {
        let seconds = Utc.timestamp_opt(value, 0).single();
        match seconds {
            Some(time) if time.year() <= 3000 => Some(Self(time)),
            _ => Utc.timestamp_millis_opt(value).single().map(Self),
        }
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self(DateTime::from_timestamp(ZERO_UNIX_SECONDS, 0).unwrap_or_default())
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(time: DateTime<Utc>) -> Self {
        Self(time)
    }
}

/// Renders as `2006-01-02 15:04:05 +0000 UTC`, with fractional seconds when
/// present and trailing zeros trimmed.
impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d %H:%M:%S"))?;
        let nanos = self.0.timestamp_subsec_nanos();
        if nanos > 0 {
            let fraction = format!("{:09}", nanos);
            write!(f, ".{}", fraction.trim_end_matches('0'))?;
        }
        f.write_str(" +0000 UTC")
    }
}

impl Stringify for Timestamp {
    fn write_to(&self, out: &mut String) {
        out.push_str(PACKAGE_NAME);
        out.push_str(".Timestamp{");
        out.push_str(&self.to_string());
        out.push('}');
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.to_rfc3339_opts(SecondsFormat::AutoSi, true))
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(TimestampVisitor)
    }
}

struct TimestampVisitor;

impl<'de> Visitor<'de> for TimestampVisitor {
    type Value = Timestamp;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an RFC 3339 string or a Unix timestamp")
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Timestamp, E> {
        Timestamp::from_number(value)
            .ok_or_else(|| E::custom(format!("timestamp out of range: {}", value)))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Timestamp, E> {
        let value = i64::try_from(value)
            .map_err(|_| E::custom(format!("timestamp out of range: {}", value)))?;
        self.visit_i64(value)
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Timestamp, E> {
        DateTime::parse_from_rfc3339(value)
            .map(|time| Timestamp(time.with_timezone(&Utc)))
            .map_err(|e| E::custom(format!("invalid timestamp {:?}: {}", value, e)))
    }
}
