//! Timestamp keys and lookup queries
//!
//! Stored measurements are keyed by a canonical UTC instant string
//! (`2015-09-01T16:00:00.000Z`). Because every key has the same fixed-width
//! shape, lexicographic order over keys equals chronological order, and a
//! coarser key such as `2015-09-01` selects records by string prefix.

use crate::constants::{
    CANONICAL_TIMESTAMP_FORMAT, CANONICAL_TIMESTAMP_LEN, CANONICAL_TIMESTAMP_SHAPE,
};
use crate::{Error, Result};
use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

/// Canonical instant used as the primary key of a stored measurement
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimestampKey(String);

impl TimestampKey {
    /// Build a key from a UTC instant, truncating to millisecond precision
    ///
    /// Years outside `0..=9999` cannot be rendered in the fixed-width
    /// canonical form and are rejected.
    pub fn from_datetime(datetime: DateTime<Utc>) -> Result<Self> {
        let year = datetime.year();
        if !(0..=9999).contains(&year) {
            return Err(Error::invalid_timestamp(
                datetime.to_rfc3339(),
                format!("year {} is outside the supported range 0000-9999", year),
            ));
        }

        Ok(Self(datetime.format(CANONICAL_TIMESTAMP_FORMAT).to_string()))
    }

    /// Parse an RFC 3339 instant with any offset and sub-second precision
    ///
    /// # Examples
    /// ```
    /// # use weather_tracker::TimestampKey;
    /// let key = TimestampKey::parse("2015-09-01T18:00:00+02:00").unwrap();
    /// assert_eq!(key.as_str(), "2015-09-01T16:00:00.000Z");
    /// ```
    pub fn parse(value: &str) -> Result<Self> {
        let trimmed = value.trim();
        let datetime = DateTime::parse_from_rfc3339(trimmed)
            .map_err(|e| Error::invalid_timestamp(trimmed, e.to_string()))?;

        Self::from_datetime(datetime.with_timezone(&Utc))
    }

    /// Canonical string form of this key
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this key begins with a (coarser) timestamp prefix
    pub fn starts_with(&self, prefix: &str) -> bool {
        self.0.starts_with(prefix)
    }
}

impl std::fmt::Display for TimestampKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for TimestampKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for TimestampKey {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<TimestampKey> for String {
    fn from(key: TimestampKey) -> Self {
        key.0
    }
}

impl AsRef<str> for TimestampKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// Ord on the key is the derived string order, so borrowing as `str` is consistent.
impl std::borrow::Borrow<str> for TimestampKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// A lookup key resolved once into its matching mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimestampQuery {
    /// Full instant: matches at most one stored record
    Exact(TimestampKey),
    /// Strict left-substring of the canonical form, e.g. a bare date
    Prefix(String),
}

impl TimestampQuery {
    /// Resolve a raw lookup key
    ///
    /// A value that parses as a full instant becomes [`TimestampQuery::Exact`].
    /// Otherwise it must be a non-empty strict prefix of the canonical shape
    /// (`2015`, `2015-09`, `2015-09-01`, `2015-09-01T16`, ...).
    pub fn parse(value: &str) -> Result<Self> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(Error::invalid_timestamp(value, "lookup key is empty"));
        }

        if let Ok(key) = TimestampKey::parse(trimmed) {
            return Ok(TimestampQuery::Exact(key));
        }

        if trimmed.len() < CANONICAL_TIMESTAMP_LEN && matches_canonical_shape(trimmed) {
            Ok(TimestampQuery::Prefix(trimmed.to_string()))
        } else {
            Err(Error::invalid_timestamp(
                trimmed,
                "expected a full instant or a prefix such as 2015-09-01",
            ))
        }
    }

    /// Whether a stored key is selected by this query
    pub fn matches(&self, key: &TimestampKey) -> bool {
        match self {
            TimestampQuery::Exact(exact) => exact == key,
            TimestampQuery::Prefix(prefix) => key.starts_with(prefix),
        }
    }
}

impl std::fmt::Display for TimestampQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimestampQuery::Exact(key) => write!(f, "exact {}", key),
            TimestampQuery::Prefix(prefix) => write!(f, "prefix {}", prefix),
        }
    }
}

fn matches_canonical_shape(prefix: &str) -> bool {
    prefix.len() <= CANONICAL_TIMESTAMP_SHAPE.len()
        && prefix
            .bytes()
            .zip(CANONICAL_TIMESTAMP_SHAPE.bytes())
            .all(|(byte, shape)| {
                if shape == b'9' {
                    byte.is_ascii_digit()
                } else {
                    byte == shape
                }
            })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_normalises_to_canonical_form() {
        let key = TimestampKey::parse("2015-09-01T16:00:00Z").unwrap();
        assert_eq!(key.as_str(), "2015-09-01T16:00:00.000Z");

        let key = TimestampKey::parse("2015-09-01T16:00:00.123456Z").unwrap();
        assert_eq!(key.as_str(), "2015-09-01T16:00:00.123Z");

        let key = TimestampKey::parse("2015-09-01T00:30:00.000-01:00").unwrap();
        assert_eq!(key.as_str(), "2015-09-01T01:30:00.000Z");
    }

    #[test]
    fn test_parse_rejects_malformed_instants() {
        assert!(TimestampKey::parse("2015-09-01").is_err());
        assert!(TimestampKey::parse("not a timestamp").is_err());
        assert!(TimestampKey::parse("2015-13-01T16:00:00.000Z").is_err());
    }

    #[test]
    fn test_key_order_is_chronological() {
        let earlier = TimestampKey::parse("2015-09-01T16:00:00.000Z").unwrap();
        let later = TimestampKey::parse("2015-09-01T16:01:00.000Z").unwrap();
        let next_day = TimestampKey::parse("2015-09-02T00:00:00.000Z").unwrap();

        assert!(earlier < later);
        assert!(later < next_day);
    }

    #[test]
    fn test_query_resolves_exact_instants() {
        let query = TimestampQuery::parse("2015-09-01T16:20:00.000Z").unwrap();
        assert_eq!(
            query,
            TimestampQuery::Exact(TimestampKey::parse("2015-09-01T16:20:00.000Z").unwrap())
        );
    }

    #[test]
    fn test_query_resolves_prefixes() {
        for prefix in ["2015", "2015-09", "2015-09-01", "2015-09-01T16", "2015-09-01T16:20"] {
            assert_eq!(
                TimestampQuery::parse(prefix).unwrap(),
                TimestampQuery::Prefix(prefix.to_string())
            );
        }
    }

    #[test]
    fn test_query_rejects_non_canonical_keys() {
        assert!(TimestampQuery::parse("").is_err());
        assert!(TimestampQuery::parse("   ").is_err());
        assert!(TimestampQuery::parse("09/01/2015").is_err());
        assert!(TimestampQuery::parse("2015-9-1").is_err());
        assert!(TimestampQuery::parse("2015-13-01T16:00:00.000Z").is_err());
    }

    #[test]
    fn test_query_matching() {
        let key = TimestampKey::parse("2015-09-01T16:00:00.000Z").unwrap();

        assert!(TimestampQuery::Exact(key.clone()).matches(&key));
        assert!(TimestampQuery::Prefix("2015-09-01".to_string()).matches(&key));
        assert!(!TimestampQuery::Prefix("2015-09-02".to_string()).matches(&key));
    }

    #[test]
    fn test_serde_uses_canonical_string() {
        let key = TimestampKey::parse("2015-09-01T16:00:00Z").unwrap();
        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(json, "\"2015-09-01T16:00:00.000Z\"");

        let back: TimestampKey = serde_json::from_str(&json).unwrap();
        assert_eq!(back, key);
        assert!(serde_json::from_str::<TimestampKey>("\"yesterday\"").is_err());
    }
}
