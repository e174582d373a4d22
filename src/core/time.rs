//! Timestamps and Expirations
//!
//! The API is not consistent about timestamp formats: some fields carry an
//! offset, some are naive UTC with microseconds. Everything is normalized to
//! `DateTime<Utc>` here.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use serde::{Serialize, Serializer};

use crate::error::CfToolsError;

/// Naive layouts the API emits without an offset. Always UTC.
const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parse an upstream timestamp.
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, CfToolsError> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Ok(parsed.with_timezone(&Utc));
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|naive| naive.and_utc())
        .ok_or_else(|| CfToolsError::InvalidTimestamp(raw.to_string()))
}

/// Format a timestamp the way the API expects request bodies
/// (`2024-01-01T00:00:00.000Z`).
pub fn to_wire(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Expiration of a priority queue entry, whitelist entry or ban.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Expiration {
    /// Never expires.
    #[default]
    Permanent,
    /// Expires at the given instant.
    At(DateTime<Utc>),
}

impl Expiration {
    /// Concrete expiry instant, if any.
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        match self {
            Expiration::Permanent => None,
            Expiration::At(at) => Some(*at),
        }
    }

    /// Whether this is the `Permanent` sentinel.
    pub fn is_permanent(&self) -> bool {
        matches!(self, Expiration::Permanent)
    }
}

impl From<DateTime<Utc>> for Expiration {
    fn from(at: DateTime<Utc>) -> Self {
        Expiration::At(at)
    }
}

impl Serialize for Expiration {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Expiration::Permanent => serializer.serialize_str("Permanent"),
            Expiration::At(at) => serializer.serialize_str(&to_wire(at)),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
