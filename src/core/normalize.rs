//! Field Normalization
//!
//! The two fallback rules every mapper shares. Mappers call these instead
//! of spelling out `unwrap_or` so the policy cannot drift per operation.

use crate::core::time::{parse_timestamp, Expiration};
use crate::error::CfToolsError;

/// Absent or null counters read as zero.
#[inline]
pub fn or_zero<T: Default>(value: Option<T>) -> T {
    value.unwrap_or_default()
}

/// Absent or null expirations read as [`Expiration::Permanent`].
///
/// An empty string is treated the same as null.
pub fn expiration_from(raw: Option<&str>) -> Result<Expiration, CfToolsError> {
    match raw {
        None => Ok(Expiration::Permanent),
        Some(value) if value.is_empty() => Ok(Expiration::Permanent),
        Some(value) => parse_timestamp(value).map(Expiration::At),
    }
}

// =============================================================================
// TESTS
// =============================================================================
