//! Identifier Types
//!
//! Every identifier the API understands, plus the closed [`GenericId`]
//! union callers use when they do not know (or care) which kind they hold.

use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use serde::{Serialize, Deserialize};

// =============================================================================
// CANONICAL IDENTITY
// =============================================================================

/// CFTools account identifier.
///
/// The canonical identity every other identifier resolves to.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CfToolsId(String);

impl CfToolsId {
    /// Wrap a raw CFTools id.
    pub fn of(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Raw string value as sent on the wire.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CfToolsId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// PLATFORM IDENTITY
// =============================================================================

/// Steam64 account identifier.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SteamId64(String);

impl SteamId64 {
    /// Wrap a raw Steam64 id.
    pub fn of(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Raw string value as sent on the wire.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the value looks like a Steam64 id (17 ascii digits).
    pub fn is_valid_format(raw: &str) -> bool {
        raw.len() == 17 && raw.bytes().all(|b| b.is_ascii_digit())
    }
}

impl fmt::Display for SteamId64 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// IP ADDRESS
// =============================================================================

/// A player IP address, tagged by family.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "address", rename_all = "lowercase")]
pub enum IpAddress {
    /// IPv4 address.
    V4(Ipv4Addr),
    /// IPv6 address.
    V6(Ipv6Addr),
}

impl IpAddress {
    /// Textual form as sent on the wire.
    pub fn to_wire(&self) -> String {
        match self {
            IpAddress::V4(addr) => addr.to_string(),
            IpAddress::V6(addr) => addr.to_string(),
        }
    }
}

impl From<IpAddr> for IpAddress {
    fn from(addr: IpAddr) -> Self {
        match addr {
            IpAddr::V4(v4) => IpAddress::V4(v4),
            IpAddr::V6(v6) => IpAddress::V6(v6),
        }
    }
}

impl fmt::Display for IpAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_wire())
    }
}

// =============================================================================
// GENERIC IDENTIFIER
// =============================================================================

/// Any identifier a player can be addressed by.
///
/// Only [`GenericId::Ip`] may skip resolution, and only on ban-list paths.
/// Everything else resolves to a [`CfToolsId`] before use.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum GenericId {
    /// Already canonical.
    CfTools(CfToolsId),
    /// Steam64 platform id.
    Steam(SteamId64),
    /// Raw IP address.
    Ip(IpAddress),
}

impl GenericId {
    /// Classify a raw identifier string.
    ///
    /// IP literals become [`GenericId::Ip`], 17-digit numbers become
    /// [`GenericId::Steam`], anything else is taken as a CFTools id.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if let Ok(addr) = raw.parse::<IpAddr>() {
            return GenericId::Ip(addr.into());
        }
        if SteamId64::is_valid_format(raw) {
            return GenericId::Steam(SteamId64::of(raw));
        }
        GenericId::CfTools(CfToolsId::of(raw))
    }

    /// Native string value used as the lookup or filter key.
    pub fn native_value(&self) -> String {
        match self {
            GenericId::CfTools(id) => id.as_str().to_string(),
            GenericId::Steam(id) => id.as_str().to_string(),
            GenericId::Ip(addr) => addr.to_wire(),
        }
    }
}

impl From<CfToolsId> for GenericId {
    fn from(id: CfToolsId) -> Self {
        GenericId::CfTools(id)
    }
}

impl From<SteamId64> for GenericId {
    fn from(id: SteamId64) -> Self {
        GenericId::Steam(id)
    }
}

impl From<IpAddress> for GenericId {
    fn from(addr: IpAddress) -> Self {
        GenericId::Ip(addr)
    }
}

impl fmt::Display for GenericId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.native_value())
    }
}

// =============================================================================
// RESOURCE SCOPES
// =============================================================================

/// Server API id selecting which managed server an operation targets.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServerApiId(String);

impl ServerApiId {
    /// Wrap a raw server API id.
    pub fn of(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Raw string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ServerApiId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Ban list identifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BanlistId(String);

impl BanlistId {
    /// Wrap a raw ban list id.
    pub fn of(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Raw string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BanlistId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// TESTS
// =============================================================================
