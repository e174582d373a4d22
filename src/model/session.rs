//! Live Game Sessions

use chrono::{DateTime, Utc};
use serde::Serialize;
use url::Url;

use crate::core::id::{CfToolsId, SteamId64};

/// A player currently connected to a server.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GameSession {
    /// Session id.
    pub id: String,
    /// Canonical player id.
    pub cftools_id: CfToolsId,
    /// Target for GameLabs actions.
    pub steam_id: SteamId64,
    /// In-game name.
    pub player_name: String,
    /// When the session started.
    pub created: Option<DateTime<Utc>>,
    /// Ban summary.
    pub bans: SessionBans,
    /// Steam profile, absent when the upstream did not resolve it.
    pub profile: Option<SteamProfile>,
    /// Network origin, when reported.
    pub connection: Option<SessionConnection>,
    /// Live state.
    pub live: LiveInfo,
}

/// Ban summary of a session.
///
/// The platform flags are only known when the Steam profile was resolved.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SessionBans {
    /// Bans on CFTools ban lists.
    pub count: u64,
    /// Game ban on Steam.
    pub game_banned: Option<bool>,
    /// Steam community ban.
    pub community_banned: Option<bool>,
    /// Steam trade ban.
    pub economy_banned: Option<bool>,
    /// VAC ban.
    pub vac_banned: Option<bool>,
}

/// Public Steam profile of a player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SteamProfile {
    /// Steam display name.
    pub name: String,
    /// Profile is private.
    pub private: bool,
    /// Avatar image. Absent when missing or unparsable.
    pub avatar: Option<Url>,
}

/// Network origin of a session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SessionConnection {
    /// Client address.
    pub ipv4: Option<String>,
    /// ISO country code of the address.
    pub country_code: Option<String>,
    /// Internet provider.
    pub provider: Option<String>,
    /// Address is flagged as VPN or proxy.
    pub malicious: bool,
}

/// Live state of a session.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LiveInfo {
    /// Seconds it took the client to load.
    pub load_time: u64,
    /// Client finished loading.
    pub loaded: bool,
    /// Latency, once measured.
    pub ping: Option<Ping>,
    /// Known positions.
    pub position: Positions,
}

/// Latency of a session.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Ping {
    /// Current ping in milliseconds.
    pub actual: u64,
    /// Direction of change.
    pub trend: i64,
}

/// Positions of a player over the session.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Positions {
    /// Where the player spawned in.
    pub join: Option<Vector3>,
    /// Last reported position.
    pub latest: Option<Vector3>,
    /// Where the player logged out.
    pub leave: Option<Vector3>,
}

/// World coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct Vector3 {
    /// East-west.
    pub x: f64,
    /// Height.
    pub y: f64,
    /// North-south.
    pub z: f64,
}

impl Vector3 {
    /// Create from components.
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Build from an upstream `[x, y, z]` array. Fewer than three
    /// components means the position is unknown.
    pub fn from_slice(raw: &[f64]) -> Option<Self> {
        match raw {
            [x, y, z, ..] => Some(Self::new(*x, *y, *z)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vector_from_slice() {
        assert_eq!(Vector3::from_slice(&[1.0, 2.0, 3.0]), Some(Vector3::new(1.0, 2.0, 3.0)));
        assert_eq!(Vector3::from_slice(&[1.0, 2.0]), None);
        assert_eq!(Vector3::from_slice(&[]), None);
    }
}
