//! Game Servers

use serde::Serialize;

use crate::core::id::CfToolsId;
use crate::error::CfToolsError;

// =============================================================================
// GAME
// =============================================================================

/// Games the API manages.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Game {
    /// DayZ (upstream code 1).
    DayZ,
}

impl Game {
    /// Upstream numeric code.
    pub fn code(self) -> i64 {
        match self {
            Game::DayZ => 1,
        }
    }

    /// Map an upstream code. Unknown codes are an error, never a default.
    pub fn from_code(code: i64) -> Result<Self, CfToolsError> {
        match code {
            1 => Ok(Game::DayZ),
            other => Err(CfToolsError::UnsupportedGame(other)),
        }
    }
}

// =============================================================================
// PUBLIC SERVER DETAILS
// =============================================================================

/// Public details of a game server, as reported by the server query.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GameServerItem {
    /// Advertised server name.
    pub name: String,
    /// Game version string.
    pub version: String,
    /// Player counts.
    pub status: ServerStatus,
    /// Anti-cheat and password settings.
    pub security: Security,
    /// Community rating.
    pub rating: i64,
    /// Rank among all tracked servers.
    pub rank: i64,
    /// Whether the last query reached the server.
    pub online: bool,
    /// Map name, e.g. `chernarusplus`.
    pub map: String,
    /// Loaded workshop mods.
    pub mods: Vec<Mod>,
    /// Where the server is hosted.
    pub geolocation: Geolocation,
    /// Time and camera settings.
    pub environment: Environment,
    /// Server flags.
    pub attributes: Attributes,
    /// Network address.
    pub host: Host,
}

/// Occupancy of a server.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ServerStatus {
    /// Slot usage.
    pub players: PlayerSlots,
}

/// Slot usage. Missing counters read as zero.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PlayerSlots {
    /// Total player slots.
    pub slots: u64,
    /// Players connected.
    pub online: u64,
    /// Players waiting in the join queue.
    pub queue: u64,
}

/// Security settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Security {
    /// Valve Anti-Cheat enabled.
    pub vac: bool,
    /// BattlEye enabled.
    pub battleye: bool,
    /// Joining requires a password.
    pub password: bool,
}

/// A workshop mod loaded by the server.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Mod {
    /// Display name.
    pub name: String,
    /// Steam workshop file id.
    pub file_id: u64,
}

/// Server location.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Geolocation {
    /// IANA timezone, e.g. `Europe/Berlin`.
    pub timezone: String,
    /// Country.
    pub country: Country,
    /// Continent code, e.g. `EU`.
    pub continent: String,
    /// City, when known.
    pub city: City,
    /// Whether geolocation data exists at all.
    pub available: bool,
}

/// A country.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Country {
    /// ISO 3166 alpha-2 code.
    pub code: String,
    /// English name.
    pub name: String,
}

/// A city. Both parts are often unknown.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct City {
    /// City name.
    pub name: Option<String>,
    /// Region name.
    pub region: Option<String>,
}

/// In-game environment settings.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Environment {
    /// Allowed camera modes.
    pub perspectives: Perspectives,
    /// Day and night speed multipliers.
    pub time_acceleration: TimeAcceleration,
    /// In-game time of day, `HH:MM`.
    pub time: String,
}

/// Allowed camera modes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Perspectives {
    /// First person allowed.
    pub first_person_perspective: bool,
    /// Third person allowed.
    pub third_person_perspective: bool,
}

/// Time acceleration multipliers.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TimeAcceleration {
    /// Daytime multiplier.
    pub general: f64,
    /// Nighttime multiplier.
    pub night: f64,
}

/// Server flags.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Attributes {
    /// Requires any DLC.
    pub dlc: bool,
    /// Individual DLCs.
    pub dlcs: Dlcs,
    /// Official server.
    pub official: bool,
    /// Runs mods.
    pub modded: bool,
    /// `private` or `public`.
    pub hive: String,
    /// Runs the experimental branch.
    pub experimental: bool,
    /// Whitelist enforced.
    pub whitelist: bool,
}

/// Individual DLC requirements.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Dlcs {
    /// Livonia map DLC.
    pub livonia: bool,
}

/// Network address of a server.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Host {
    /// IP address.
    pub address: String,
    /// Port players connect to.
    pub game_port: u16,
    /// Steam query port.
    pub query_port: u16,
}

// =============================================================================
// MANAGED SERVER INFO
// =============================================================================

/// Information about a server managed through CFTools.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ServerInfo {
    /// Name given in the CFTools dashboard.
    pub nickname: String,
    /// Game the server runs.
    pub game: Game,
    /// RCon connection details.
    pub connection: Connection,
    /// Account owning the server resource.
    pub owner: CfToolsId,
}

/// How CFTools is connected to the server.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Connection {
    /// e.g. `UDP_RCON_BATTLEYE_DZ`.
    pub used_protocol: String,
    /// Version of the RCon peer.
    pub peer_version: String,
}
