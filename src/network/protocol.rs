//! Wire Types
//!
//! Response shapes exactly as the API sends them. Nothing outside
//! [`crate::network::mapping`] should look at these.

use std::collections::HashMap;
use serde::{Deserialize, Serialize};

// =============================================================================
// REQUEST BODIES
// =============================================================================

/// Body of queue priority and whitelist POSTs.
#[derive(Debug, Clone, Serialize)]
pub struct PutEntryBody {
    pub cftools_id: String,
    pub comment: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<String>,
}

/// Identifier formats the ban list accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BanFormat {
    Ipv4,
    CftoolsId,
}

/// Body of ban list POSTs.
#[derive(Debug, Clone, Serialize)]
pub struct PutBanBody {
    pub identifier: String,
    pub format: BanFormat,
    pub reason: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<String>,
}

// =============================================================================
// USERS
// =============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct UserLookupResponse {
    pub cftools_id: String,
}

// =============================================================================
// PLAYER
// =============================================================================

/// Player response, keyed by CFTools id.
pub type PlayerResponse = HashMap<String, RawPlayer>;

#[derive(Debug, Clone, Deserialize)]
pub struct RawPlayer {
    pub omega: RawOmega,
    #[serde(default)]
    pub dayz: Option<RawDayZ>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawOmega {
    #[serde(default)]
    pub name_history: Vec<String>,
    #[serde(default)]
    pub playtime: Option<u64>,
    #[serde(default)]
    pub sessions: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawDayZ {
    #[serde(default)]
    pub distance_traveled: Option<f64>,
    #[serde(default)]
    pub shots: Option<RawShots>,
    #[serde(default)]
    pub kills: Option<RawKills>,
    #[serde(default)]
    pub zones: Option<RawHitZones>,
    #[serde(default)]
    pub weapons: Option<HashMap<String, RawWeapon>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawShots {
    pub fired: Option<u64>,
    pub hit: Option<u64>,
    pub hit_players: Option<u64>,
    pub hit_infected: Option<u64>,
    pub hit_animals: Option<u64>,
    pub hit_vehicles: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawKills {
    pub infected: Option<u64>,
    pub animals: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawHitZones {
    pub brain: Option<u64>,
    pub head: Option<u64>,
    pub leftarm: Option<u64>,
    pub leftfoot: Option<u64>,
    pub leftleg: Option<u64>,
    pub rightarm: Option<u64>,
    pub righthand: Option<u64>,
    pub rightleg: Option<u64>,
    pub torso: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawWeapon {
    pub damage: Option<f64>,
    pub deaths: Option<u64>,
    pub hits: Option<u64>,
    pub kills: Option<u64>,
    pub longest_kill: Option<f64>,
    pub longest_shot: Option<f64>,
    #[serde(default)]
    pub zones: Option<RawHitZones>,
}

// =============================================================================
// LEADERBOARD
// =============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct LeaderboardResponse {
    #[serde(default)]
    pub leaderboard: Vec<RawLeaderboardEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawLeaderboardEntry {
    pub cftools_id: String,
    #[serde(default)]
    pub latest_name: String,
    pub rank: Option<u64>,
    pub deaths: Option<u64>,
    pub environment_deaths: Option<u64>,
    pub hits: Option<u64>,
    pub kdratio: Option<f64>,
    pub kills: Option<u64>,
    pub longest_kill: Option<f64>,
    pub longest_shot: Option<f64>,
    pub playtime: Option<u64>,
    pub suicides: Option<u64>,
}

// =============================================================================
// QUEUE PRIORITY / WHITELIST
// =============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct EntryListResponse {
    #[serde(default)]
    pub entries: Vec<RawEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawEntry {
    pub created_at: String,
    pub creator: RawAccountRef,
    pub meta: RawEntryMeta,
    pub user: RawAccountRef,
    #[serde(default)]
    pub uuid: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawAccountRef {
    pub cftools_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawEntryMeta {
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub expiration: Option<String>,
}

// =============================================================================
// GAME SERVER
// =============================================================================

/// Game server response, keyed by resource hash.
///
/// Entries stay untyped until the embedded query error has been checked;
/// a failed query carries little more than `_object`.
pub type GameServerResponse = HashMap<String, serde_json::Value>;

/// The part of a game server entry present even when the query failed.
#[derive(Debug, Clone, Deserialize)]
pub struct RawQueryHeader {
    #[serde(rename = "_object")]
    pub object: RawQueryObject,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawGameServer {
    pub attributes: RawAttributes,
    pub environment: RawEnvironment,
    pub geolocation: RawGeolocation,
    pub host: RawHost,
    pub map: String,
    #[serde(default)]
    pub mods: Vec<RawMod>,
    pub name: String,
    pub online: bool,
    pub rank: Option<i64>,
    pub rating: Option<i64>,
    pub security: RawSecurity,
    pub status: Option<RawStatus>,
    pub version: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawQueryObject {
    pub error: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawAttributes {
    pub dlc: bool,
    pub dlcs: RawDlcs,
    pub experimental: bool,
    pub hive: String,
    pub modded: bool,
    pub official: bool,
    pub whitelist: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawDlcs {
    #[serde(default)]
    pub livonia: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawEnvironment {
    pub perspectives: RawPerspectives,
    pub time: String,
    pub time_acceleration: RawTimeAcceleration,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawPerspectives {
    // Upstream spells first person "1rd".
    #[serde(rename = "1rd")]
    pub first_person: bool,
    #[serde(rename = "3rd")]
    pub third_person: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawTimeAcceleration {
    pub general: f64,
    pub night: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawGeolocation {
    pub available: bool,
    pub city: RawCity,
    pub continent: String,
    pub country: RawCountry,
    pub timezone: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawCity {
    pub name: Option<String>,
    pub region: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawCountry {
    pub code: String,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawHost {
    pub address: String,
    pub game_port: Option<u16>,
    pub query_port: Option<u16>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawMod {
    pub file_id: Option<u64>,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawSecurity {
    pub battleye: bool,
    pub password: bool,
    pub vac: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawStatus {
    pub players: Option<u64>,
    pub queue: Option<RawQueue>,
    pub slots: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawQueue {
    pub size: Option<u64>,
}

// =============================================================================
// SERVER INFO
// =============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct ServerInfoResponse {
    pub server: RawServerInfo,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawServerInfo {
    #[serde(rename = "_object")]
    pub object: RawServerObject,
    pub connection: RawConnection,
    pub gameserver: RawGameserverRef,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawServerObject {
    pub nickname: String,
    pub resource_owner: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawConnection {
    pub peer_version: String,
    // Upstream typo, kept on the wire.
    #[serde(rename = "protcol_used")]
    pub protocol_used: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawGameserverRef {
    pub game: i64,
}

// =============================================================================
// GAME SESSIONS
// =============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct SessionListResponse {
    #[serde(default)]
    pub sessions: Vec<RawSession>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawSession {
    pub id: String,
    pub cftools_id: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub connection: Option<RawSessionConnection>,
    pub gamedata: RawGamedata,
    pub info: RawSessionInfo,
    pub live: RawLive,
    #[serde(default)]
    pub persona: Option<RawPersona>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawSessionConnection {
    #[serde(default)]
    pub country_code: Option<String>,
    #[serde(default)]
    pub ipv4: Option<String>,
    #[serde(default)]
    pub malicious: Option<bool>,
    #[serde(default)]
    pub provider: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawGamedata {
    pub player_name: String,
    pub steam64: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawSessionInfo {
    #[serde(default)]
    pub ban_count: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawLive {
    #[serde(default)]
    pub load_time: Option<u64>,
    #[serde(default)]
    pub loaded: bool,
    #[serde(default)]
    pub ping: Option<RawPing>,
    #[serde(default)]
    pub position: RawPositions,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawPing {
    pub actual: Option<u64>,
    pub trend: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPositions {
    #[serde(default)]
    pub join: Option<Vec<f64>>,
    #[serde(default)]
    pub latest: Option<Vec<f64>>,
    #[serde(default)]
    pub leave: Option<Vec<f64>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawPersona {
    #[serde(default)]
    pub bans: Option<RawPersonaBans>,
    #[serde(default)]
    pub profile: Option<RawProfile>,
}

/// Platform ban flags. Upstream types these inconsistently (numbers,
/// booleans and strings), so they are kept raw until mapping.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPersonaBans {
    #[serde(default)]
    pub community: serde_json::Value,
    #[serde(default)]
    pub economy: serde_json::Value,
    #[serde(default)]
    pub game: serde_json::Value,
    #[serde(default)]
    pub vac: serde_json::Value,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawProfile {
    #[serde(default)]
    pub avatar: Option<String>,
    pub name: String,
    #[serde(default)]
    pub private: bool,
}

// =============================================================================
// BANS
// =============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct BanListResponse {
    #[serde(default)]
    pub entries: Vec<RawBan>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawBan {
    pub id: String,
    pub created_at: String,
    #[serde(default)]
    pub expires_at: Option<String>,
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub status: String,
}
