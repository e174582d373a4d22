//! Response Mapping
//!
//! Pure functions from wire shapes to domain records. Defaults are applied
//! only through [`or_zero`] and [`expiration_from`].

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;
use tracing::warn;
use url::Url;

use crate::core::id::{CfToolsId, SteamId64};
use crate::core::normalize::{expiration_from, or_zero};
use crate::core::time::parse_timestamp;
use crate::error::CfToolsError;
use crate::model::ban::Ban;
use crate::model::entry::{PriorityQueueItem, WhitelistItem};
use crate::model::player::{
    DayZStatistics, HitZones, Kills, LeaderboardItem, Player, Shots, Statistics, WeaponStatistic,
};
use crate::model::server::{
    Attributes, City, Connection, Country, Dlcs, Environment, Game, GameServerItem, Geolocation,
    Host, Mod, Perspectives, PlayerSlots, Security, ServerInfo, ServerStatus, TimeAcceleration,
};
use crate::model::session::{
    GameSession, LiveInfo, Ping, Positions, SessionBans, SessionConnection, SteamProfile, Vector3,
};
use crate::network::protocol::{
    RawBan, RawDayZ, RawEntry, RawGameServer, RawHitZones, RawLeaderboardEntry, RawPersona,
    RawPlayer, RawQueryHeader, RawServerInfo, RawSession, RawWeapon,
};

/// Error code of a successful game server query.
pub const QUERY_OK: &str = "GameServerQueryError.NONE";

// =============================================================================
// PLAYER
// =============================================================================

/// Map a player record. A missing `dayz` block yields zeroed statistics.
pub fn map_player(raw: RawPlayer) -> Player {
    Player {
        names: raw.omega.name_history,
        statistics: Statistics {
            dayz: map_dayz(raw.dayz),
        },
        playtime: or_zero(raw.omega.playtime),
        sessions: or_zero(raw.omega.sessions),
    }
}

fn map_dayz(raw: Option<RawDayZ>) -> DayZStatistics {
    let Some(dayz) = raw else {
        return DayZStatistics::default();
    };
    let shots = dayz.shots.map_or_else(Shots::default, |s| Shots {
        fired: or_zero(s.fired),
        hit: or_zero(s.hit),
        hit_players: or_zero(s.hit_players),
        hit_infected: or_zero(s.hit_infected),
        hit_animals: or_zero(s.hit_animals),
        hit_vehicles: or_zero(s.hit_vehicles),
    });
    let kills = dayz.kills.map_or_else(Kills::default, |k| Kills {
        infected: or_zero(k.infected),
        animals: or_zero(k.animals),
    });
    DayZStatistics {
        distance_traveled: or_zero(dayz.distance_traveled),
        shots,
        kills,
        hit_zones: map_hit_zones(dayz.zones.as_ref()),
        weapons: dayz
            .weapons
            .unwrap_or_default()
            .into_iter()
            .map(|(class_name, weapon)| (class_name, map_weapon(weapon)))
            .collect::<BTreeMap<_, _>>(),
    }
}

/// Map hit zones, zeroing every absent zone.
pub fn map_hit_zones(raw: Option<&RawHitZones>) -> HitZones {
    let Some(zones) = raw else {
        return HitZones::default();
    };
    HitZones {
        brain: or_zero(zones.brain),
        head: or_zero(zones.head),
        left_arm: or_zero(zones.leftarm),
        left_foot: or_zero(zones.leftfoot),
        left_leg: or_zero(zones.leftleg),
        right_arm: or_zero(zones.rightarm),
        right_hand: or_zero(zones.righthand),
        right_leg: or_zero(zones.rightleg),
        torso: or_zero(zones.torso),
    }
}

fn map_weapon(raw: RawWeapon) -> WeaponStatistic {
    WeaponStatistic {
        damage: or_zero(raw.damage),
        hits: or_zero(raw.hits),
        deaths: or_zero(raw.deaths),
        kills: or_zero(raw.kills),
        longest_kill: or_zero(raw.longest_kill),
        longest_shot: or_zero(raw.longest_shot),
        hit_zones: map_hit_zones(raw.zones.as_ref()),
    }
}

// =============================================================================
// LEADERBOARD
// =============================================================================

/// Map a leaderboard row. Missing counters read as zero.
pub fn map_leaderboard_entry(raw: RawLeaderboardEntry) -> LeaderboardItem {
    LeaderboardItem {
        id: CfToolsId::of(raw.cftools_id),
        name: raw.latest_name,
        rank: or_zero(raw.rank),
        kills: or_zero(raw.kills),
        deaths: or_zero(raw.deaths),
        suicides: or_zero(raw.suicides),
        environment_deaths: or_zero(raw.environment_deaths),
        hits: or_zero(raw.hits),
        playtime: or_zero(raw.playtime),
        kill_death_ratio: or_zero(raw.kdratio),
        longest_kill: or_zero(raw.longest_kill),
        longest_shot: or_zero(raw.longest_shot),
    }
}

// =============================================================================
// QUEUE PRIORITY / WHITELIST
// =============================================================================

/// Map a priority queue entry. A null expiration is permanent.
pub fn map_priority_queue_entry(raw: RawEntry) -> Result<PriorityQueueItem, CfToolsError> {
    Ok(PriorityQueueItem {
        created_by: CfToolsId::of(raw.creator.cftools_id),
        comment: raw.meta.comment,
        expiration: expiration_from(raw.meta.expiration.as_deref())?,
        created: parse_timestamp(&raw.created_at)?,
    })
}

/// Map a whitelist entry. A null expiration is permanent.
pub fn map_whitelist_entry(raw: RawEntry) -> Result<WhitelistItem, CfToolsError> {
    Ok(WhitelistItem {
        created_by: CfToolsId::of(raw.creator.cftools_id),
        comment: raw.meta.comment,
        expiration: expiration_from(raw.meta.expiration.as_deref())?,
        created: parse_timestamp(&raw.created_at)?,
    })
}

// =============================================================================
// GAME SERVER
// =============================================================================

/// Map a game server query result.
///
/// The embedded query error is checked before anything else is decoded;
/// a failed query fails the whole mapping.
pub fn map_game_server(raw: Value) -> Result<GameServerItem, CfToolsError> {
    let header = RawQueryHeader::deserialize(&raw)?;
    if header.object.error != QUERY_OK {
        return Err(CfToolsError::GameServerQuery(header.object.error));
    }
    let raw = RawGameServer::deserialize(&raw)?;
    let status = raw.status.unwrap_or_default();
    Ok(GameServerItem {
        name: raw.name,
        version: raw.version,
        status: ServerStatus {
            players: PlayerSlots {
                slots: or_zero(status.slots),
                online: or_zero(status.players),
                queue: or_zero(status.queue.and_then(|q| q.size)),
            },
        },
        security: Security {
            vac: raw.security.vac,
            battleye: raw.security.battleye,
            password: raw.security.password,
        },
        rating: or_zero(raw.rating),
        rank: or_zero(raw.rank),
        online: raw.online,
        map: raw.map,
        mods: raw
            .mods
            .into_iter()
            .map(|m| Mod { name: m.name, file_id: or_zero(m.file_id) })
            .collect(),
        geolocation: Geolocation {
            timezone: raw.geolocation.timezone,
            country: Country {
                code: raw.geolocation.country.code,
                name: raw.geolocation.country.name,
            },
            continent: raw.geolocation.continent,
            city: City {
                name: raw.geolocation.city.name,
                region: raw.geolocation.city.region,
            },
            available: raw.geolocation.available,
        },
        environment: Environment {
            perspectives: Perspectives {
                first_person_perspective: raw.environment.perspectives.first_person,
                third_person_perspective: raw.environment.perspectives.third_person,
            },
            time_acceleration: TimeAcceleration {
                general: raw.environment.time_acceleration.general,
                night: raw.environment.time_acceleration.night,
            },
            time: raw.environment.time,
        },
        attributes: Attributes {
            dlc: raw.attributes.dlc,
            dlcs: Dlcs { livonia: raw.attributes.dlcs.livonia },
            official: raw.attributes.official,
            modded: raw.attributes.modded,
            hive: raw.attributes.hive,
            experimental: raw.attributes.experimental,
            whitelist: raw.attributes.whitelist,
        },
        host: Host {
            address: raw.host.address,
            game_port: or_zero(raw.host.game_port),
            query_port: or_zero(raw.host.query_port),
        },
    })
}

/// Map managed server info. Unknown game codes are an error.
pub fn map_server_info(raw: RawServerInfo) -> Result<ServerInfo, CfToolsError> {
    Ok(ServerInfo {
        nickname: raw.object.nickname,
        game: Game::from_code(raw.gameserver.game)?,
        connection: Connection {
            used_protocol: raw.connection.protocol_used,
            peer_version: raw.connection.peer_version,
        },
        owner: CfToolsId::of(raw.object.resource_owner),
    })
}

// =============================================================================
// GAME SESSIONS
// =============================================================================

/// Map a live session.
///
/// An unparsable avatar URL drops the avatar and logs a warning; it never
/// fails the mapping.
pub fn map_session(raw: RawSession) -> Result<GameSession, CfToolsError> {
    let created = raw.created_at.as_deref().map(parse_timestamp).transpose()?;
    let mut bans = SessionBans {
        count: or_zero(raw.info.ban_count),
        ..SessionBans::default()
    };
    let profile = match raw.persona {
        Some(RawPersona { profile: Some(profile), bans: persona_bans }) => {
            let persona_bans = persona_bans.unwrap_or_default();
            bans.game_banned = Some(ban_flag(&persona_bans.game));
            bans.community_banned = Some(ban_flag(&persona_bans.community));
            bans.economy_banned = Some(ban_flag(&persona_bans.economy));
            bans.vac_banned = Some(ban_flag(&persona_bans.vac));

            let avatar = profile
                .avatar
                .as_deref()
                .filter(|raw_url| !raw_url.trim().is_empty())
                .and_then(|raw_url| match Url::parse(raw_url) {
                    Ok(url) => Some(url),
                    Err(err) => {
                        warn!(
                            avatar = raw_url,
                            cftools_id = %raw.cftools_id,
                            steam_id = %raw.gamedata.steam64,
                            error = %err,
                            "could not parse avatar url of profile"
                        );
                        None
                    }
                });
            Some(SteamProfile {
                name: profile.name,
                private: profile.private,
                avatar,
            })
        }
        _ => None,
    };

    Ok(GameSession {
        id: raw.id,
        cftools_id: CfToolsId::of(raw.cftools_id),
        steam_id: SteamId64::of(raw.gamedata.steam64),
        player_name: raw.gamedata.player_name,
        created,
        bans,
        profile,
        connection: raw.connection.map(|c| SessionConnection {
            ipv4: c.ipv4,
            country_code: c.country_code,
            provider: c.provider,
            malicious: c.malicious.unwrap_or(false),
        }),
        live: LiveInfo {
            load_time: or_zero(raw.live.load_time),
            loaded: raw.live.loaded,
            ping: raw.live.ping.map(|p| Ping {
                actual: or_zero(p.actual),
                trend: or_zero(p.trend),
            }),
            position: Positions {
                join: raw.live.position.join.as_deref().and_then(Vector3::from_slice),
                latest: raw.live.position.latest.as_deref().and_then(Vector3::from_slice),
                leave: raw.live.position.leave.as_deref().and_then(Vector3::from_slice),
            },
        },
    })
}

/// Normalize a platform ban flag to a boolean.
///
/// Numbers count bans, strings name a ban state where `"none"` and `""`
/// mean not banned.
pub fn ban_flag(raw: &Value) -> bool {
    match raw {
        Value::Null => false,
        Value::Bool(banned) => *banned,
        Value::Number(n) => n.as_f64().is_some_and(|count| count != 0.0),
        Value::String(state) => {
            let state = state.trim();
            !state.is_empty() && !state.eq_ignore_ascii_case("none")
        }
        Value::Array(items) => !items.is_empty(),
        Value::Object(_) => true,
    }
}

// =============================================================================
// BANS
// =============================================================================

/// Map a ban list entry.
pub fn map_ban(raw: RawBan) -> Result<Ban, CfToolsError> {
    Ok(Ban {
        id: raw.id,
        reason: raw.reason,
        expiration: expiration_from(raw.expires_at.as_deref())?,
        created: parse_timestamp(&raw.created_at)?,
        status: raw.status,
    })
}

// =============================================================================
// TESTS
// =============================================================================
