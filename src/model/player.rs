//! Player Records

use std::collections::BTreeMap;
use serde::Serialize;

use crate::core::id::CfToolsId;

/// A player as seen by one server.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Player {
    /// Known names, oldest first.
    pub names: Vec<String>,
    /// Per-game statistics.
    pub statistics: Statistics,
    /// Total playtime in seconds.
    pub playtime: u64,
    /// Number of sessions.
    pub sessions: u64,
}

/// Statistics grouped by game.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Statistics {
    /// DayZ statistics. Always present; zeroed when the player has none.
    pub dayz: DayZStatistics,
}

/// DayZ statistics of a player.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct DayZStatistics {
    /// Distance traveled in meters.
    pub distance_traveled: f64,
    /// Shot counters.
    pub shots: Shots,
    /// Kill counters.
    pub kills: Kills,
    /// Aggregate hits by body zone.
    pub hit_zones: HitZones,
    /// Per-weapon statistics keyed by weapon class name.
    pub weapons: BTreeMap<String, WeaponStatistic>,
}

/// Shot counters.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Shots {
    /// Rounds fired.
    pub fired: u64,
    /// Rounds that hit anything.
    pub hit: u64,
    /// Hits on players.
    pub hit_players: u64,
    /// Hits on infected.
    pub hit_infected: u64,
    /// Hits on animals.
    pub hit_animals: u64,
    /// Hits on vehicles.
    pub hit_vehicles: u64,
}

/// Kill counters.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Kills {
    /// Infected killed.
    pub infected: u64,
    /// Animals killed.
    pub animals: u64,
}

/// Hit counts by body zone.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct HitZones {
    /// Brain.
    pub brain: u64,
    /// Head.
    pub head: u64,
    /// Left arm.
    pub left_arm: u64,
    /// Left foot.
    pub left_foot: u64,
    /// Left leg.
    pub left_leg: u64,
    /// Right arm.
    pub right_arm: u64,
    /// Right hand.
    pub right_hand: u64,
    /// Right leg.
    pub right_leg: u64,
    /// Torso.
    pub torso: u64,
}

/// Statistics of a single weapon class.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct WeaponStatistic {
    /// Total damage dealt.
    pub damage: f64,
    /// Hits landed.
    pub hits: u64,
    /// Deaths while holding the weapon.
    pub deaths: u64,
    /// Kills.
    pub kills: u64,
    /// Longest kill in meters.
    pub longest_kill: f64,
    /// Longest hit in meters.
    pub longest_shot: f64,
    /// Hits by body zone.
    pub hit_zones: HitZones,
}

/// Statistic a leaderboard is ranked by.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Statistic {
    /// Player kills.
    Kills,
    /// Deaths.
    Deaths,
    /// Suicides.
    Suicides,
    /// Time played.
    Playtime,
    /// Longest kill distance.
    LongestKill,
    /// Longest hit distance.
    LongestShot,
    /// Kills per death.
    #[serde(rename = "kdratio")]
    KillDeathRatio,
}

impl Statistic {
    /// Value of the `stat` query parameter.
    pub fn as_wire(&self) -> &'static str {
        match self {
            Statistic::Kills => "kills",
            Statistic::Deaths => "deaths",
            Statistic::Suicides => "suicides",
            Statistic::Playtime => "playtime",
            Statistic::LongestKill => "longest_kill",
            Statistic::LongestShot => "longest_shot",
            Statistic::KillDeathRatio => "kdratio",
        }
    }

    /// Parse a wire name.
    pub fn from_wire(raw: &str) -> Option<Self> {
        match raw {
            "kills" => Some(Statistic::Kills),
            "deaths" => Some(Statistic::Deaths),
            "suicides" => Some(Statistic::Suicides),
            "playtime" => Some(Statistic::Playtime),
            "longest_kill" => Some(Statistic::LongestKill),
            "longest_shot" => Some(Statistic::LongestShot),
            "kdratio" => Some(Statistic::KillDeathRatio),
            _ => None,
        }
    }
}

/// Leaderboard sort direction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub enum SortOrder {
    /// Lowest first.
    Ascending,
    /// Highest first.
    #[default]
    Descending,
}

/// One row of a leaderboard.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LeaderboardItem {
    /// Player id.
    pub id: CfToolsId,
    /// Latest known name.
    pub name: String,
    /// Position on the board.
    pub rank: u64,
    /// Kills.
    pub kills: u64,
    /// Deaths.
    pub deaths: u64,
    /// Suicides.
    pub suicides: u64,
    /// Deaths not caused by players.
    pub environment_deaths: u64,
    /// Hits landed.
    pub hits: u64,
    /// Playtime in seconds.
    pub playtime: u64,
    /// Kills per death.
    pub kill_death_ratio: f64,
    /// Longest kill in meters.
    pub longest_kill: f64,
    /// Longest hit in meters.
    pub longest_shot: f64,
}
