//! Domain Model
//!
//! Fully typed records handed to callers. Every record is produced fresh
//! per call by the mappers in [`crate::network::mapping`].

pub mod action;
pub mod ban;
pub mod entry;
pub mod player;
pub mod server;
pub mod session;

pub use action::{ActionParameter, GameLabsActionRequest};
pub use ban::Ban;
pub use entry::{PriorityQueueItem, WhitelistItem};
pub use player::{
    DayZStatistics, HitZones, Kills, LeaderboardItem, Player, Shots, SortOrder, Statistic,
    Statistics, WeaponStatistic,
};
pub use server::{Game, GameServerItem, ServerInfo};
pub use session::{GameSession, SessionBans, SteamProfile, Vector3};
