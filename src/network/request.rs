//! Operation Requests
//!
//! One request type per client operation. Requests that target a single
//! player can be built straight from a [`GenericId`]; the server scope then
//! falls back to the client default.

use crate::core::id::{BanlistId, GenericId, ServerApiId, SteamId64};
use crate::core::time::Expiration;
use crate::model::action::GameLabsActionRequest;
use crate::model::ban::Ban;
use crate::model::player::{SortOrder, Statistic};
use crate::model::server::Game;
use crate::model::session::{GameSession, Vector3};

/// Requests that carry a player identifier.
pub trait PlayerReference {
    /// The identifier to resolve.
    fn player_id(&self) -> &GenericId;
}

impl PlayerReference for GenericId {
    fn player_id(&self) -> &GenericId {
        self
    }
}

/// Requests that may override the client's default server.
pub trait ServerScoped {
    /// Explicit server scope, if any.
    fn server_api_id(&self) -> Option<&ServerApiId>;
}

/// Declares a `{player_id, server_api_id}` request.
macro_rules! scoped_player_request {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq)]
        pub struct $name {
            /// Player to look up.
            pub player_id: GenericId,
            /// Overrides the client default server.
            pub server_api_id: Option<ServerApiId>,
        }

        impl $name {
            /// Request for a player on the default server.
            pub fn new(player_id: impl Into<GenericId>) -> Self {
                Self { player_id: player_id.into(), server_api_id: None }
            }

            /// Target a specific server.
            pub fn on_server(mut self, server_api_id: ServerApiId) -> Self {
                self.server_api_id = Some(server_api_id);
                self
            }
        }

        impl From<GenericId> for $name {
            fn from(player_id: GenericId) -> Self {
                Self::new(player_id)
            }
        }

        impl PlayerReference for $name {
            fn player_id(&self) -> &GenericId {
                &self.player_id
            }
        }

        impl ServerScoped for $name {
            fn server_api_id(&self) -> Option<&ServerApiId> {
                self.server_api_id.as_ref()
            }
        }
    };
}

/// Implements [`ServerScoped`] for a request with a `server_api_id` field.
macro_rules! server_scoped {
    ($($name:ident),* $(,)?) => {
        $(
            impl ServerScoped for $name {
                fn server_api_id(&self) -> Option<&ServerApiId> {
                    self.server_api_id.as_ref()
                }
            }
        )*
    };
}

// =============================================================================
// PLAYER
// =============================================================================

scoped_player_request!(
    /// Fetch a player's record and statistics.
    GetPlayerDetailsRequest
);

/// Fetch a leaderboard.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GetLeaderboardRequest {
    /// Column to rank by.
    pub statistic: Statistic,
    /// Sort direction.
    pub order: SortOrder,
    /// Number of rows, only sent when within `1..=100`.
    pub limit: Option<u32>,
    /// Overrides the client default server.
    pub server_api_id: Option<ServerApiId>,
}

impl GetLeaderboardRequest {
    /// Descending leaderboard with the upstream default limit.
    pub fn new(statistic: Statistic) -> Self {
        Self {
            statistic,
            order: SortOrder::Descending,
            limit: None,
            server_api_id: None,
        }
    }
}

// =============================================================================
// QUEUE PRIORITY / WHITELIST
// =============================================================================

scoped_player_request!(
    /// Fetch a player's priority queue entry.
    GetPriorityQueueRequest
);

scoped_player_request!(
    /// Remove a player's priority queue entry.
    DeletePriorityQueueRequest
);

scoped_player_request!(
    /// Fetch a player's whitelist entry.
    GetWhitelistRequest
);

scoped_player_request!(
    /// Remove a player's whitelist entry.
    DeleteWhitelistRequest
);

/// Create or replace a priority queue entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PutPriorityQueueItemRequest {
    /// Player to add.
    pub id: GenericId,
    /// Free-form note.
    pub comment: String,
    /// `Permanent` sends no `expires_at`.
    pub expires: Expiration,
    /// Overrides the client default server.
    pub server_api_id: Option<ServerApiId>,
}

/// Create or replace a whitelist entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PutWhitelistItemRequest {
    /// Player to add.
    pub id: GenericId,
    /// Free-form note.
    pub comment: String,
    /// `Permanent` sends no `expires_at`.
    pub expires: Expiration,
    /// Overrides the client default server.
    pub server_api_id: Option<ServerApiId>,
}

impl PlayerReference for PutPriorityQueueItemRequest {
    fn player_id(&self) -> &GenericId {
        &self.id
    }
}

impl PlayerReference for PutWhitelistItemRequest {
    fn player_id(&self) -> &GenericId {
        &self.id
    }
}

// =============================================================================
// SERVERS
// =============================================================================

/// Look up a public game server by address.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GetGameServerDetailsRequest {
    /// Game the server runs.
    pub game: Game,
    /// Server IP address.
    pub ip: String,
    /// Game port.
    pub port: u16,
}

/// Fetch information about a managed server.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GetServerInfoRequest {
    /// Overrides the client default server.
    pub server_api_id: Option<ServerApiId>,
}

/// List the live sessions of a managed server.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListGameSessionsRequest {
    /// Overrides the client default server.
    pub server_api_id: Option<ServerApiId>,
}

// =============================================================================
// GAMELABS ACTIONS
// =============================================================================

/// Spawn an item in a player's inventory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpawnItemRequest {
    /// Target player.
    pub steam_id: SteamId64,
    /// Item class name, e.g. `Apple`.
    pub item_class: String,
    /// Defaults to 1.
    pub quantity: Option<u32>,
    /// Defaults to false.
    pub debug: Option<bool>,
    /// Defaults to false.
    pub stacked: Option<bool>,
    /// Overrides the client default server.
    pub server_api_id: Option<ServerApiId>,
}

impl SpawnItemRequest {
    /// Spawn one `item_class` for the session's player.
    pub fn new(session: &GameSession, item_class: impl Into<String>) -> Self {
        Self {
            steam_id: session.steam_id.clone(),
            item_class: item_class.into(),
            quantity: None,
            debug: None,
            stacked: None,
            server_api_id: None,
        }
    }
}

/// Fully heal a player.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HealPlayerRequest {
    /// Target player.
    pub steam_id: SteamId64,
    /// Overrides the client default server.
    pub server_api_id: Option<ServerApiId>,
}

/// Kill a player.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KillPlayerRequest {
    /// Target player.
    pub steam_id: SteamId64,
    /// Overrides the client default server.
    pub server_api_id: Option<ServerApiId>,
}

impl HealPlayerRequest {
    /// Target the session's player.
    pub fn new(session: &GameSession) -> Self {
        Self { steam_id: session.steam_id.clone(), server_api_id: None }
    }
}

impl KillPlayerRequest {
    /// Target the session's player.
    pub fn new(session: &GameSession) -> Self {
        Self { steam_id: session.steam_id.clone(), server_api_id: None }
    }
}

/// Teleport a player to world coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct TeleportPlayerRequest {
    /// Target player.
    pub steam_id: SteamId64,
    /// Destination.
    pub coordinates: Vector3,
    /// Overrides the client default server.
    pub server_api_id: Option<ServerApiId>,
}

impl TeleportPlayerRequest {
    /// Teleport the session's player.
    pub fn new(session: &GameSession, coordinates: Vector3) -> Self {
        Self {
            steam_id: session.steam_id.clone(),
            coordinates,
            server_api_id: None,
        }
    }
}

// =============================================================================
// BANS
// =============================================================================

/// List bans matching a player or IP on a ban list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListBansRequest {
    /// Ban list to search.
    pub list: BanlistId,
    /// IP addresses are used as the filter directly.
    pub player_id: GenericId,
}

impl PlayerReference for ListBansRequest {
    fn player_id(&self) -> &GenericId {
        &self.player_id
    }
}

/// Ban a player or IP.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PutBanRequest {
    /// Ban list to add to.
    pub list: BanlistId,
    /// IPv4 addresses are banned as-is; everything else by CFTools id.
    pub player_id: GenericId,
    /// Reason shown to the player.
    pub reason: String,
    /// `Permanent` sends no `expires_at`.
    pub expiration: Expiration,
}

/// Delete a single ban.
///
/// Names either the ban itself or a player whose only ban should go.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeleteBanRequest {
    /// Ban list to delete from.
    pub list: BanlistId,
    /// Ban to delete. Takes precedence over `player_id`.
    pub ban_id: Option<String>,
    /// Player whose single ban should be deleted.
    pub player_id: Option<GenericId>,
}

impl DeleteBanRequest {
    /// Delete exactly this ban.
    pub fn for_ban(list: BanlistId, ban: &Ban) -> Self {
        Self { list, ban_id: Some(ban.id.clone()), player_id: None }
    }

    /// Delete the single ban of this player.
    pub fn for_player(list: BanlistId, player_id: impl Into<GenericId>) -> Self {
        Self { list, ban_id: None, player_id: Some(player_id.into()) }
    }
}

/// Delete every ban of a player or IP.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeleteBansRequest {
    /// Ban list to delete from.
    pub list: BanlistId,
    /// Player or IP whose bans should be deleted.
    pub player_id: GenericId,
}

server_scoped!(
    GetLeaderboardRequest,
    PutPriorityQueueItemRequest,
    PutWhitelistItemRequest,
    GetServerInfoRequest,
    ListGameSessionsRequest,
);

impl ServerScoped for GameLabsActionRequest {
    fn server_api_id(&self) -> Option<&ServerApiId> {
        self.server_api_id.as_ref()
    }
}
