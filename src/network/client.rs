//! CFTools Cloud Client
//!
//! The facade callers use. Each operation checks its preconditions, resolves
//! the target server and player, issues one upstream call and maps the
//! response. The client holds only immutable configuration and is cheap to
//! clone.

use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::config::ClientConfig;
use crate::core::hash::game_server_resource;
use crate::core::id::{BanlistId, CfToolsId, GenericId, IpAddress, ServerApiId};
use crate::core::time::to_wire;
use crate::error::CfToolsError;
use crate::model::action::{codes, ActionParameter, GameLabsActionRequest};
use crate::model::ban::Ban;
use crate::model::entry::{PriorityQueueItem, WhitelistItem};
use crate::model::player::{LeaderboardItem, Player, SortOrder};
use crate::model::server::{GameServerItem, ServerInfo};
use crate::model::session::GameSession;
use crate::network::auth::AuthorizationProvider;
use crate::network::mapping::{
    map_ban, map_game_server, map_leaderboard_entry, map_player, map_priority_queue_entry,
    map_server_info, map_session, map_whitelist_entry,
};
use crate::network::protocol::{
    BanFormat, BanListResponse, EntryListResponse, GameServerResponse, LeaderboardResponse,
    PlayerResponse, PutBanBody, PutEntryBody, ServerInfoResponse, SessionListResponse,
};
use crate::network::request::{
    DeleteBanRequest, DeleteBansRequest, DeletePriorityQueueRequest, DeleteWhitelistRequest,
    GetGameServerDetailsRequest, GetLeaderboardRequest, GetPlayerDetailsRequest,
    GetPriorityQueueRequest, GetServerInfoRequest, GetWhitelistRequest, HealPlayerRequest,
    KillPlayerRequest, ListBansRequest, ListGameSessionsRequest, PutBanRequest,
    PutPriorityQueueItemRequest, PutWhitelistItemRequest, ServerScoped, SpawnItemRequest,
    TeleportPlayerRequest,
};
use crate::network::resolver::{resolve_scope, IdentityResolver};
use crate::network::transport::{ApiRequest, HttpTransport, ReqwestTransport, DEFAULT_BASE_URL};

/// API version prefix of every path.
pub const API_VERSION: &str = "v1";

/// Upper bound of the leaderboard `limit` parameter.
pub const MAX_LEADERBOARD_LIMIT: u32 = 100;

/// Default request timeout of the bundled transport.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

fn server_path(scope: &ServerApiId, action: &str) -> String {
    format!("{}/server/{}/{}", API_VERSION, scope, action)
}

fn banlist_path(list: &BanlistId) -> String {
    format!("{}/banlist/{}/bans", API_VERSION, list)
}

fn gameserver_path(resource: &str) -> String {
    format!("{}/gameserver/{}", API_VERSION, resource)
}

/// Value of the leaderboard `order` parameter.
pub fn leaderboard_order(order: SortOrder) -> &'static str {
    match order {
        SortOrder::Ascending => "-1",
        SortOrder::Descending => "1",
    }
}

/// The leaderboard `limit` parameter, if it is within `1..=100`.
pub fn leaderboard_limit(limit: Option<u32>) -> Option<u32> {
    limit.filter(|l| (1..=MAX_LEADERBOARD_LIMIT).contains(l))
}

// =============================================================================
// CLIENT
// =============================================================================

/// Client for the CFTools Cloud data API.
#[derive(Clone)]
pub struct CfToolsClient {
    transport: Arc<dyn HttpTransport>,
    auth: Option<Arc<dyn AuthorizationProvider>>,
    server_api_id: Option<ServerApiId>,
    resolver: IdentityResolver,
}

impl CfToolsClient {
    /// Start building a client.
    pub fn builder() -> CfToolsClientBuilder {
        CfToolsClientBuilder::new()
    }

    /// Build a client from configuration.
    pub fn from_config(config: &ClientConfig) -> Result<Self, CfToolsError> {
        CfToolsClientBuilder::from_config(config)?.build()
    }

    /// Default server of this client.
    pub fn default_server_api_id(&self) -> Option<&ServerApiId> {
        self.server_api_id.as_ref()
    }

    /// Resolve any identifier to a CFTools id.
    pub async fn resolve(&self, id: &GenericId) -> Result<CfToolsId, CfToolsError> {
        self.resolver.resolve(id).await
    }

    // -------------------------------------------------------------------------
    // Players
    // -------------------------------------------------------------------------

    /// Fetch a player's record on a server.
    pub async fn get_player_details(
        &self,
        request: impl Into<GetPlayerDetailsRequest>,
    ) -> Result<Player, CfToolsError> {
        let request = request.into();
        self.require_auth()?;
        let scope = self.scope(&request)?;
        let id = self.resolver.resolve(&request).await?;

        let mut response: PlayerResponse = self
            .call(
                ApiRequest::get(server_path(&scope, "player"))
                    .query("cftools_id", id.as_str())
                    .authorization(self.authorization().await?),
            )
            .await?;
        let raw = response
            .remove(id.as_str())
            .ok_or_else(|| CfToolsError::MissingResource(id.to_string()))?;
        Ok(map_player(raw))
    }

    /// Fetch a server leaderboard.
    pub async fn get_leaderboard(
        &self,
        request: GetLeaderboardRequest,
    ) -> Result<Vec<LeaderboardItem>, CfToolsError> {
        self.require_auth()?;
        let scope = self.scope(&request)?;

        let mut api_request = ApiRequest::get(server_path(&scope, "leaderboard"))
            .query("stat", request.statistic.as_wire())
            .query("order", leaderboard_order(request.order));
        if let Some(limit) = leaderboard_limit(request.limit) {
            api_request = api_request.query("limit", limit.to_string());
        }

        let response: LeaderboardResponse = self
            .call(api_request.authorization(self.authorization().await?))
            .await?;
        Ok(response.leaderboard.into_iter().map(map_leaderboard_entry).collect())
    }

    // -------------------------------------------------------------------------
    // Priority queue
    // -------------------------------------------------------------------------

    /// Fetch a player's priority queue entry. `None` if the player has none.
    pub async fn get_priority_queue(
        &self,
        request: impl Into<GetPriorityQueueRequest>,
    ) -> Result<Option<PriorityQueueItem>, CfToolsError> {
        let request = request.into();
        self.require_auth()?;
        let scope = self.scope(&request)?;
        let id = self.resolver.resolve(&request).await?;

        let response: EntryListResponse = self
            .call(
                ApiRequest::get(server_path(&scope, "queuepriority"))
                    .query("cftools_id", id.as_str())
                    .authorization(self.authorization().await?),
            )
            .await?;
        response
            .entries
            .into_iter()
            .find(|entry| entry.user.cftools_id == id.as_str())
            .map(map_priority_queue_entry)
            .transpose()
    }

    /// Create or replace a player's priority queue entry.
    pub async fn put_priority_queue(
        &self,
        request: PutPriorityQueueItemRequest,
    ) -> Result<(), CfToolsError> {
        self.require_auth()?;
        let scope = self.scope(&request)?;
        let id = self.resolver.resolve(&request).await?;

        let body = PutEntryBody {
            cftools_id: id.to_string(),
            comment: request.comment,
            expires_at: request.expires.timestamp().map(|at| to_wire(&at)),
        };
        info!(server = %scope, cftools_id = %id, "putting priority queue entry");
        self.send(
            ApiRequest::post(server_path(&scope, "queuepriority"))
                .body(serde_json::to_string(&body)?)
                .authorization(self.authorization().await?),
        )
        .await
    }

    /// Remove a player's priority queue entry.
    pub async fn delete_priority_queue(
        &self,
        request: impl Into<DeletePriorityQueueRequest>,
    ) -> Result<(), CfToolsError> {
        let request = request.into();
        self.require_auth()?;
        let scope = self.scope(&request)?;
        let id = self.resolver.resolve(&request).await?;

        info!(server = %scope, cftools_id = %id, "deleting priority queue entry");
        self.send(
            ApiRequest::delete(server_path(&scope, "queuepriority"))
                .query("cftools_id", id.as_str())
                .authorization(self.authorization().await?),
        )
        .await
    }

    // -------------------------------------------------------------------------
    // Whitelist
    // -------------------------------------------------------------------------

    /// Fetch a player's whitelist entry. `None` if the player has none.
    pub async fn get_whitelist(
        &self,
        request: impl Into<GetWhitelistRequest>,
    ) -> Result<Option<WhitelistItem>, CfToolsError> {
        let request = request.into();
        self.require_auth()?;
        let scope = self.scope(&request)?;
        let id = self.resolver.resolve(&request).await?;

        let response: EntryListResponse = self
            .call(
                ApiRequest::get(server_path(&scope, "whitelist"))
                    .query("cftools_id", id.as_str())
                    .authorization(self.authorization().await?),
            )
            .await?;
        response
            .entries
            .into_iter()
            .find(|entry| entry.user.cftools_id == id.as_str())
            .map(map_whitelist_entry)
            .transpose()
    }

    /// Create or replace a player's whitelist entry.
    pub async fn put_whitelist(&self, request: PutWhitelistItemRequest) -> Result<(), CfToolsError> {
        self.require_auth()?;
        let scope = self.scope(&request)?;
        let id = self.resolver.resolve(&request).await?;

        let body = PutEntryBody {
            cftools_id: id.to_string(),
            comment: request.comment,
            expires_at: request.expires.timestamp().map(|at| to_wire(&at)),
        };
        info!(server = %scope, cftools_id = %id, "putting whitelist entry");
        self.send(
            ApiRequest::post(server_path(&scope, "whitelist"))
                .body(serde_json::to_string(&body)?)
                .authorization(self.authorization().await?),
        )
        .await
    }

    /// Remove a player's whitelist entry.
    pub async fn delete_whitelist(
        &self,
        request: impl Into<DeleteWhitelistRequest>,
    ) -> Result<(), CfToolsError> {
        let request = request.into();
        self.require_auth()?;
        let scope = self.scope(&request)?;
        let id = self.resolver.resolve(&request).await?;

        info!(server = %scope, cftools_id = %id, "deleting whitelist entry");
        self.send(
            ApiRequest::delete(server_path(&scope, "whitelist"))
                .query("cftools_id", id.as_str())
                .authorization(self.authorization().await?),
        )
        .await
    }

    // -------------------------------------------------------------------------
    // Servers
    // -------------------------------------------------------------------------

    /// Query a public game server. Needs no credentials.
    pub async fn get_game_server_details(
        &self,
        request: GetGameServerDetailsRequest,
    ) -> Result<GameServerItem, CfToolsError> {
        let resource = game_server_resource(&request.game.code().to_string(), &request.ip, request.port);

        let mut response: GameServerResponse =
            self.call(ApiRequest::get(gameserver_path(&resource))).await?;
        let raw = response
            .remove(&resource)
            .ok_or_else(|| CfToolsError::MissingResource(resource.clone()))?;
        map_game_server(raw)
    }

    /// Fetch information about a managed server.
    pub async fn get_server_info(&self, request: GetServerInfoRequest) -> Result<ServerInfo, CfToolsError> {
        self.require_auth()?;
        let scope = self.scope(&request)?;

        let response: ServerInfoResponse = self
            .call(
                ApiRequest::get(server_path(&scope, "info"))
                    .authorization(self.authorization().await?),
            )
            .await?;
        map_server_info(response.server)
    }

    /// List the live sessions of a managed server.
    pub async fn list_game_sessions(
        &self,
        request: ListGameSessionsRequest,
    ) -> Result<Vec<GameSession>, CfToolsError> {
        self.require_auth()?;
        let scope = self.scope(&request)?;

        let response: SessionListResponse = self
            .call(
                ApiRequest::get(server_path(&scope, "GSM/list"))
                    .authorization(self.authorization().await?),
            )
            .await?;
        response.sessions.into_iter().map(map_session).collect()
    }

    // -------------------------------------------------------------------------
    // GameLabs actions
    // -------------------------------------------------------------------------

    /// Post a raw GameLabs action.
    pub async fn game_labs_action(&self, request: GameLabsActionRequest) -> Result<(), CfToolsError> {
        self.require_auth()?;
        let scope = self.scope(&request)?;

        info!(server = %scope, action = %request.action_code, target = %request.reference_key, "dispatching action");
        self.send(
            ApiRequest::post(server_path(&scope, "GameLabs/action"))
                .body(serde_json::to_string(&request)?)
                .authorization(self.authorization().await?),
        )
        .await
    }

    /// Spawn an item for a player.
    pub async fn spawn_item(&self, request: SpawnItemRequest) -> Result<(), CfToolsError> {
        let action = GameLabsActionRequest::player(codes::SPAWN_PLAYER_ITEM, request.steam_id.as_str())
            .on_server(request.server_api_id)
            .parameter("item", ActionParameter::String { value: request.item_class })
            .parameter("quantity", ActionParameter::Int { value: i64::from(request.quantity.unwrap_or(1)) })
            .parameter("debug", ActionParameter::Boolean { value: request.debug.unwrap_or(false) })
            .parameter("stacked", ActionParameter::Boolean { value: request.stacked.unwrap_or(false) });
        self.game_labs_action(action).await
    }

    /// Heal a player.
    pub async fn heal_player(&self, request: HealPlayerRequest) -> Result<(), CfToolsError> {
        let action = GameLabsActionRequest::player(codes::HEAL_PLAYER, request.steam_id.as_str())
            .on_server(request.server_api_id);
        self.game_labs_action(action).await
    }

    /// Kill a player.
    pub async fn kill_player(&self, request: KillPlayerRequest) -> Result<(), CfToolsError> {
        let action = GameLabsActionRequest::player(codes::KILL_PLAYER, request.steam_id.as_str())
            .on_server(request.server_api_id);
        self.game_labs_action(action).await
    }

    /// Teleport a player.
    pub async fn teleport(&self, request: TeleportPlayerRequest) -> Result<(), CfToolsError> {
        let action = GameLabsActionRequest::player(codes::TELEPORT_PLAYER, request.steam_id.as_str())
            .on_server(request.server_api_id)
            .parameter("vector", request.coordinates.into());
        self.game_labs_action(action).await
    }

    // -------------------------------------------------------------------------
    // Bans
    // -------------------------------------------------------------------------

    /// List bans of a player or IP on a ban list.
    ///
    /// IP addresses filter directly; other identifiers are resolved first.
    pub async fn list_bans(&self, request: ListBansRequest) -> Result<Vec<Ban>, CfToolsError> {
        self.require_auth()?;
        let filter = match &request.player_id {
            GenericId::Ip(addr) => addr.to_wire(),
            GenericId::CfTools(_) | GenericId::Steam(_) => {
                self.resolver.resolve(&request).await?.to_string()
            }
        };

        let response: BanListResponse = self
            .call(
                ApiRequest::get(banlist_path(&request.list))
                    .query("filter", filter)
                    .authorization(self.authorization().await?),
            )
            .await?;
        response.entries.into_iter().map(map_ban).collect()
    }

    /// Ban a player or IP.
    ///
    /// IPv4 addresses are banned by address, everything else by CFTools id.
    pub async fn put_ban(&self, request: PutBanRequest) -> Result<(), CfToolsError> {
        self.require_auth()?;
        let (identifier, format) = match &request.player_id {
            GenericId::Ip(IpAddress::V4(addr)) => (addr.to_string(), BanFormat::Ipv4),
            GenericId::Ip(IpAddress::V6(_)) | GenericId::CfTools(_) | GenericId::Steam(_) => {
                let id = self.resolver.resolve(&request.player_id).await?;
                (id.to_string(), BanFormat::CftoolsId)
            }
        };

        let body = PutBanBody {
            identifier,
            format,
            reason: request.reason,
            expires_at: request.expiration.timestamp().map(|at| to_wire(&at)),
        };
        info!(list = %request.list, identifier = %body.identifier, "putting ban");
        self.send(
            ApiRequest::post(banlist_path(&request.list))
                .body(serde_json::to_string(&body)?)
                .authorization(self.authorization().await?),
        )
        .await
    }

    /// Delete a single ban.
    ///
    /// A named ban is deleted directly. A player's bans are listed first:
    /// none is a no-op, one is deleted, more than one is refused with
    /// [`CfToolsError::AmbiguousDeleteBanRequest`].
    pub async fn delete_ban(&self, request: DeleteBanRequest) -> Result<(), CfToolsError> {
        self.require_auth()?;
        let ban_id = match (request.ban_id, request.player_id) {
            (Some(ban_id), _) => ban_id,
            (None, Some(player_id)) => {
                let mut bans = self
                    .list_bans(ListBansRequest {
                        list: request.list.clone(),
                        player_id,
                    })
                    .await?;
                match bans.len() {
                    0 => {
                        debug!(list = %request.list, "no matching ban to delete");
                        return Ok(());
                    }
                    1 => bans.remove(0).id,
                    matches => return Err(CfToolsError::AmbiguousDeleteBanRequest { matches }),
                }
            }
            (None, None) => return Err(CfToolsError::BanIdentifierRequired),
        };
        self.delete_ban_by_id(&request.list, &ban_id).await
    }

    /// Delete every ban of a player or IP, one by one.
    ///
    /// Stops at the first failure; bans deleted before it stay deleted.
    pub async fn delete_bans(&self, request: DeleteBansRequest) -> Result<(), CfToolsError> {
        let bans = self
            .list_bans(ListBansRequest {
                list: request.list.clone(),
                player_id: request.player_id,
            })
            .await?;
        for ban in &bans {
            self.delete_ban(DeleteBanRequest::for_ban(request.list.clone(), ban)).await?;
        }
        Ok(())
    }

    async fn delete_ban_by_id(&self, list: &BanlistId, ban_id: &str) -> Result<(), CfToolsError> {
        info!(list = %list, ban_id, "deleting ban");
        self.send(
            ApiRequest::delete(banlist_path(list))
                .query("ban_id", ban_id)
                .authorization(self.authorization().await?),
        )
        .await
    }

    // -------------------------------------------------------------------------
    // Plumbing
    // -------------------------------------------------------------------------

    fn require_auth(&self) -> Result<&Arc<dyn AuthorizationProvider>, CfToolsError> {
        self.auth.as_ref().ok_or(CfToolsError::AuthenticationRequired)
    }

    async fn authorization(&self) -> Result<String, CfToolsError> {
        self.require_auth()?.provide(self.transport.as_ref()).await
    }

    fn scope<R: ServerScoped>(&self, request: &R) -> Result<ServerApiId, CfToolsError> {
        resolve_scope(request.server_api_id(), self.server_api_id.as_ref())
    }

    async fn call<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T, CfToolsError> {
        let raw = self.transport.execute(request).await?;
        Ok(serde_json::from_str(&raw)?)
    }

    async fn send(&self, request: ApiRequest) -> Result<(), CfToolsError> {
        self.transport.execute(request).await?;
        Ok(())
    }
}

// =============================================================================
// BUILDER
// =============================================================================

/// Builder for [`CfToolsClient`].
#[derive(Default)]
pub struct CfToolsClientBuilder {
    transport: Option<Arc<dyn HttpTransport>>,
    auth: Option<Arc<dyn AuthorizationProvider>>,
    server_api_id: Option<ServerApiId>,
}

impl CfToolsClientBuilder {
    /// Empty builder: default transport, no credentials, no default server.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder preloaded from configuration.
    pub fn from_config(config: &ClientConfig) -> Result<Self, CfToolsError> {
        let transport = ReqwestTransport::new(&config.base_url, config.timeout)?;
        Ok(Self {
            transport: Some(Arc::new(transport)),
            auth: config.authorization_provider(),
            server_api_id: config.server_api_id.clone(),
        })
    }

    /// Use a custom transport.
    pub fn with_transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Use a credential provider.
    pub fn with_authorization(mut self, auth: Arc<dyn AuthorizationProvider>) -> Self {
        self.auth = Some(auth);
        self
    }

    /// Default server for scoped operations.
    pub fn with_server_api_id(mut self, server_api_id: ServerApiId) -> Self {
        self.server_api_id = Some(server_api_id);
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<CfToolsClient, CfToolsError> {
        let transport: Arc<dyn HttpTransport> = match self.transport {
            Some(transport) => transport,
            None => Arc::new(ReqwestTransport::new(DEFAULT_BASE_URL, DEFAULT_TIMEOUT)?),
        };
        let resolver = IdentityResolver::new(transport.clone(), self.auth.clone());
        Ok(CfToolsClient {
            transport,
            auth: self.auth,
            server_api_id: self.server_api_id,
            resolver,
        })
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::id::SteamId64;
    use crate::core::time::Expiration;
    use crate::model::player::Statistic;
    use crate::model::server::Game;
    use crate::network::auth::StaticTokenProvider;
    use crate::network::mock::{game_server_fixture, MockTransport};
    use crate::network::resolver::LOOKUP_PATH;
    use crate::network::transport::Method;
    use chrono::{TimeZone, Utc};
    use proptest::prelude::*;
    use serde_json::{json, Value};
    use std::net::{Ipv4Addr, Ipv6Addr};

    const STEAM_ID: &str = "76561198012345678";

    fn client(transport: &Arc<MockTransport>) -> CfToolsClient {
        CfToolsClient::builder()
            .with_transport(transport.clone())
            .with_authorization(Arc::new(StaticTokenProvider::new("token")))
            .with_server_api_id(ServerApiId::of("default"))
            .build()
            .unwrap()
    }

    fn unauthenticated(transport: &Arc<MockTransport>) -> CfToolsClient {
        CfToolsClient::builder()
            .with_transport(transport.clone())
            .with_server_api_id(ServerApiId::of("default"))
            .build()
            .unwrap()
    }

    fn steam() -> GenericId {
        GenericId::Steam(SteamId64::of(STEAM_ID))
    }

    fn cftools(id: &str) -> GenericId {
        GenericId::CfTools(CfToolsId::of(id))
    }

    fn body_of(request: &ApiRequest) -> Value {
        serde_json::from_str(request.body.as_deref().unwrap()).unwrap()
    }

    fn ban_json(id: &str) -> Value {
        json!({
            "created_at": "2021-03-12T10:12:45.000Z",
            "expires_at": null,
            "id": id,
            "identifier": "abc",
            "reason": "cheating",
            "status": "Ban.ACTIVE"
        })
    }

    fn session_json() -> Value {
        json!({
            "cftools_id": "abc",
            "gamedata": {"player_name": "Survivor", "steam64": STEAM_ID},
            "id": "session-1",
            "info": {"ban_count": 0},
            "live": {"load_time": 10, "loaded": true, "position": {}}
        })
    }

    // -------------------------------------------------------------------------
    // Preconditions
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_missing_credentials_fail_before_network() {
        let transport = Arc::new(MockTransport::new());
        let client = unauthenticated(&transport);

        let result = client.get_player_details(cftools("abc")).await;
        assert!(matches!(result, Err(CfToolsError::AuthenticationRequired)));

        let result = client.get_server_info(GetServerInfoRequest::default()).await;
        assert!(matches!(result, Err(CfToolsError::AuthenticationRequired)));

        let result = client
            .delete_ban(DeleteBanRequest::for_player(BanlistId::of("list"), steam()))
            .await;
        assert!(matches!(result, Err(CfToolsError::AuthenticationRequired)));

        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_missing_scope_fails_before_network() {
        let transport = Arc::new(MockTransport::new());
        let client = CfToolsClient::builder()
            .with_transport(transport.clone())
            .with_authorization(Arc::new(StaticTokenProvider::new("token")))
            .build()
            .unwrap();

        // A Steam id would need a lookup; the scope check must come first.
        let result = client.get_player_details(steam()).await;
        assert!(matches!(result, Err(CfToolsError::ServerApiIdRequired)));

        let result = client.list_game_sessions(ListGameSessionsRequest::default()).await;
        assert!(matches!(result, Err(CfToolsError::ServerApiIdRequired)));

        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_explicit_scope_wins_over_default() {
        let transport = Arc::new(MockTransport::new());
        transport.respond(Method::Get, "v1/server/explicit/queuepriority", json!({"entries": []}));

        let request = GetPriorityQueueRequest::new(cftools("abc")).on_server(ServerApiId::of("explicit"));
        client(&transport).get_priority_queue(request).await.unwrap();

        assert_eq!(transport.requests()[0].path, "v1/server/explicit/queuepriority");
    }

    // -------------------------------------------------------------------------
    // Players
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_get_player_details_resolves_steam_id() {
        let transport = Arc::new(MockTransport::new());
        transport.respond(Method::Get, LOOKUP_PATH, json!({"cftools_id": "abc"}));
        transport.respond(
            Method::Get,
            "v1/server/default/player",
            json!({"abc": {"omega": {"name_history": ["Survivor"], "playtime": 60, "sessions": 2}}}),
        );

        let player = client(&transport).get_player_details(steam()).await.unwrap();

        assert_eq!(player.names, vec!["Survivor".to_string()]);
        assert_eq!(player.statistics.dayz.kills.infected, 0);
        assert_eq!(player.statistics.dayz.shots.fired, 0);

        let requests = transport.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[1].query_value("cftools_id"), Some("abc"));
        assert_eq!(requests[1].authorization.as_deref(), Some("token"));
    }

    #[tokio::test]
    async fn test_get_player_details_missing_key() {
        let transport = Arc::new(MockTransport::new());
        transport.respond(Method::Get, "v1/server/default/player", json!({}));

        let result = client(&transport).get_player_details(cftools("abc")).await;
        assert!(matches!(result, Err(CfToolsError::MissingResource(key)) if key == "abc"));
    }

    #[tokio::test]
    async fn test_leaderboard_query_encoding() {
        let transport = Arc::new(MockTransport::new());
        transport.respond(
            Method::Get,
            "v1/server/default/leaderboard",
            json!({"leaderboard": [{"cftools_id": "abc", "latest_name": "Survivor", "rank": 1, "kills": 5}]}),
        );
        transport.respond(Method::Get, "v1/server/default/leaderboard", json!({"leaderboard": []}));
        let client = client(&transport);

        let request = GetLeaderboardRequest {
            order: SortOrder::Ascending,
            limit: Some(10),
            ..GetLeaderboardRequest::new(Statistic::Kills)
        };
        let items = client.get_leaderboard(request).await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].kills, 5);
        assert_eq!(items[0].deaths, 0);

        let request = GetLeaderboardRequest {
            limit: Some(101),
            ..GetLeaderboardRequest::new(Statistic::KillDeathRatio)
        };
        client.get_leaderboard(request).await.unwrap();

        let requests = transport.requests();
        assert_eq!(requests[0].query_value("stat"), Some("kills"));
        assert_eq!(requests[0].query_value("order"), Some("-1"));
        assert_eq!(requests[0].query_value("limit"), Some("10"));
        assert_eq!(requests[1].query_value("stat"), Some("kdratio"));
        assert_eq!(requests[1].query_value("order"), Some("1"));
        assert_eq!(requests[1].query_value("limit"), None);
    }

    proptest! {
        #[test]
        fn prop_leaderboard_limit_window(limit in any::<u32>()) {
            let sent = leaderboard_limit(Some(limit));
            if (1..=100).contains(&limit) {
                prop_assert_eq!(sent, Some(limit));
            } else {
                prop_assert_eq!(sent, None);
            }
        }
    }

    #[test]
    fn test_leaderboard_order_encoding() {
        assert_eq!(leaderboard_order(SortOrder::Ascending), "-1");
        assert_eq!(leaderboard_order(SortOrder::Descending), "1");
        assert_eq!(leaderboard_limit(None), None);
    }

    // -------------------------------------------------------------------------
    // Priority queue / whitelist
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_priority_queue_expiration_round_trip() {
        let transport = Arc::new(MockTransport::new());
        let expires = Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap();
        let client = client(&transport);

        transport.respond_empty(Method::Post, "v1/server/default/queuepriority");
        client
            .put_priority_queue(PutPriorityQueueItemRequest {
                id: cftools("abc"),
                comment: "vip".into(),
                expires: Expiration::At(expires),
                server_api_id: None,
            })
            .await
            .unwrap();

        let sent = body_of(&transport.requests()[0]);
        assert_eq!(
            sent,
            json!({"cftools_id": "abc", "comment": "vip", "expires_at": "2030-01-01T00:00:00.000Z"})
        );

        // Upstream echoes the stored value back.
        transport.respond(
            Method::Get,
            "v1/server/default/queuepriority",
            json!({"entries": [{
                "created_at": "2021-03-12T10:12:45.000Z",
                "creator": {"cftools_id": "admin"},
                "meta": {"comment": "vip", "expiration": sent["expires_at"]},
                "user": {"cftools_id": "abc"}
            }]}),
        );
        let item = client.get_priority_queue(cftools("abc")).await.unwrap().unwrap();
        assert_eq!(item.expiration, Expiration::At(expires));
    }

    #[tokio::test]
    async fn test_permanent_whitelist_sends_no_expiry() {
        let transport = Arc::new(MockTransport::new());
        let client = client(&transport);

        transport.respond_empty(Method::Post, "v1/server/default/whitelist");
        client
            .put_whitelist(PutWhitelistItemRequest {
                id: cftools("abc"),
                comment: "friend".into(),
                expires: Expiration::Permanent,
                server_api_id: None,
            })
            .await
            .unwrap();

        let sent = body_of(&transport.requests()[0]);
        assert_eq!(sent, json!({"cftools_id": "abc", "comment": "friend"}));

        transport.respond(
            Method::Get,
            "v1/server/default/whitelist",
            json!({"entries": [{
                "created_at": "2021-03-12T10:12:45.000Z",
                "creator": {"cftools_id": "admin"},
                "meta": {"comment": "friend", "expiration": null},
                "user": {"cftools_id": "abc"}
            }]}),
        );
        let item = client.get_whitelist(cftools("abc")).await.unwrap().unwrap();
        assert_eq!(item.expiration, Expiration::Permanent);
    }

    #[tokio::test]
    async fn test_missing_entries_are_none() {
        let transport = Arc::new(MockTransport::new());
        transport.respond(Method::Get, "v1/server/default/queuepriority", json!({"entries": []}));
        transport.respond(
            Method::Get,
            "v1/server/default/whitelist",
            json!({"entries": [{
                "created_at": "2021-03-12T10:12:45.000Z",
                "creator": {"cftools_id": "admin"},
                "meta": {"comment": "", "expiration": null},
                "user": {"cftools_id": "someone-else"}
            }]}),
        );
        let client = client(&transport);

        assert!(client.get_priority_queue(cftools("abc")).await.unwrap().is_none());
        assert!(client.get_whitelist(cftools("abc")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_entries_send_cftools_id() {
        let transport = Arc::new(MockTransport::new());
        transport.respond_empty(Method::Delete, "v1/server/default/queuepriority");
        transport.respond_empty(Method::Delete, "v1/server/default/whitelist");
        let client = client(&transport);

        client.delete_priority_queue(cftools("abc")).await.unwrap();
        client.delete_whitelist(cftools("abc")).await.unwrap();

        let deletes = transport.requests_with(Method::Delete);
        assert_eq!(deletes.len(), 2);
        assert!(deletes.iter().all(|r| r.query_value("cftools_id") == Some("abc")));
    }

    // -------------------------------------------------------------------------
    // Servers
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_game_server_details_uses_stable_hash() {
        let transport = Arc::new(MockTransport::new());
        let hash = "52b8f09f134195df1a8823dc53a425199382d7c0";
        let path = format!("v1/gameserver/{}", hash);
        transport.respond(Method::Get, &path, json!({ hash: game_server_fixture("GameServerQueryError.NONE") }));
        transport.respond(Method::Get, &path, json!({ hash: game_server_fixture("GameServerQueryError.NONE") }));
        let client = unauthenticated(&transport);

        let request = GetGameServerDetailsRequest { game: Game::DayZ, ip: "1.2.3.4".into(), port: 2302 };
        let first = client.get_game_server_details(request.clone()).await.unwrap();
        let second = client.get_game_server_details(request).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(first.name, "Test Server");
        let requests = transport.requests();
        assert_eq!(requests[0].path, requests[1].path);
        assert!(requests[0].authorization.is_none());
    }

    #[tokio::test]
    async fn test_game_server_query_error() {
        let transport = Arc::new(MockTransport::new());
        let hash = "52b8f09f134195df1a8823dc53a425199382d7c0";
        transport.respond(
            Method::Get,
            &format!("v1/gameserver/{}", hash),
            json!({ hash: game_server_fixture("GameServerQueryError.TIMEOUT") }),
        );

        let request = GetGameServerDetailsRequest { game: Game::DayZ, ip: "1.2.3.4".into(), port: 2302 };
        let result = client(&transport).get_game_server_details(request).await;

        assert!(matches!(
            result,
            Err(CfToolsError::GameServerQuery(code)) if code == "GameServerQueryError.TIMEOUT"
        ));
    }

    #[tokio::test]
    async fn test_game_server_query_error_with_bare_object() {
        let transport = Arc::new(MockTransport::new());
        let hash = "52b8f09f134195df1a8823dc53a425199382d7c0";
        transport.respond(
            Method::Get,
            &format!("v1/gameserver/{}", hash),
            json!({ hash: {"_object": {"error": "GameServerQueryError.TIMEOUT"}} }),
        );

        let request = GetGameServerDetailsRequest { game: Game::DayZ, ip: "1.2.3.4".into(), port: 2302 };
        let result = unauthenticated(&transport).get_game_server_details(request).await;

        assert!(matches!(
            result,
            Err(CfToolsError::GameServerQuery(code)) if code == "GameServerQueryError.TIMEOUT"
        ));
    }

    #[tokio::test]
    async fn test_game_server_null_player_count_reads_zero() {
        let transport = Arc::new(MockTransport::new());
        let hash = "52b8f09f134195df1a8823dc53a425199382d7c0";
        let mut server = game_server_fixture("GameServerQueryError.NONE");
        server["status"]["players"] = Value::Null;
        transport.respond(Method::Get, &format!("v1/gameserver/{}", hash), json!({ hash: server }));

        let request = GetGameServerDetailsRequest { game: Game::DayZ, ip: "1.2.3.4".into(), port: 2302 };
        let item = unauthenticated(&transport).get_game_server_details(request).await.unwrap();

        assert_eq!(item.status.players.online, 0);
        assert_eq!(item.status.players.slots, 60);
    }

    #[tokio::test]
    async fn test_list_game_sessions() {
        let transport = Arc::new(MockTransport::new());
        transport.respond(Method::Get, "v1/server/default/GSM/list", json!({"sessions": [session_json()]}));

        let sessions = client(&transport)
            .list_game_sessions(ListGameSessionsRequest::default())
            .await
            .unwrap();

        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions[0].steam_id, SteamId64::of(STEAM_ID));
        assert!(sessions[0].profile.is_none());
        assert!(sessions[0].live.ping.is_none());
    }

    // -------------------------------------------------------------------------
    // Actions
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_spawn_item_defaults() {
        let transport = Arc::new(MockTransport::new());
        transport.respond_empty(Method::Post, "v1/server/default/GameLabs/action");
        let client = client(&transport);

        let session = crate::network::mapping::map_session(
            serde_json::from_value(session_json()).unwrap(),
        )
        .unwrap();
        client.spawn_item(SpawnItemRequest::new(&session, "Apple")).await.unwrap();

        let sent = body_of(&transport.requests()[0]);
        assert_eq!(sent["actionCode"], "CFCloud_SpawnPlayerItem");
        assert_eq!(sent["actionContext"], "player");
        assert_eq!(sent["referenceKey"], STEAM_ID);
        assert_eq!(sent["parameters"]["item"], json!({"dataType": "string", "valueString": "Apple"}));
        assert_eq!(sent["parameters"]["quantity"], json!({"dataType": "int", "valueInt": 1}));
        assert_eq!(sent["parameters"]["debug"], json!({"dataType": "boolean", "valueBoolean": false}));
        assert_eq!(sent["parameters"]["stacked"], json!({"dataType": "boolean", "valueBoolean": false}));
    }

    #[tokio::test]
    async fn test_heal_kill_teleport() {
        let transport = Arc::new(MockTransport::new());
        transport.respond_empty(Method::Post, "v1/server/default/GameLabs/action");
        transport.respond_empty(Method::Post, "v1/server/default/GameLabs/action");
        transport.respond_empty(Method::Post, "v1/server/other/GameLabs/action");
        let client = client(&transport);
        let target = SteamId64::of(STEAM_ID);

        client
            .heal_player(HealPlayerRequest { steam_id: target.clone(), server_api_id: None })
            .await
            .unwrap();
        client
            .kill_player(KillPlayerRequest { steam_id: target.clone(), server_api_id: None })
            .await
            .unwrap();
        client
            .teleport(TeleportPlayerRequest {
                steam_id: target,
                coordinates: crate::model::session::Vector3::new(100.0, 5.0, 200.0),
                server_api_id: Some(ServerApiId::of("other")),
            })
            .await
            .unwrap();

        let requests = transport.requests();
        assert_eq!(body_of(&requests[0])["actionCode"], "CFCloud_HealPlayer");
        assert_eq!(body_of(&requests[0])["parameters"], json!({}));
        assert_eq!(body_of(&requests[1])["actionCode"], "CFCloud_KillPlayer");
        assert_eq!(requests[2].path, "v1/server/other/GameLabs/action");
        assert_eq!(
            body_of(&requests[2])["parameters"]["vector"],
            json!({"dataType": "vector", "valueVectorX": 100.0, "valueVectorY": 5.0, "valueVectorZ": 200.0})
        );
    }

    // -------------------------------------------------------------------------
    // Bans
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_list_bans_ip_skips_resolution() {
        let transport = Arc::new(MockTransport::new());
        transport.respond(Method::Get, "v1/banlist/list/bans", json!({"entries": [ban_json("ban-1")]}));

        let request = ListBansRequest {
            list: BanlistId::of("list"),
            player_id: GenericId::Ip(IpAddress::V4(Ipv4Addr::new(1, 2, 3, 4))),
        };
        let bans = client(&transport).list_bans(request).await.unwrap();

        assert_eq!(bans.len(), 1);
        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].query_value("filter"), Some("1.2.3.4"));
    }

    #[tokio::test]
    async fn test_put_ban_ipv4_format() {
        let transport = Arc::new(MockTransport::new());
        transport.respond_empty(Method::Post, "v1/banlist/list/bans");

        client(&transport)
            .put_ban(PutBanRequest {
                list: BanlistId::of("list"),
                player_id: GenericId::Ip(IpAddress::V4(Ipv4Addr::new(1, 2, 3, 4))),
                reason: "cheating".into(),
                expiration: Expiration::Permanent,
            })
            .await
            .unwrap();

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(
            body_of(&requests[0]),
            json!({"identifier": "1.2.3.4", "format": "ipv4", "reason": "cheating"})
        );
    }

    #[tokio::test]
    async fn test_put_ban_ipv6_is_resolved() {
        let transport = Arc::new(MockTransport::new());
        transport.respond(Method::Get, LOOKUP_PATH, json!({"cftools_id": "abc"}));
        transport.respond_empty(Method::Post, "v1/banlist/list/bans");
        let expires = Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap();

        client(&transport)
            .put_ban(PutBanRequest {
                list: BanlistId::of("list"),
                player_id: GenericId::Ip(IpAddress::V6(Ipv6Addr::LOCALHOST)),
                reason: "cheating".into(),
                expiration: Expiration::At(expires),
            })
            .await
            .unwrap();

        let requests = transport.requests();
        assert_eq!(requests[0].query_value("identifier"), Some("::1"));
        assert_eq!(
            body_of(&requests[1]),
            json!({
                "identifier": "abc",
                "format": "cftools_id",
                "reason": "cheating",
                "expires_at": "2030-01-01T00:00:00.000Z"
            })
        );
    }

    #[tokio::test]
    async fn test_delete_ban_by_id_skips_listing() {
        let transport = Arc::new(MockTransport::new());
        transport.respond_empty(Method::Delete, "v1/banlist/list/bans");

        let request = DeleteBanRequest {
            list: BanlistId::of("list"),
            ban_id: Some("ban-9".into()),
            player_id: Some(steam()),
        };
        client(&transport).delete_ban(request).await.unwrap();

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, Method::Delete);
        assert_eq!(requests[0].query_value("ban_id"), Some("ban-9"));
    }

    #[tokio::test]
    async fn test_delete_ban_single_match() {
        let transport = Arc::new(MockTransport::new());
        transport.respond(Method::Get, "v1/banlist/list/bans", json!({"entries": [ban_json("ban-1")]}));
        transport.respond_empty(Method::Delete, "v1/banlist/list/bans");

        client(&transport)
            .delete_ban(DeleteBanRequest::for_player(BanlistId::of("list"), cftools("abc")))
            .await
            .unwrap();

        let deletes = transport.requests_with(Method::Delete);
        assert_eq!(deletes.len(), 1);
        assert_eq!(deletes[0].query_value("ban_id"), Some("ban-1"));
    }

    #[tokio::test]
    async fn test_delete_ban_no_match_is_noop() {
        let transport = Arc::new(MockTransport::new());
        transport.respond(Method::Get, "v1/banlist/list/bans", json!({"entries": []}));

        client(&transport)
            .delete_ban(DeleteBanRequest::for_player(BanlistId::of("list"), cftools("abc")))
            .await
            .unwrap();

        assert!(transport.requests_with(Method::Delete).is_empty());
    }

    #[tokio::test]
    async fn test_delete_ban_ambiguous() {
        let transport = Arc::new(MockTransport::new());
        transport.respond(
            Method::Get,
            "v1/banlist/list/bans",
            json!({"entries": [ban_json("ban-1"), ban_json("ban-2")]}),
        );

        let result = client(&transport)
            .delete_ban(DeleteBanRequest::for_player(BanlistId::of("list"), cftools("abc")))
            .await;

        assert!(matches!(result, Err(CfToolsError::AmbiguousDeleteBanRequest { matches: 2 })));
        assert!(transport.requests_with(Method::Delete).is_empty());
    }

    #[tokio::test]
    async fn test_delete_ban_without_identifier() {
        let transport = Arc::new(MockTransport::new());

        let request = DeleteBanRequest { list: BanlistId::of("list"), ban_id: None, player_id: None };
        let result = client(&transport).delete_ban(request).await;

        assert!(matches!(result, Err(CfToolsError::BanIdentifierRequired)));
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_delete_bans_deletes_each() {
        let transport = Arc::new(MockTransport::new());
        transport.respond(
            Method::Get,
            "v1/banlist/list/bans",
            json!({"entries": [ban_json("ban-1"), ban_json("ban-2")]}),
        );
        transport.respond_empty(Method::Delete, "v1/banlist/list/bans");
        transport.respond_empty(Method::Delete, "v1/banlist/list/bans");

        client(&transport)
            .delete_bans(DeleteBansRequest { list: BanlistId::of("list"), player_id: cftools("abc") })
            .await
            .unwrap();

        let deleted: Vec<_> = transport
            .requests_with(Method::Delete)
            .iter()
            .map(|r| r.query_value("ban_id").unwrap().to_string())
            .collect();
        assert_eq!(deleted, vec!["ban-1", "ban-2"]);
    }

    #[tokio::test]
    async fn test_delete_bans_stops_at_first_failure() {
        let transport = Arc::new(MockTransport::new());
        transport.respond(
            Method::Get,
            "v1/banlist/list/bans",
            json!({"entries": [ban_json("ban-1"), ban_json("ban-2"), ban_json("ban-3")]}),
        );
        transport.respond_empty(Method::Delete, "v1/banlist/list/bans");
        transport.fail(Method::Delete, "v1/banlist/list/bans", 500);
        transport.respond_empty(Method::Delete, "v1/banlist/list/bans");

        let result = client(&transport)
            .delete_bans(DeleteBansRequest { list: BanlistId::of("list"), player_id: cftools("abc") })
            .await;

        assert!(matches!(result, Err(CfToolsError::Transport(_))));
        assert_eq!(transport.requests_with(Method::Delete).len(), 2);
    }
}
