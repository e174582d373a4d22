//! Network Layer
//!
//! Everything between a typed request and the CFTools Cloud API: transport,
//! credentials, wire shapes, identity resolution and the client facade.
//! Mapping from wire shapes to domain records is pure and lives in `mapping`.

pub mod auth;
pub mod client;
pub mod mapping;
#[allow(missing_docs)]
pub mod protocol;
pub mod request;
pub mod resolver;
pub mod transport;

#[cfg(test)]
pub(crate) mod mock;

pub use auth::{
    ApplicationAuthorizationProvider, ApplicationCredentials, AuthorizationProvider,
    StaticTokenProvider,
};
pub use client::{CfToolsClient, CfToolsClientBuilder};
pub use request::{
    DeleteBanRequest, DeleteBansRequest, DeletePriorityQueueRequest, DeleteWhitelistRequest,
    GetGameServerDetailsRequest, GetLeaderboardRequest, GetPlayerDetailsRequest,
    GetPriorityQueueRequest, GetServerInfoRequest, GetWhitelistRequest, HealPlayerRequest,
    KillPlayerRequest, ListBansRequest, ListGameSessionsRequest, PlayerReference, PutBanRequest,
    PutPriorityQueueItemRequest, PutWhitelistItemRequest, ServerScoped, SpawnItemRequest,
    TeleportPlayerRequest,
};
pub use resolver::{resolve_scope, IdentityResolver};
pub use transport::{ApiRequest, HttpTransport, Method, ReqwestTransport, TransportError};
