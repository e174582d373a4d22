//! Client Errors
//!
//! One error type for every operation on the client. Precondition variants
//! are raised before any network call is made.

use thiserror::Error;

use crate::network::transport::TransportError;

/// Errors returned by [`crate::CfToolsClient`] operations.
#[derive(Debug, Error)]
pub enum CfToolsError {
    /// The operation needs a credential provider and none was configured.
    #[error("authentication required: no authorization provider configured")]
    AuthenticationRequired,

    /// No server API id on the request and no default on the client.
    #[error("server api id required: none on the request and no default configured")]
    ServerApiIdRequired,

    /// A ban deletion named neither a ban nor a player.
    #[error("at least one of ban or player id is required to delete a ban")]
    BanIdentifierRequired,

    /// A ban deletion by player matched more than one ban.
    #[error("ambiguous delete ban request: {matches} bans match the given player")]
    AmbiguousDeleteBanRequest {
        /// Number of matching bans.
        matches: usize,
    },

    /// The game server query embedded an error in an otherwise successful response.
    #[error("game server query failed: {0}")]
    GameServerQuery(String),

    /// The server reported a game code this client does not know.
    #[error("unsupported game: {0}")]
    UnsupportedGame(i64),

    /// A keyed response did not contain the requested key.
    #[error("response is missing resource: {0}")]
    MissingResource(String),

    /// An upstream timestamp could not be parsed.
    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),

    /// Transport failure, passed through unchanged.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Response body did not match the expected shape.
    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),
}

impl CfToolsError {
    /// Whether the upstream answered with 404.
    pub fn is_not_found(&self) -> bool {
        matches!(self, CfToolsError::Transport(err) if err.status() == Some(404))
    }
}
