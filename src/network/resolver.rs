//! Identity and Scope Resolution
//!
//! Turns any [`GenericId`] into the canonical [`CfToolsId`], and picks the
//! server an operation targets. Nothing here is memoized: every unresolved
//! identifier costs one lookup per call.

use std::sync::Arc;

use tracing::debug;

use crate::core::id::{CfToolsId, GenericId, ServerApiId};
use crate::error::CfToolsError;
use crate::network::auth::AuthorizationProvider;
use crate::network::protocol::UserLookupResponse;
use crate::network::request::PlayerReference;
use crate::network::transport::{ApiRequest, HttpTransport};

/// Lookup endpoint for non-canonical identifiers.
pub const LOOKUP_PATH: &str = "v1/users/lookup";

/// Resolves identifiers against `v1/users/lookup`.
#[derive(Clone)]
pub struct IdentityResolver {
    transport: Arc<dyn HttpTransport>,
    auth: Option<Arc<dyn AuthorizationProvider>>,
}

impl IdentityResolver {
    /// Create a resolver sharing the client's transport and credentials.
    pub fn new(
        transport: Arc<dyn HttpTransport>,
        auth: Option<Arc<dyn AuthorizationProvider>>,
    ) -> Self {
        Self { transport, auth }
    }

    /// Resolve an identifier, or the identifier a request carries.
    ///
    /// A [`CfToolsId`] is returned unchanged without touching the network.
    /// Lookup failures (including 404) are returned as-is.
    pub async fn resolve<R: PlayerReference>(&self, reference: &R) -> Result<CfToolsId, CfToolsError> {
        let identifier = match reference.player_id() {
            GenericId::CfTools(id) => return Ok(id.clone()),
            other @ (GenericId::Steam(_) | GenericId::Ip(_)) => other,
        };

        let auth = self.auth.as_ref().ok_or(CfToolsError::AuthenticationRequired)?;
        let token = auth.provide(self.transport.as_ref()).await?;

        debug!(identifier = %identifier, "resolving identifier");
        let request = ApiRequest::get(LOOKUP_PATH)
            .query("identifier", identifier.native_value())
            .authorization(token);
        let raw = self.transport.execute(request).await?;
        let response: UserLookupResponse = serde_json::from_str(&raw)?;
        Ok(CfToolsId::of(response.cftools_id))
    }
}

/// Pick the server an operation targets.
///
/// The explicit scope wins over the configured default. With neither the
/// operation fails before any request is built.
pub fn resolve_scope(
    explicit: Option<&ServerApiId>,
    default: Option<&ServerApiId>,
) -> Result<ServerApiId, CfToolsError> {
    explicit
        .or(default)
        .cloned()
        .ok_or(CfToolsError::ServerApiIdRequired)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::id::{IpAddress, SteamId64};
    use crate::network::auth::StaticTokenProvider;
    use crate::network::mock::MockTransport;
    use crate::network::transport::Method;
    use serde_json::json;
    use std::net::Ipv4Addr;

    fn resolver(transport: &Arc<MockTransport>) -> IdentityResolver {
        IdentityResolver::new(transport.clone(), Some(Arc::new(StaticTokenProvider::new("token"))))
    }

    #[tokio::test]
    async fn test_canonical_id_short_circuits() {
        let transport = Arc::new(MockTransport::new());
        let id = GenericId::CfTools(CfToolsId::of("abc"));

        let resolved = resolver(&transport).resolve(&id).await.unwrap();

        assert_eq!(resolved, CfToolsId::of("abc"));
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_canonical_id_needs_no_credentials() {
        let transport = Arc::new(MockTransport::new());
        let resolver = IdentityResolver::new(transport.clone(), None);

        let resolved = resolver.resolve(&GenericId::CfTools(CfToolsId::of("abc"))).await;
        assert_eq!(resolved.unwrap(), CfToolsId::of("abc"));
    }

    #[tokio::test]
    async fn test_steam_id_is_looked_up() {
        let transport = Arc::new(MockTransport::new());
        transport.respond(Method::Get, LOOKUP_PATH, json!({"cftools_id": "resolved"}));

        let id = GenericId::Steam(SteamId64::of("76561198012345678"));
        let resolved = resolver(&transport).resolve(&id).await.unwrap();

        assert_eq!(resolved, CfToolsId::of("resolved"));
        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].query_value("identifier"), Some("76561198012345678"));
        assert_eq!(requests[0].authorization.as_deref(), Some("token"));
    }

    #[tokio::test]
    async fn test_ip_is_looked_up_by_address() {
        let transport = Arc::new(MockTransport::new());
        transport.respond(Method::Get, LOOKUP_PATH, json!({"cftools_id": "resolved"}));

        let id = GenericId::Ip(IpAddress::V4(Ipv4Addr::new(10, 0, 0, 1)));
        resolver(&transport).resolve(&id).await.unwrap();

        assert_eq!(transport.requests()[0].query_value("identifier"), Some("10.0.0.1"));
    }

    #[tokio::test]
    async fn test_lookup_without_credentials_fails() {
        let transport = Arc::new(MockTransport::new());
        let resolver = IdentityResolver::new(transport.clone(), None);

        let result = resolver.resolve(&GenericId::Steam(SteamId64::of("76561198012345678"))).await;

        assert!(matches!(result, Err(CfToolsError::AuthenticationRequired)));
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_lookup_failure_is_propagated() {
        let transport = Arc::new(MockTransport::new());
        transport.fail(Method::Get, LOOKUP_PATH, 404);

        let result = resolver(&transport)
            .resolve(&GenericId::Steam(SteamId64::of("76561198012345678")))
            .await;

        let err = result.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(transport.requests().len(), 1);
    }

    #[test]
    fn test_scope_precedence() {
        let explicit = ServerApiId::of("explicit");
        let default = ServerApiId::of("default");

        assert_eq!(resolve_scope(Some(&explicit), Some(&default)).unwrap(), explicit);
        assert_eq!(resolve_scope(None, Some(&default)).unwrap(), default);
        assert_eq!(resolve_scope(Some(&explicit), None).unwrap(), explicit);
        assert!(matches!(resolve_scope(None, None), Err(CfToolsError::ServerApiIdRequired)));
    }
}
