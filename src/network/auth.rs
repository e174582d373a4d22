//! API Authorization
//!
//! Supplies bearer tokens for authenticated calls. The client asks the
//! provider once per authenticated request and never stores the result.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::info;

use crate::error::CfToolsError;
use crate::network::transport::{ApiRequest, HttpTransport};

/// Tokens issued by `v1/auth/register` are valid for 24 hours.
/// Refresh an hour early.
pub const TOKEN_LIFETIME: Duration = Duration::from_secs(23 * 60 * 60);

/// Yields a bearer credential for the given transport.
#[async_trait]
pub trait AuthorizationProvider: Send + Sync {
    /// Return a token usable as `Authorization: Bearer <token>`.
    async fn provide(&self, transport: &dyn HttpTransport) -> Result<String, CfToolsError>;
}

/// Provider for a token obtained out of band.
#[derive(Clone, Debug)]
pub struct StaticTokenProvider {
    token: String,
}

impl StaticTokenProvider {
    /// Wrap a pre-issued token.
    pub fn new(token: impl Into<String>) -> Self {
        Self { token: token.into() }
    }
}

#[async_trait]
impl AuthorizationProvider for StaticTokenProvider {
    async fn provide(&self, _transport: &dyn HttpTransport) -> Result<String, CfToolsError> {
        Ok(self.token.clone())
    }
}

/// Application credentials from the CFTools developer portal.
#[derive(Clone, Debug, Serialize)]
pub struct ApplicationCredentials {
    /// Application id.
    pub application_id: String,
    /// Application secret.
    pub secret: String,
}

#[derive(Deserialize)]
struct RegisterResponse {
    token: String,
}

struct IssuedToken {
    token: String,
    issued_at: Instant,
}

/// Provider that registers application credentials for a token.
///
/// The issued token is reused until [`TOKEN_LIFETIME`] has elapsed.
pub struct ApplicationAuthorizationProvider {
    credentials: ApplicationCredentials,
    lifetime: Duration,
    current: RwLock<Option<IssuedToken>>,
}

impl ApplicationAuthorizationProvider {
    /// Create a provider for the given credentials.
    pub fn new(credentials: ApplicationCredentials) -> Self {
        Self::with_lifetime(credentials, TOKEN_LIFETIME)
    }

    /// Create a provider with a custom token lifetime.
    pub fn with_lifetime(credentials: ApplicationCredentials, lifetime: Duration) -> Self {
        Self {
            credentials,
            lifetime,
            current: RwLock::new(None),
        }
    }

    async fn register(&self, transport: &dyn HttpTransport) -> Result<String, CfToolsError> {
        let body = serde_json::to_string(&self.credentials)?;
        let raw = transport
            .execute(ApiRequest::post("v1/auth/register").body(body))
            .await?;
        let response: RegisterResponse = serde_json::from_str(&raw)?;
        info!(application_id = %self.credentials.application_id, "registered api token");
        Ok(response.token)
    }
}

#[async_trait]
impl AuthorizationProvider for ApplicationAuthorizationProvider {
    async fn provide(&self, transport: &dyn HttpTransport) -> Result<String, CfToolsError> {
        {
            let current = self.current.read().await;
            if let Some(issued) = current.as_ref() {
                if issued.issued_at.elapsed() < self.lifetime {
                    return Ok(issued.token.clone());
                }
            }
        }

        let mut current = self.current.write().await;
        // Another caller may have refreshed while we waited for the lock.
        if let Some(issued) = current.as_ref() {
            if issued.issued_at.elapsed() < self.lifetime {
                return Ok(issued.token.clone());
            }
        }
        let token = self.register(transport).await?;
        *current = Some(IssuedToken {
            token: token.clone(),
            issued_at: Instant::now(),
        });
        Ok(token)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::mock::MockTransport;
    use crate::network::transport::Method;
    use serde_json::json;

    fn credentials() -> ApplicationCredentials {
        ApplicationCredentials {
            application_id: "app".into(),
            secret: "secret".into(),
        }
    }

    #[tokio::test]
    async fn test_static_token() {
        let transport = MockTransport::new();
        let provider = StaticTokenProvider::new("abc");
        assert_eq!(provider.provide(&transport).await.unwrap(), "abc");
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_register_sends_credentials() {
        let transport = MockTransport::new();
        transport.respond(Method::Post, "v1/auth/register", json!({"token": "issued"}));

        let provider = ApplicationAuthorizationProvider::new(credentials());
        assert_eq!(provider.provide(&transport).await.unwrap(), "issued");

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        let body: serde_json::Value =
            serde_json::from_str(requests[0].body.as_deref().unwrap()).unwrap();
        assert_eq!(body, json!({"application_id": "app", "secret": "secret"}));
        assert!(requests[0].authorization.is_none());
    }

    #[tokio::test]
    async fn test_token_is_reused_within_lifetime() {
        let transport = MockTransport::new();
        transport.respond(Method::Post, "v1/auth/register", json!({"token": "issued"}));

        let provider = ApplicationAuthorizationProvider::new(credentials());
        provider.provide(&transport).await.unwrap();
        provider.provide(&transport).await.unwrap();

        assert_eq!(transport.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_expired_token_is_reissued() {
        let transport = MockTransport::new();
        transport.respond(Method::Post, "v1/auth/register", json!({"token": "first"}));
        transport.respond(Method::Post, "v1/auth/register", json!({"token": "second"}));

        let provider = ApplicationAuthorizationProvider::with_lifetime(credentials(), Duration::ZERO);
        assert_eq!(provider.provide(&transport).await.unwrap(), "first");
        assert_eq!(provider.provide(&transport).await.unwrap(), "second");
    }
}
