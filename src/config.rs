//! Client Configuration
//!
//! Everything needed to build a [`crate::CfToolsClient`] outside of code,
//! read from `CFTOOLS_*` environment variables.

use std::sync::Arc;
use std::time::Duration;

use crate::core::id::ServerApiId;
use crate::network::auth::{
    ApplicationAuthorizationProvider, ApplicationCredentials, AuthorizationProvider,
    StaticTokenProvider,
};
use crate::network::client::DEFAULT_TIMEOUT;
use crate::network::transport::DEFAULT_BASE_URL;

/// Client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API endpoint.
    pub base_url: String,
    /// Default server for scoped operations.
    pub server_api_id: Option<ServerApiId>,
    /// Application id for `v1/auth/register`.
    pub application_id: Option<String>,
    /// Application secret for `v1/auth/register`.
    pub secret: Option<String>,
    /// Pre-issued bearer token. Wins over application credentials.
    pub api_token: Option<String>,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            server_api_id: None,
            application_id: None,
            secret: None,
            api_token: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ClientConfig {
    /// Load from environment variables.
    ///
    /// - `CFTOOLS_API_BASE_URL`
    /// - `CFTOOLS_SERVER_API_ID`
    /// - `CFTOOLS_APPLICATION_ID` / `CFTOOLS_SECRET`
    /// - `CFTOOLS_API_TOKEN`
    /// - `CFTOOLS_TIMEOUT_SECS`
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary variable source. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();
        Self {
            base_url: var("CFTOOLS_API_BASE_URL").unwrap_or(defaults.base_url),
            server_api_id: var("CFTOOLS_SERVER_API_ID").map(ServerApiId::of),
            application_id: var("CFTOOLS_APPLICATION_ID"),
            secret: var("CFTOOLS_SECRET"),
            api_token: var("CFTOOLS_API_TOKEN"),
            timeout: var("CFTOOLS_TIMEOUT_SECS")
                .and_then(|v| v.trim().parse::<u64>().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.timeout),
        }
    }

    /// Check if any credentials are configured.
    pub fn is_authenticated(&self) -> bool {
        self.api_token.is_some() || (self.application_id.is_some() && self.secret.is_some())
    }

    /// Credential provider for this configuration, if any.
    pub fn authorization_provider(&self) -> Option<Arc<dyn AuthorizationProvider>> {
        if let Some(token) = &self.api_token {
            return Some(Arc::new(StaticTokenProvider::new(token.clone())));
        }
        match (&self.application_id, &self.secret) {
            (Some(application_id), Some(secret)) => Some(Arc::new(
                ApplicationAuthorizationProvider::new(ApplicationCredentials {
                    application_id: application_id.clone(),
                    secret: secret.clone(),
                }),
            )),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> ClientConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ClientConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = config(&[]);

        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
        assert!(config.server_api_id.is_none());
        assert!(!config.is_authenticated());
        assert!(config.authorization_provider().is_none());
    }

    #[test]
    fn test_reads_every_variable() {
        let config = config(&[
            ("CFTOOLS_API_BASE_URL", "http://localhost:8080/"),
            ("CFTOOLS_SERVER_API_ID", "server-1"),
            ("CFTOOLS_APPLICATION_ID", "app"),
            ("CFTOOLS_SECRET", "secret"),
            ("CFTOOLS_TIMEOUT_SECS", "5"),
        ]);

        assert_eq!(config.base_url, "http://localhost:8080/");
        assert_eq!(config.server_api_id, Some(ServerApiId::of("server-1")));
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert!(config.is_authenticated());
        assert!(config.authorization_provider().is_some());
    }

    #[test]
    fn test_blank_and_invalid_values_fall_back() {
        let config = config(&[
            ("CFTOOLS_SERVER_API_ID", "  "),
            ("CFTOOLS_TIMEOUT_SECS", "soon"),
            ("CFTOOLS_APPLICATION_ID", "app"),
        ]);

        assert!(config.server_api_id.is_none());
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
        // An application id alone is not a credential.
        assert!(!config.is_authenticated());
        assert!(config.authorization_provider().is_none());
    }

    #[tokio::test]
    async fn test_static_token_takes_precedence() {
        use crate::network::mock::MockTransport;

        let config = config(&[
            ("CFTOOLS_API_TOKEN", "pre-issued"),
            ("CFTOOLS_APPLICATION_ID", "app"),
            ("CFTOOLS_SECRET", "secret"),
        ]);
        let transport = MockTransport::new();

        let provider = config.authorization_provider().unwrap();
        assert_eq!(provider.provide(&transport).await.unwrap(), "pre-issued");
        assert!(transport.requests().is_empty());
    }
}
