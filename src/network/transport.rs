//! HTTP Transport
//!
//! The client never talks to an HTTP library directly. It builds an
//! [`ApiRequest`] and hands it to an [`HttpTransport`]. Connection handling,
//! TLS and timeouts all live behind this trait.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;
use thiserror::Error;
use tracing::debug;
use url::Url;

/// Default API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://data.cftools.cloud/";

/// HTTP verbs the API uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Method {
    /// GET
    Get,
    /// POST
    Post,
    /// DELETE
    Delete,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Delete => "DELETE",
        };
        f.write_str(name)
    }
}

/// A fully built API call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiRequest {
    /// HTTP verb.
    pub method: Method,
    /// Path relative to the base URL, e.g. `v1/users/lookup`.
    pub path: String,
    /// Query parameters in insertion order.
    pub query: Vec<(String, String)>,
    /// JSON body, already serialized.
    pub body: Option<String>,
    /// Bearer token, if the call is authenticated.
    pub authorization: Option<String>,
}

impl ApiRequest {
    /// Start a GET request.
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    /// Start a POST request.
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    /// Start a DELETE request.
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
            authorization: None,
        }
    }

    /// Append a query parameter.
    pub fn query(mut self, key: &str, value: impl Into<String>) -> Self {
        self.query.push((key.to_string(), value.into()));
        self
    }

    /// Set the JSON body.
    pub fn body(mut self, body: String) -> Self {
        self.body = Some(body);
        self
    }

    /// Attach a bearer token.
    pub fn authorization(mut self, token: String) -> Self {
        self.authorization = Some(token);
        self
    }

    /// Look up a query parameter by name.
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Transport failures.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The request could not be sent or the body could not be read.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Upstream answered with a non-success status.
    #[error("HTTP {status}: {body}")]
    Status {
        /// Status code.
        status: u16,
        /// Response body, as text.
        body: String,
    },

    /// Base URL and path did not form a valid URL.
    #[error("invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl TransportError {
    /// HTTP status, when the failure carries one.
    pub fn status(&self) -> Option<u16> {
        match self {
            TransportError::Status { status, .. } => Some(*status),
            TransportError::Request(err) => err.status().map(|s| s.as_u16()),
            TransportError::InvalidUrl(_) => None,
        }
    }
}

/// Something that can execute [`ApiRequest`]s.
///
/// Returns the raw response body on success. Non-success statuses are
/// errors. Implementations must not retry.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Execute a request and return the response body.
    async fn execute(&self, request: ApiRequest) -> Result<String, TransportError>;
}

/// [`HttpTransport`] backed by `reqwest`.
#[derive(Clone, Debug)]
pub struct ReqwestTransport {
    /// Base URL every path is joined onto (ends with `/`).
    base_url: Url,
    /// Shared connection pool.
    client: Client,
}

impl ReqwestTransport {
    /// Build a transport against `base_url` with a per-request timeout.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, TransportError> {
        let client = Client::builder().timeout(timeout).build()?;
        Self::with_client(base_url, client)
    }

    /// Build a transport around an existing `reqwest::Client`.
    pub fn with_client(base_url: &str, client: Client) -> Result<Self, TransportError> {
        let mut base = base_url.to_string();
        if !base.ends_with('/') {
            base.push('/');
        }
        Ok(Self {
            base_url: Url::parse(&base)?,
            client,
        })
    }

    /// Resolve a request path against the base URL.
    pub fn url_for(&self, request: &ApiRequest) -> Result<Url, TransportError> {
        let mut url = self.base_url.join(request.path.trim_start_matches('/'))?;
        if !request.query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(request.query.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        }
        Ok(url)
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn execute(&self, request: ApiRequest) -> Result<String, TransportError> {
        let url = self.url_for(&request)?;
        debug!(method = %request.method, path = %request.path, "sending request");

        let mut builder = match request.method {
            Method::Get => self.client.get(url),
            Method::Post => self.client.post(url),
            Method::Delete => self.client.delete(url),
        };
        if let Some(token) = &request.authorization {
            builder = builder.header(AUTHORIZATION, format!("Bearer {}", token));
        }
        if let Some(body) = request.body {
            builder = builder.header(CONTENT_TYPE, "application/json").body(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            debug!(status = status.as_u16(), path = %request.path, "request failed");
            return Err(TransportError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(body)
    }
}

// =============================================================================
// TESTS
// =============================================================================
