//! HTTP transport: a wrapped reqwest client that attaches cross-cutting
//! headers to every outgoing request.
//!
//! The transport carries no base URL; resource clients own theirs and hand
//! fully-built URLs in, so cloning a transport across clients never shares
//! mutable configuration.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;
use tracing::{debug, warn};

use crate::error::Error;
use crate::types::{ApiRequest, ApiResponse, ACCEPT_TYPES};

/// Source of the bearer credential, resolved once per request.
///
/// Implemented for closures, so a session store or context value can be
/// plugged in directly:
///
/// ```ignore
/// let transport = Transport::new()
///     .with_token_provider(|| Some(session.access_token()));
/// ```
pub trait TokenProvider: Send + Sync {
    /// The current token, or `None` to send the request unauthenticated.
    fn token(&self) -> Option<String>;
}

impl<F> TokenProvider for F
where
    F: Fn() -> Option<String> + Send + Sync,
{
    fn token(&self) -> Option<String> {
        self()
    }
}

/// A fixed bearer token.
pub struct StaticToken(pub String);

impl TokenProvider for StaticToken {
    fn token(&self) -> Option<String> {
        Some(self.0.clone())
    }
}

/// HTTP transport for resource clients.
///
/// Every request it executes receives `Accept: application/json,
/// application/ld+json` and, when a token provider is configured,
/// `Authorization: Bearer <token>`. No retries, no response transformation;
/// network failures propagate unchanged.
#[derive(Clone, Default)]
pub struct Transport {
    client: Client,
    token: Option<Arc<dyn TokenProvider>>,
}

impl Transport {
    /// Create a transport with reqwest's default client.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a transport whose client enforces the given request timeout.
    ///
    /// This layer enforces no timeout of its own otherwise.
    pub fn with_timeout(timeout: Duration) -> Result<Self, Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            token: None,
        })
    }

    /// Attach a bearer credential source, resolved per request.
    pub fn with_token_provider(mut self, provider: impl TokenProvider + 'static) -> Self {
        self.token = Some(Arc::new(provider));
        self
    }

    /// Execute a request and convert the wire response.
    ///
    /// The body is read as text and parsed as JSON, falling back to `Null`
    /// when empty or not valid JSON (204 responses have no body).
    pub async fn execute(&self, request: &ApiRequest) -> Result<ApiResponse, Error> {
        debug!(method = %request.method, url = %request.url, "dispatching request");

        let mut builder = self
            .client
            .request(request.method.clone(), request.url.clone())
            .header(ACCEPT, ACCEPT_TYPES);

        if let Some(provider) = &self.token {
            if let Some(token) = provider.token() {
                builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
            }
        }

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }

        if let Some(body) = &request.body {
            builder = builder
                .header(CONTENT_TYPE, body.content_type)
                .body(serde_json::to_string(&body.payload)?);
        }

        let response = builder.send().await?;

        let status = response.status().as_u16();
        let status_text = response
            .status()
            .canonical_reason()
            .unwrap_or("Unknown")
            .to_string();

        if !response.status().is_success() {
            warn!(status, url = %request.url, "non-success response");
        }

        let body_text = response.text().await?;
        let body = serde_json::from_str(&body_text).unwrap_or(serde_json::Value::Null);

        Ok(ApiResponse {
            status,
            status_text,
            body,
        })
    }
}

impl fmt::Debug for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transport")
            .field("has_token_provider", &self.token.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_with_timeout() {
        let transport = Transport::with_timeout(Duration::from_secs(10));
        assert!(transport.is_ok());
    }

    #[test]
    fn static_token_provider() {
        let provider = StaticToken("abc123".to_string());
        assert_eq!(provider.token(), Some("abc123".to_string()));
    }

    #[test]
    fn closure_token_provider() {
        let provider = || Some("from-session".to_string());
        assert_eq!(TokenProvider::token(&provider), Some("from-session".to_string()));
    }

    #[test]
    fn absent_token_provider_is_debuggable() {
        let transport = Transport::new();
        assert!(format!("{transport:?}").contains("has_token_provider: false"));
    }
}
