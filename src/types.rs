use http::Method;
use serde::{Deserialize, Serialize};
use url::Url;

/// Content type for structured-document bodies (create/replace).
pub const LD_JSON: &str = "application/ld+json";

/// Content type for partial-update bodies.
pub const MERGE_PATCH_JSON: &str = "application/merge-patch+json";

/// Media types accepted in responses, attached to every request.
pub const ACCEPT_TYPES: &str = "application/json, application/ld+json";

/// A request body together with its fixed content type.
///
/// Content types are dictated by the operation (ld+json for create/replace,
/// merge-patch+json for partial updates), not configurable per call.
#[derive(Debug, Clone)]
pub struct RequestBody {
    pub content_type: &'static str,
    pub payload: serde_json::Value,
}

/// A full HTTP request specification, built by the resource client and
/// executed by the [`Transport`](crate::Transport).
///
/// Query pairs keep their insertion order; encoding happens at dispatch.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub url: Url,
    pub query: Vec<(String, String)>,
    pub body: Option<RequestBody>,
}

impl ApiRequest {
    pub fn get(url: Url) -> Self {
        Self::new(Method::GET, url)
    }

    pub fn post(url: Url) -> Self {
        Self::new(Method::POST, url)
    }

    pub fn put(url: Url) -> Self {
        Self::new(Method::PUT, url)
    }

    pub fn patch(url: Url) -> Self {
        Self::new(Method::PATCH, url)
    }

    pub fn delete(url: Url) -> Self {
        Self::new(Method::DELETE, url)
    }

    fn new(method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            query: Vec::new(),
            body: None,
        }
    }

    /// Append query pairs, preserving their order.
    pub fn with_params(mut self, params: &[(&str, &str)]) -> Self {
        self.query
            .extend(params.iter().map(|(k, v)| (k.to_string(), v.to_string())));
        self
    }

    /// Attach a JSON-serializable body with the given content type.
    pub fn with_body(
        mut self,
        content_type: &'static str,
        payload: &impl Serialize,
    ) -> Result<Self, serde_json::Error> {
        self.body = Some(RequestBody {
            content_type,
            payload: serde_json::to_value(payload)?,
        });
        Ok(self)
    }
}

/// HTTP response from a request
#[derive(Debug, Clone)]
pub struct ApiResponse {
    /// HTTP status code
    pub status: u16,

    /// Status text (e.g., "OK", "Not Found")
    pub status_text: String,

    /// Response body as JSON value
    /// Will be null if body was empty or not valid JSON
    pub body: serde_json::Value,
}

impl ApiResponse {
    /// Check if the response status indicates success (2xx)
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Try to deserialize the body into a specific type
    pub fn json<T: for<'de> Deserialize<'de>>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_value(self.body.clone())
    }
}
