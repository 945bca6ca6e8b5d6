//! Outbound request description.

use std::time::Duration;

use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

/// Authorization attached to an outbound request.
#[derive(Clone)]
pub enum UpstreamAuth {
    Basic { username: String, password: String },
    Bearer(String),
}

impl std::fmt::Debug for UpstreamAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Basic { username, .. } => f
                .debug_struct("Basic")
                .field("username", username)
                .field("password", &"[REDACTED]")
                .finish(),
            Self::Bearer(_) => f.debug_tuple("Bearer").field(&"[REDACTED]").finish(),
        }
    }
}

/// A single outbound HTTP call.
///
/// Every constructor takes the timeout, so no request can be built without one.
#[derive(Debug, Clone)]
pub struct UpstreamRequest {
    pub(super) method: Method,
    pub(super) url: String,
    pub(super) headers: Vec<(String, String)>,
    pub(super) auth: Option<UpstreamAuth>,
    pub(super) body: Option<Value>,
    pub(super) timeout: Duration,
    /// Set when a builder step failed; the client refuses to send.
    pub(super) invalid: Option<String>,
}

impl UpstreamRequest {
    /// Create a request with an explicit method.
    pub fn new(method: Method, url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Vec::new(),
            auth: None,
            body: None,
            timeout,
            invalid: None,
        }
    }

    pub fn get(url: impl Into<String>, timeout: Duration) -> Self {
        Self::new(Method::GET, url, timeout)
    }

    pub fn post(url: impl Into<String>, timeout: Duration) -> Self {
        Self::new(Method::POST, url, timeout)
    }

    /// Append URL-encoded query parameters.
    ///
    /// Parameters that do not encode as key/value pairs poison the request:
    /// [`UpstreamClient::send`](super::UpstreamClient::send) rejects it
    /// instead of sending it without its query.
    pub fn query<T: Serialize + ?Sized>(mut self, params: &T) -> Self {
        match serde_urlencoded::to_string(params) {
            Ok(encoded) if !encoded.is_empty() => {
                let separator = if self.url.contains('?') { '&' } else { '?' };
                self.url = format!("{}{}{}", self.url, separator, encoded);
            }
            Ok(_) => {}
            Err(e) => {
                self.invalid = Some(format!("Failed to encode query parameters: {}", e));
            }
        }
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Attach optional credentials.
    pub fn auth(mut self, auth: Option<UpstreamAuth>) -> Self {
        self.auth = auth;
        self
    }

    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}
