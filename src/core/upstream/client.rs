//! Upstream HTTP client.

use serde_json::Value;
use tracing::{debug, instrument, warn};

use super::{UpstreamAuth, UpstreamError, UpstreamRequest, UpstreamResult};

/// Performs bounded outbound HTTP calls and decodes JSON responses.
///
/// Cloning is cheap: clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    http: reqwest::Client,
}

impl UpstreamClient {
    /// Create a new client.
    pub fn new() -> UpstreamResult<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| UpstreamError::transport(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { http })
    }

    /// Perform the call and decode the JSON body of a 2xx response.
    ///
    /// An empty 2xx body decodes to `null`. No retries are attempted.
    #[instrument(skip_all, fields(method = %request.method, url = %request.url))]
    pub async fn send(&self, request: UpstreamRequest) -> UpstreamResult<Value> {
        if let Some(reason) = request.invalid {
            warn!("Refusing to send malformed request: {}", reason);
            return Err(UpstreamError::InvalidRequest(reason));
        }

        let timeout = request.timeout;

        let mut builder = self
            .http
            .request(request.method, &request.url)
            .timeout(timeout);

        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        builder = match request.auth {
            Some(UpstreamAuth::Basic { username, password }) => {
                builder.basic_auth(username, Some(password))
            }
            Some(UpstreamAuth::Bearer(token)) => builder.bearer_auth(token),
            None => builder,
        };

        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| {
            let err = UpstreamError::from_reqwest(&e, timeout);
            warn!("Upstream call failed: {}", err);
            err
        })?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| UpstreamError::from_reqwest(&e, timeout))?;

        debug!("Upstream answered {} ({} bytes)", status, bytes.len());

        if !status.is_success() {
            warn!("Upstream returned HTTP {}", status.as_u16());
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&bytes).into_owned(),
            });
        }

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }

        serde_json::from_slice(&bytes).map_err(|e| {
            warn!("Upstream returned invalid JSON: {}", e);
            UpstreamError::transport(format!("Invalid JSON in upstream response: {}", e))
        })
    }
}
