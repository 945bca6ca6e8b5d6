//! HTTP Basic authentication gate.
//!
//! Every inbound request passes through [`require_basic_auth`] before it can
//! reach the JSON-RPC endpoint. The configured health path is forwarded
//! without looking at credentials. Everything else needs
//! `Authorization: Basic base64(username:password)` matching the configured
//! pair exactly; any other request gets the same 401 challenge, whatever
//! the reason, so clients cannot probe which part was wrong.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Request, State},
    http::{HeaderValue, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use base64::{Engine, engine::general_purpose::STANDARD};
use subtle::ConstantTimeEq;
use thiserror::Error;
use tracing::{debug, warn};

use crate::core::config::{AuthConfig, BasicCredentials};
use crate::core::error::{Error, Result};
use crate::domains::tools::ErrorKind;

const BASIC_SCHEME: &str = "Basic ";

/// Generic message returned for every rejected request.
pub const UNAUTHORIZED_MESSAGE: &str = "Unauthorized";

/// Why a request was rejected. Logged, never sent to the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthRejection {
    #[error("missing Authorization header")]
    MissingHeader,

    #[error("authorization scheme is not Basic")]
    WrongScheme,

    #[error("credentials are not valid base64 UTF-8")]
    InvalidEncoding,

    #[error("decoded credentials have no ':' separator")]
    MissingSeparator,

    #[error("credentials do not match")]
    Mismatch,
}

/// The credential gate.
#[derive(Debug, Clone)]
pub struct BasicAuthGate {
    credentials: BasicCredentials,
    bypass_path: String,
    challenge: HeaderValue,
}

impl BasicAuthGate {
    /// Build a gate for one credential pair and one bypass path.
    pub fn new(auth: &AuthConfig, bypass_path: impl Into<String>) -> Result<Self> {
        if auth.credentials.username.is_empty() || auth.credentials.password.is_empty() {
            return Err(Error::config("gateway username and password must not be empty"));
        }

        let challenge = HeaderValue::from_str(&format!("Basic realm=\"{}\"", auth.realm))
            .map_err(|e| Error::config(format!("invalid auth realm: {}", e)))?;

        Ok(Self {
            credentials: auth.credentials.clone(),
            bypass_path: bypass_path.into(),
            challenge,
        })
    }

    /// Whether `path` skips authentication.
    pub fn is_bypass(&self, path: &str) -> bool {
        path == self.bypass_path
    }

    /// Check a raw `Authorization` header value.
    pub fn verify(&self, header: Option<&HeaderValue>) -> std::result::Result<(), AuthRejection> {
        let header = header.ok_or(AuthRejection::MissingHeader)?;
        let header = header.to_str().map_err(|_| AuthRejection::InvalidEncoding)?;
        let encoded = header
            .strip_prefix(BASIC_SCHEME)
            .ok_or(AuthRejection::WrongScheme)?;

        let decoded = STANDARD
            .decode(encoded)
            .map_err(|_| AuthRejection::InvalidEncoding)?;
        let decoded = String::from_utf8(decoded).map_err(|_| AuthRejection::InvalidEncoding)?;

        let (username, password) = decoded
            .split_once(':')
            .ok_or(AuthRejection::MissingSeparator)?;

        // Evaluate both comparisons so timing does not reveal which one failed.
        let username_ok = username
            .as_bytes()
            .ct_eq(self.credentials.username.as_bytes());
        let password_ok = password
            .as_bytes()
            .ct_eq(self.credentials.password.as_bytes());

        if bool::from(username_ok & password_ok) {
            Ok(())
        } else {
            Err(AuthRejection::Mismatch)
        }
    }

    /// The 401 response sent for every rejection.
    pub fn challenge(&self) -> Response {
        (
            StatusCode::UNAUTHORIZED,
            [(header::WWW_AUTHENTICATE, self.challenge.clone())],
            Json(serde_json::json!({ "error": UNAUTHORIZED_MESSAGE })),
        )
            .into_response()
    }
}

/// Axum middleware enforcing the gate.
pub async fn require_basic_auth(
    State(gate): State<Arc<BasicAuthGate>>,
    request: Request,
    next: Next,
) -> Response {
    if gate.is_bypass(request.uri().path()) {
        return next.run(request).await;
    }

    match gate.verify(request.headers().get(header::AUTHORIZATION)) {
        Ok(()) => {
            debug!("Request authenticated");
            next.run(request).await
        }
        Err(reason) => {
            warn!(
                kind = ?ErrorKind::AuthRejected,
                method = %request.method(),
                path = %request.uri().path(),
                "Rejected request: {}",
                reason
            );
            gate.challenge()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, body::Body, middleware, routing::get};
    use tower::ServiceExt;

    fn auth_config() -> AuthConfig {
        AuthConfig {
            credentials: BasicCredentials {
                username: "right".to_string(),
                password: "right".to_string(),
            },
            realm: "MCP Server".to_string(),
        }
    }

    fn gate() -> BasicAuthGate {
        BasicAuthGate::new(&auth_config(), "/").unwrap()
    }

    fn basic(raw: &str) -> HeaderValue {
        HeaderValue::from_str(&format!("Basic {}", STANDARD.encode(raw))).unwrap()
    }

    fn app() -> Router {
        Router::new()
            .route("/", get(|| async { "health" }))
            .route("/mcp", get(|| async { "protected" }))
            .layer(middleware::from_fn_with_state(
                Arc::new(gate()),
                require_basic_auth,
            ))
    }

    async fn send(path: &str, authorization: Option<HeaderValue>) -> Response {
        let mut request = axum::http::Request::builder().uri(path);
        if let Some(value) = authorization {
            request = request.header(header::AUTHORIZATION, value);
        }
        app()
            .oneshot(request.body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    #[test]
    fn test_verify_accepts_exact_match() {
        assert_eq!(gate().verify(Some(&basic("right:right"))), Ok(()));
    }

    #[test]
    fn test_verify_password_may_contain_colon() {
        let config = AuthConfig {
            credentials: BasicCredentials {
                username: "user".to_string(),
                password: "pa:ss".to_string(),
            },
            realm: "r".to_string(),
        };
        let gate = BasicAuthGate::new(&config, "/").unwrap();
        assert_eq!(gate.verify(Some(&basic("user:pa:ss"))), Ok(()));
    }

    #[test]
    fn test_verify_rejections() {
        let gate = gate();
        assert_eq!(gate.verify(None), Err(AuthRejection::MissingHeader));
        assert_eq!(
            gate.verify(Some(&HeaderValue::from_static("Bearer abc"))),
            Err(AuthRejection::WrongScheme)
        );
        assert_eq!(
            gate.verify(Some(&HeaderValue::from_static("basic cmlnaHQ6cmlnaHQ="))),
            Err(AuthRejection::WrongScheme)
        );
        assert_eq!(
            gate.verify(Some(&HeaderValue::from_static("Basic !!!not-base64!!!"))),
            Err(AuthRejection::InvalidEncoding)
        );
        assert_eq!(
            gate.verify(Some(&basic("rightright"))),
            Err(AuthRejection::MissingSeparator)
        );
        assert_eq!(
            gate.verify(Some(&basic("right:wrong"))),
            Err(AuthRejection::Mismatch)
        );
        assert_eq!(
            gate.verify(Some(&basic("wrong:right"))),
            Err(AuthRejection::Mismatch)
        );
        assert_eq!(
            gate.verify(Some(&basic("right:right "))),
            Err(AuthRejection::Mismatch)
        );
        assert_eq!(gate.verify(Some(&basic(":"))), Err(AuthRejection::Mismatch));
    }

    #[test]
    fn test_new_rejects_empty_credentials() {
        let mut config = auth_config();
        config.credentials.username = String::new();
        assert!(BasicAuthGate::new(&config, "/").is_err());
    }

    #[tokio::test]
    async fn test_missing_header_gets_challenge() {
        let response = send("/mcp", None).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.headers()[header::WWW_AUTHENTICATE],
            "Basic realm=\"MCP Server\""
        );
    }

    #[tokio::test]
    async fn test_valid_credentials_are_forwarded() {
        let response = send("/mcp", Some(basic("right:right"))).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_every_rejection_has_identical_body() {
        let mut bodies = Vec::new();
        for authorization in [
            None,
            Some(basic("right:wrong")),
            Some(HeaderValue::from_static("Basic %%%")),
            Some(basic("no-colon")),
            Some(HeaderValue::from_static("Digest x")),
        ] {
            let response = send("/mcp", authorization).await;
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
            assert!(response.headers().contains_key(header::WWW_AUTHENTICATE));
            let body = axum::body::to_bytes(response.into_body(), usize::MAX)
                .await
                .unwrap();
            bodies.push(body);
        }

        let expected = serde_json::to_vec(&serde_json::json!({ "error": "Unauthorized" })).unwrap();
        assert!(bodies.iter().all(|b| b.as_ref() == expected.as_slice()));
    }

    #[tokio::test]
    async fn test_bypass_path_ignores_credentials() {
        for authorization in [
            None,
            Some(basic("right:wrong")),
            Some(HeaderValue::from_static("Basic %%%")),
        ] {
            let response = send("/", authorization).await;
            assert_eq!(response.status(), StatusCode::OK);
        }
    }

    #[tokio::test]
    async fn test_unknown_path_requires_auth() {
        let response = send("/admin", None).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = send("/admin", Some(basic("right:right"))).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
