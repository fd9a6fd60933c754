//! Bearer token authentication for the session routes.
//!
//! `/health` is always reachable without a token.

use axum::{
    body::Body,
    extract::{Request, State},
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::warn;

/// Environment variable holding the gateway token.
pub const API_KEY_ENV: &str = "NEWSDESK_API_KEY";

#[derive(Clone)]
pub struct ApiKeyConfig {
    key_bytes: Vec<u8>,
}

impl std::fmt::Debug for ApiKeyConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiKeyConfig").finish_non_exhaustive()
    }
}

impl ApiKeyConfig {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key_bytes: key.into().into_bytes(),
        }
    }

    /// Read the token from `NEWSDESK_API_KEY`, if set and non-empty.
    pub fn from_env() -> Option<Self> {
        std::env::var(API_KEY_ENV)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .map(Self::new)
    }

    /// Constant-time comparison.
    fn verify(&self, provided: &[u8]) -> bool {
        if self.key_bytes.len() != provided.len() {
            return false;
        }
        self.key_bytes
            .iter()
            .zip(provided)
            .fold(0u8, |acc, (a, b)| acc | (a ^ b))
            == 0
    }
}

#[derive(Debug, Serialize)]
struct AuthError {
    error: &'static str,
    code: &'static str,
}

fn unauthorized(error: &'static str, code: &'static str) -> Response {
    (StatusCode::UNAUTHORIZED, Json(AuthError { error, code })).into_response()
}

fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
}

/// Reject requests without the configured bearer token with 401.
pub async fn api_key_auth(
    State(config): State<ApiKeyConfig>,
    request: Request<Body>,
    next: Next,
) -> Response {
    if request.uri().path() == "/health" {
        return next.run(request).await;
    }

    match extract_bearer_token(request.headers()) {
        Some(token) if config.verify(token.as_bytes()) => next.run(request).await,
        Some(_) => {
            warn!("Invalid API key provided");
            unauthorized("Invalid API key", "INVALID_API_KEY")
        }
        None => {
            warn!("Missing Authorization header");
            unauthorized(
                "Missing or invalid Authorization header. Use: Authorization: Bearer <key>",
                "MISSING_API_KEY",
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_accepts_only_the_exact_key() {
        let config = ApiKeyConfig::new("desk-key-123");
        assert!(config.verify(b"desk-key-123"));
        assert!(!config.verify(b"desk-key-124"));
        assert!(!config.verify(b""));
        assert!(!config.verify(b"desk-key-123-longer"));
    }

    #[test]
    fn debug_hides_the_key() {
        let config = ApiKeyConfig::new("secret");
        assert!(!format!("{config:?}").contains("secret"));
    }

    #[test]
    fn bearer_token_extraction() {
        let mut headers = HeaderMap::new();
        assert_eq!(extract_bearer_token(&headers), None);

        headers.insert("authorization", "Basic dXNlcjpwYXNz".parse().unwrap());
        assert_eq!(extract_bearer_token(&headers), None);

        headers.insert("authorization", "Bearer my-secret-key".parse().unwrap());
        assert_eq!(extract_bearer_token(&headers), Some("my-secret-key"));
    }
}
