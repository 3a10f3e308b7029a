//! API key authentication middleware
//!
//! Validates the `X-API-KEY` header against the key configured at startup.
//! Applied to the production routes only.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use subtle::ConstantTimeEq;

use crate::error::ApiError;

/// Header carrying the shared secret
pub const API_KEY_HEADER: &str = "x-api-key";

/// Expected API key; `None` if the server has none configured
#[derive(Clone, Default)]
pub struct ApiKey(Option<Arc<str>>);

impl ApiKey {
    /// Empty keys count as not configured
    pub fn new(key: Option<String>) -> Self {
        Self(key.filter(|k| !k.is_empty()).map(Arc::from))
    }

    pub fn is_configured(&self) -> bool {
        self.0.is_some()
    }

    /// Constant-time comparison against the configured key
    fn matches(&self, provided: &str) -> bool {
        match &self.0 {
            Some(expected) => provided.as_bytes().ct_eq(expected.as_bytes()).into(),
            None => false,
        }
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let shown = if self.is_configured() {
            "<configured>"
        } else {
            "<unset>"
        };
        f.debug_tuple("ApiKey").field(&shown).finish()
    }
}

/// Axum middleware function that checks the API key.
///
/// Returns 500 if the server has no key configured, 401 if the header is
/// missing or does not match.
pub async fn require_api_key(
    State(api_key): State<ApiKey>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if !api_key.is_configured() {
        tracing::error!(
            path = %request.uri().path(),
            "API key not configured, rejecting protected request"
        );
        return Err(ApiError::Internal(
            "API key not configured on server".to_string(),
        ));
    }

    let provided = request
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty());

    match provided {
        Some(key) if api_key.matches(key) => Ok(next.run(request).await),
        Some(_) => {
            tracing::warn!(path = %request.uri().path(), "Invalid API key");
            Err(ApiError::Unauthorized("Invalid API key".to_string()))
        }
        None => {
            tracing::warn!(path = %request.uri().path(), "Missing X-API-KEY header");
            Err(ApiError::Unauthorized(
                "API key missing in X-API-KEY header".to_string(),
            ))
        }
    }
}
