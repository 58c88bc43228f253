//! API key authentication.
//!
//! Every `/organizations` route takes [`ApiKeyAuth`] as its first extractor,
//! so a missing or wrong key is rejected with 403 before any parameter is
//! looked at.

use std::sync::Arc;

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::ApiError;
use crate::state::AppState;

/// Proof that the request carried the configured API key.
#[derive(Debug, Clone, Copy)]
pub struct ApiKeyAuth;

#[async_trait]
impl FromRequestParts<Arc<AppState>> for ApiKeyAuth {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let provided = parts
            .headers
            .get(state.config.api_key_header.as_str())
            .and_then(|v| v.to_str().ok());

        if key_matches(provided, state.config.api_key.as_deref()) {
            Ok(Self)
        } else {
            tracing::debug!(path = %parts.uri.path(), "Rejected request without a valid API key");
            Err(ApiError::Forbidden)
        }
    }
}

/// Exact comparison; no configured key matches nothing.
fn key_matches(provided: Option<&str>, expected: Option<&str>) -> bool {
    matches!((provided, expected), (Some(provided), Some(expected)) if provided == expected)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_key_matches() {
        assert!(key_matches(Some("secret"), Some("secret")));
    }

    #[test]
    fn wrong_or_missing_key_fails() {
        assert!(!key_matches(Some("Secret"), Some("secret")));
        assert!(!key_matches(Some(" secret"), Some("secret")));
        assert!(!key_matches(None, Some("secret")));
    }

    #[test]
    fn unconfigured_key_rejects_everything() {
        assert!(!key_matches(Some(""), None));
        assert!(!key_matches(None, None));
    }
}
