//! Bearer-secret check for the scheduled job endpoint.

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use sha2::{Digest, Sha256};
use tracing::{debug, warn};

use crate::state::AppState;
use wms_shared::constants::CRON_BEARER_PREFIX;

/// Holds the SHA-256 digest of the configured secret. Without a secret
/// nothing is authorized.
#[derive(Debug, Clone, Default)]
pub struct CronAuth {
    expected_digest: Option<String>,
}

impl CronAuth {
    pub fn new(secret: Option<&str>) -> Self {
        Self {
            expected_digest: secret.filter(|s| !s.is_empty()).map(digest),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.expected_digest.is_some()
    }

    /// Check `Authorization: Bearer <secret>`.
    pub fn verify(&self, headers: &HeaderMap) -> bool {
        let Some(expected) = &self.expected_digest else {
            warn!("Cron secret is not configured; rejecting request");
            return false;
        };

        let presented = headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix(CRON_BEARER_PREFIX));

        match presented {
            Some(token) => digest(token) == *expected,
            None => false,
        }
    }
}

fn digest(secret: &str) -> String {
    hex::encode(Sha256::digest(secret.as_bytes()))
}

pub async fn require_cron_secret(State(state): State<AppState>, request: Request, next: Next) -> Response {
    if !state.cron_auth.verify(request.headers()) {
        warn!("Unauthorized scheduled job request");
        return (StatusCode::UNAUTHORIZED, Json(json!({ "error": "Unauthorized" }))).into_response();
    }

    debug!("Scheduled job request authorized");
    next.run(request).await
}
