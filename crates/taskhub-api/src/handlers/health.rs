//! Health probe.

use axum::Json;
use serde::{Deserialize, Serialize};

use crate::extractors::MaybeAuthUser;

/// Health response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always "ok" while the process serves requests.
    pub status: String,
    /// Whether the probe carried a valid access token.
    pub authenticated: bool,
}

/// GET /api/health — public; reports whether the caller is authenticated
/// but never rejects anonymous probes.
pub async fn health(MaybeAuthUser(identity): MaybeAuthUser) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        authenticated: identity.is_some(),
    })
}
