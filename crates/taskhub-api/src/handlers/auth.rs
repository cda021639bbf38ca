//! Auth handlers — login, refresh, logout, me.

use axum::Json;
use axum::extract::State;

use taskhub_core::account::PublicAccount;

use crate::dto::request::{LoginRequest, LogoutRequest, RefreshRequest};
use crate::dto::response::{LoginResponse, MessageResponse, RefreshResponse};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let outcome = state.auth_service.login(&req.email, &req.password)?;

    Ok(Json(LoginResponse {
        user: outcome.user,
        access_token: outcome.access_token,
        refresh_token: outcome.refresh_token,
        expires_in: outcome.expires_in,
    }))
}

/// POST /api/auth/refresh
pub async fn refresh(
    State(state): State<AppState>,
    Json(req): Json<RefreshRequest>,
) -> Result<Json<RefreshResponse>, ApiError> {
    let outcome = state.auth_service.refresh(&req.refresh_token)?;

    Ok(Json(RefreshResponse {
        access_token: outcome.access_token,
        expires_in: outcome.expires_in,
    }))
}

/// POST /api/auth/logout — idempotent, always 200.
pub async fn logout(
    State(state): State<AppState>,
    Json(req): Json<LogoutRequest>,
) -> Json<MessageResponse> {
    state.auth_service.logout(req.refresh_token.as_deref());

    Json(MessageResponse {
        message: "Logged out".to_string(),
    })
}

/// GET /api/auth/me
pub async fn me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<PublicAccount>, ApiError> {
    Ok(Json(state.auth_service.profile(auth.id)?))
}
