//! User handlers — profile update, admin account listing.

use axum::Json;
use axum::extract::State;
use validator::Validate;

use taskhub_core::account::PublicAccount;
use taskhub_core::error::AppError;

use crate::dto::request::UpdateProfileRequest;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::middleware::rbac::require_admin;
use crate::state::AppState;

/// PUT /api/users/me
pub async fn update_me(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<Json<PublicAccount>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let updated = state
        .auth_service
        .update_profile(auth.id, req.name, req.avatar)?;

    Ok(Json(updated))
}

/// GET /api/users — admin only.
pub async fn list_users(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<PublicAccount>>, ApiError> {
    require_admin(&auth)?;
    Ok(Json(state.auth_service.list_accounts()))
}
