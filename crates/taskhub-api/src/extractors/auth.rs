//! Auth gateway extractors — pull the bearer token from the Authorization
//! header, verify it, and inject the caller's identity into handlers.
//!
//! Pure verification: these extractors never touch the refresh-token
//! registry. Only the refresh exchange does.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use taskhub_auth::jwt::TokenError;
use taskhub_core::account::Role;
use taskhub_core::error::AppError;

use crate::error::ApiError;
use crate::state::AppState;

/// Identity of an authenticated caller, decoded from the access token.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// Account ID.
    pub id: i64,
    /// Login email.
    pub email: String,
    /// Role at token issuance time.
    pub role: Role,
}

/// Permissive variant of [`AuthUser`].
///
/// Carries the identity when a valid access token is present and `None`
/// otherwise; never rejects the request. Used by endpoints that behave
/// differently for anonymous and authenticated callers.
#[derive(Debug, Clone)]
pub struct MaybeAuthUser(pub Option<AuthUser>);

fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)
            .ok_or_else(|| AppError::no_token("Missing bearer token"))?;

        let claims = state.verifier.decode_access(token).map_err(|e| match e {
            TokenError::Expired => AppError::token_expired("Access token has expired"),
            TokenError::Invalid => AppError::invalid_token("Access token is invalid"),
        })?;

        Ok(AuthUser {
            id: claims.id,
            email: claims.email,
            role: claims.role,
        })
    }
}

impl FromRequestParts<AppState> for MaybeAuthUser {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let identity = bearer_token(parts)
            .and_then(|token| state.verifier.decode_access(token).ok())
            .map(|claims| AuthUser {
                id: claims.id,
                email: claims.email,
                role: claims.role,
            });

        Ok(MaybeAuthUser(identity))
    }
}
