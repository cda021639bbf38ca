//! Token issuance with per-class signing secrets and TTLs.

use std::sync::Arc;

use chrono::Utc;
use jsonwebtoken::{EncodingKey, Header, encode};

use taskhub_core::account::Account;
use taskhub_core::config::auth::AuthConfig;
use taskhub_core::error::AppError;

use super::claims::{AccessClaims, RefreshClaims};
use crate::registry::RefreshTokenRegistry;

/// Creates signed access and refresh tokens.
///
/// Issuing a refresh token also registers it in the refresh-token
/// registry; from the caller's point of view issuance and registration
/// are a single step.
#[derive(Clone)]
pub struct TokenIssuer {
    /// HMAC key for access token signing.
    access_key: EncodingKey,
    /// HMAC key for refresh token signing.
    refresh_key: EncodingKey,
    /// Access token TTL in seconds.
    access_ttl_seconds: i64,
    /// Refresh token TTL in seconds.
    refresh_ttl_seconds: i64,
    /// Registry of currently-honored refresh tokens.
    registry: Arc<RefreshTokenRegistry>,
}

impl std::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("access_ttl_seconds", &self.access_ttl_seconds)
            .field("refresh_ttl_seconds", &self.refresh_ttl_seconds)
            .finish()
    }
}

impl TokenIssuer {
    /// Creates a new issuer from auth configuration.
    pub fn new(config: &AuthConfig, registry: Arc<RefreshTokenRegistry>) -> Self {
        Self {
            access_key: EncodingKey::from_secret(config.access_secret.as_bytes()),
            refresh_key: EncodingKey::from_secret(config.refresh_secret.as_bytes()),
            access_ttl_seconds: config.access_ttl_seconds as i64,
            refresh_ttl_seconds: config.refresh_ttl_seconds as i64,
            registry,
        }
    }

    /// The configured access token lifetime, as returned to clients in
    /// `expires_in`.
    pub fn access_ttl_seconds(&self) -> u64 {
        self.access_ttl_seconds as u64
    }

    /// Issues a signed access token for the given account.
    pub fn issue_access(&self, account: &Account) -> Result<String, AppError> {
        let now = Utc::now().timestamp();
        let claims = AccessClaims {
            id: account.id,
            email: account.email.clone(),
            role: account.role,
            iat: now,
            exp: now + self.access_ttl_seconds,
        };

        encode(&Header::default(), &claims, &self.access_key)
            .map_err(|e| AppError::internal(format!("Failed to encode access token: {e}")))
    }

    /// Issues a signed refresh token and registers it in the registry.
    pub fn issue_refresh(&self, account: &Account) -> Result<String, AppError> {
        let now = Utc::now().timestamp();
        let claims = RefreshClaims {
            id: account.id,
            email: account.email.clone(),
            iat: now,
            exp: now + self.refresh_ttl_seconds,
        };

        let token = encode(&Header::default(), &claims, &self.refresh_key)
            .map_err(|e| AppError::internal(format!("Failed to encode refresh token: {e}")))?;

        self.registry.add(&token);
        Ok(token)
    }
}
