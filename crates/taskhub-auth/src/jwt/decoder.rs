//! Token verification with the expired/invalid distinction.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::de::DeserializeOwned;
use thiserror::Error;

use taskhub_core::config::auth::AuthConfig;

use super::claims::{AccessClaims, RefreshClaims};

/// Why a token failed verification.
///
/// The distinction is load-bearing: an expired access token sends the
/// client into the renewal protocol, while an invalid one tears the
/// session down immediately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenError {
    /// Signature and structure verified but the expiry has passed.
    #[error("token has expired")]
    Expired,
    /// Malformed token or signature mismatch.
    #[error("token is invalid")]
    Invalid,
}

/// Verifies access and refresh tokens against their respective secrets.
#[derive(Clone)]
pub struct TokenVerifier {
    /// HMAC key for access token verification.
    access_key: DecodingKey,
    /// HMAC key for refresh token verification.
    refresh_key: DecodingKey,
    /// Validation configuration (shared by both classes).
    validation: Validation,
}

impl std::fmt::Debug for TokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenVerifier")
            .field("validation", &self.validation)
            .finish()
    }
}

impl TokenVerifier {
    /// Creates a new verifier from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 5; // 5 seconds leeway for clock skew
        validation.required_spec_claims.clear();

        Self {
            access_key: DecodingKey::from_secret(config.access_secret.as_bytes()),
            refresh_key: DecodingKey::from_secret(config.refresh_secret.as_bytes()),
            validation,
        }
    }

    /// Decodes and validates an access token string.
    pub fn decode_access(&self, token: &str) -> Result<AccessClaims, TokenError> {
        self.decode_with_key(token, &self.access_key)
    }

    /// Decodes and validates a refresh token string.
    pub fn decode_refresh(&self, token: &str) -> Result<RefreshClaims, TokenError> {
        self.decode_with_key(token, &self.refresh_key)
    }

    fn decode_with_key<C: DeserializeOwned>(
        &self,
        token: &str,
        key: &DecodingKey,
    ) -> Result<C, TokenError> {
        decode::<C>(token, key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid,
            })
    }
}
