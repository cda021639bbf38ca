//! Claims payloads embedded in access and refresh tokens.
//!
//! The two token classes carry different payloads and are signed with
//! independent secrets, so there is no `token_type` discriminator: a token
//! of one class simply fails signature verification against the other
//! class's key.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use taskhub_core::account::Role;

/// Payload of a short-lived access token.
///
/// Stateless: signature and expiry are sufficient to prove identity, no
/// registry lookup happens for access tokens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessClaims {
    /// Account ID.
    pub id: i64,
    /// Login email.
    pub email: String,
    /// Role at issuance time.
    pub role: Role,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
}

/// Payload of a long-lived refresh token.
///
/// Honored only while the raw token string is present in the
/// refresh-token registry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshClaims {
    /// Account ID.
    pub id: i64,
    /// Login email.
    pub email: String,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
}

impl AccessClaims {
    /// Remaining TTL in seconds (0 if expired).
    pub fn remaining_ttl_seconds(&self) -> u64 {
        let remaining = self.exp - Utc::now().timestamp();
        if remaining > 0 { remaining as u64 } else { 0 }
    }
}
