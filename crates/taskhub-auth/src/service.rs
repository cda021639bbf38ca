//! Auth service — login, refresh, logout, and profile flows.

use std::sync::Arc;

use tracing::{info, warn};

use taskhub_core::account::PublicAccount;
use taskhub_core::error::AppError;

use crate::directory::CredentialStore;
use crate::jwt::{TokenIssuer, TokenVerifier};
use crate::password::PasswordHasher;
use crate::registry::RefreshTokenRegistry;

/// Result of a successful login.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct LoginOutcome {
    /// The authenticated account, password-stripped.
    pub user: PublicAccount,
    /// Short-lived access token.
    pub access_token: String,
    /// Long-lived refresh token, registered in the registry.
    pub refresh_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: u64,
}

/// Result of a successful refresh exchange.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct RefreshOutcome {
    /// Newly issued access token.
    pub access_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: u64,
}

/// Server-side auth protocol: credential verification, token issuance,
/// refresh exchange, and revocation.
///
/// Every collaborator is constructor-injected so unit tests can swap in
/// fakes. The service never retries internally; each failure surfaces to
/// the caller with a stable error code.
#[derive(Clone)]
pub struct AuthService {
    store: Arc<dyn CredentialStore>,
    issuer: Arc<TokenIssuer>,
    verifier: Arc<TokenVerifier>,
    registry: Arc<RefreshTokenRegistry>,
    hasher: Arc<PasswordHasher>,
    /// Hash verified on unknown-email logins so the lookup-miss path costs
    /// the same as a wrong password.
    dummy_hash: String,
}

impl std::fmt::Debug for AuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthService").finish_non_exhaustive()
    }
}

impl AuthService {
    /// Creates a new auth service with all required dependencies.
    pub fn new(
        store: Arc<dyn CredentialStore>,
        issuer: Arc<TokenIssuer>,
        verifier: Arc<TokenVerifier>,
        registry: Arc<RefreshTokenRegistry>,
        hasher: Arc<PasswordHasher>,
    ) -> Result<Self, AppError> {
        let dummy_hash = hasher.hash_password("dummy-timing-equalizer")?;
        Ok(Self {
            store,
            issuer,
            verifier,
            registry,
            hasher,
            dummy_hash,
        })
    }

    /// Performs the login flow:
    ///
    /// 1. Validate both fields are present
    /// 2. Look up the account and verify the password
    /// 3. Issue an access + refresh token pair
    ///
    /// Unknown email and wrong password are indistinguishable to the
    /// caller, in returned detail and in timing.
    pub fn login(&self, email: &str, password: &str) -> Result<LoginOutcome, AppError> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(AppError::missing_credentials(
                "Email and password are required",
            ));
        }

        let account = self.store.find_by_email(email);

        let password_valid = match &account {
            Some(account) => self
                .hasher
                .verify_password(password, &account.password_hash)?,
            None => {
                // Burn the same hash cost as the found-account path.
                let _ = self.hasher.verify_password(password, &self.dummy_hash)?;
                false
            }
        };

        let Some(account) = account.filter(|_| password_valid) else {
            warn!(email, "Login rejected");
            return Err(AppError::invalid_credentials("Invalid email or password"));
        };

        let access_token = self.issuer.issue_access(&account)?;
        let refresh_token = self.issuer.issue_refresh(&account)?;

        info!(account_id = account.id, "Login successful");

        Ok(LoginOutcome {
            user: account.to_public(),
            access_token,
            refresh_token,
            expires_in: self.issuer.access_ttl_seconds(),
        })
    }

    /// Exchanges a refresh token for a new access token.
    ///
    /// The registry membership check runs *before* cryptographic
    /// verification so that logged-out or administratively revoked tokens
    /// are rejected even when their signature is still valid. A token that
    /// fails verification is revoked from the registry so it cannot be
    /// retried indefinitely. The refresh token itself is not rotated; it
    /// remains valid until its own expiry or explicit logout.
    pub fn refresh(&self, refresh_token: &str) -> Result<RefreshOutcome, AppError> {
        if refresh_token.is_empty() {
            return Err(AppError::no_refresh_token("Refresh token is required"));
        }

        if !self.registry.contains(refresh_token) {
            return Err(AppError::invalid_refresh_token(
                "Refresh token is invalid or has been revoked",
            ));
        }

        let claims = match self.verifier.decode_refresh(refresh_token) {
            Ok(claims) => claims,
            Err(e) => {
                // The token can no longer be trusted; drop it.
                self.registry.revoke(refresh_token);
                warn!(error = %e, "Refresh token failed verification, revoked");
                return Err(AppError::refresh_token_expired("Refresh token has expired"));
            }
        };

        let account = self
            .store
            .find_by_id(claims.id)
            .ok_or_else(|| AppError::not_found("Account no longer exists"))?;

        let access_token = self.issuer.issue_access(&account)?;

        info!(account_id = account.id, "Access token refreshed");

        Ok(RefreshOutcome {
            access_token,
            expires_in: self.issuer.access_ttl_seconds(),
        })
    }

    /// Revokes a refresh token. Idempotent; never fails.
    pub fn logout(&self, refresh_token: Option<&str>) {
        if let Some(token) = refresh_token {
            self.registry.revoke(token);
            info!("Refresh token revoked on logout");
        }
    }

    /// Returns the password-stripped profile for an account id.
    pub fn profile(&self, id: i64) -> Result<PublicAccount, AppError> {
        self.store
            .find_by_id(id)
            .map(|account| account.to_public())
            .ok_or_else(|| AppError::not_found("Account not found"))
    }

    /// Updates the display name and/or avatar of an account.
    pub fn update_profile(
        &self,
        id: i64,
        name: Option<String>,
        avatar: Option<String>,
    ) -> Result<PublicAccount, AppError> {
        self.store
            .update_profile(id, name, avatar)
            .map(|account| account.to_public())
            .ok_or_else(|| AppError::not_found("Account not found"))
    }

    /// Returns all accounts, password-stripped.
    pub fn list_accounts(&self) -> Vec<PublicAccount> {
        self.store
            .list()
            .iter()
            .map(|account| account.to_public())
            .collect()
    }
}
