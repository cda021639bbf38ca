//! Client-side credential storage.

use std::sync::RwLock;

/// The access/refresh token pair held for one session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionTokens {
    /// Current access token.
    pub access_token: String,
    /// Refresh token exchanged when the access token expires.
    pub refresh_token: String,
}

/// Thread-safe store for the current session's tokens.
///
/// `clear` reports whether it actually removed a session, so the
/// logged-out transition can be observed exactly once even when several
/// failures race.
#[derive(Debug, Default)]
pub struct TokenStore {
    inner: RwLock<Option<SessionTokens>>,
}

impl TokenStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores both tokens after login.
    pub fn set(&self, tokens: SessionTokens) {
        *self.inner.write().unwrap_or_else(|e| e.into_inner()) = Some(tokens);
    }

    /// Replaces only the access token after a successful renewal.
    /// No-op when the session has already been cleared.
    pub fn set_access_token(&self, access_token: String) {
        if let Some(tokens) = self.inner.write().unwrap_or_else(|e| e.into_inner()).as_mut() {
            tokens.access_token = access_token;
        }
    }

    /// Returns the current access token.
    pub fn access_token(&self) -> Option<String> {
        self.inner
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .as_ref()
            .map(|t| t.access_token.clone())
    }

    /// Returns the current refresh token.
    pub fn refresh_token(&self) -> Option<String> {
        self.inner
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .as_ref()
            .map(|t| t.refresh_token.clone())
    }

    /// Whether a session is currently stored.
    pub fn is_authenticated(&self) -> bool {
        self.inner
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .is_some()
    }

    /// Clears the stored session. Returns `true` only for the call that
    /// actually removed it.
    pub fn clear(&self) -> bool {
        self.inner
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .take()
            .is_some()
    }
}
