//! Refresh-token registry — the process-wide revocation state.

use dashmap::DashSet;

/// Concurrency-safe set of currently-honored refresh tokens.
///
/// A refresh token is valid only while its raw signed string is a member
/// of this set. Tokens are added on issuance and removed on logout, on
/// verification failure, or by explicit administrative revocation.
///
/// The registry is constructor-injected into every component that needs
/// it; there is no ambient singleton. The in-memory backing store can be
/// swapped for a durable one without changing this contract.
#[derive(Debug, Default)]
pub struct RefreshTokenRegistry {
    tokens: DashSet<String>,
}

impl RefreshTokenRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a token. Re-adding an existing token is a no-op.
    pub fn add(&self, token: &str) {
        self.tokens.insert(token.to_string());
    }

    /// Returns whether the token is currently honored.
    pub fn contains(&self, token: &str) -> bool {
        self.tokens.contains(token)
    }

    /// Removes a token. Revoking an absent token is a no-op.
    pub fn revoke(&self, token: &str) {
        self.tokens.remove(token);
    }

    /// Number of currently-honored tokens.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Whether the registry holds no tokens.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}
