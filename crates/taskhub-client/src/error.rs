//! Client-side error taxonomy.

use thiserror::Error;

use taskhub_core::error::ErrorCode;

/// Errors surfaced by the API client.
///
/// `Clone` because a renewal outcome is broadcast to every caller queued
/// behind the single in-flight refresh.
#[derive(Debug, Clone, Error)]
pub enum ClientError {
    /// The server rejected the request with a stable error code.
    #[error("API error {code}: {message}")]
    Api {
        /// Machine-readable code from the error body.
        code: ErrorCode,
        /// Human-readable message from the error body.
        message: String,
    },

    /// The session is gone: renewal failed or the credential was
    /// structurally bad. Stored credentials have been cleared; the caller
    /// must log in again. Not retryable.
    #[error("session expired, login required")]
    SessionExpired,

    /// Transport-level failure (connect, timeout, invalid response body).
    #[error("transport error: {0}")]
    Transport(String),
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}
