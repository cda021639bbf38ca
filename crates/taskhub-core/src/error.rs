//! Unified application error types for Taskhub.
//!
//! All crates map their internal errors into [`AppError`] for consistent
//! propagation through the ? operator. The [`ErrorCode`] is the stable,
//! machine-readable code surfaced to API clients; clients branch on it
//! (notably `TOKEN_EXPIRED`, the only recoverable auth failure).

use std::fmt;
use thiserror::Error;

/// Stable error codes surfaced in every API error body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Login called without an email or password.
    MissingCredentials,
    /// Unknown email or wrong password (deliberately indistinguishable).
    InvalidCredentials,
    /// Protected request carried no bearer token.
    NoToken,
    /// The access token verified but its expiry has passed.
    TokenExpired,
    /// The access token is malformed or its signature does not verify.
    InvalidToken,
    /// Refresh called without a token string.
    NoRefreshToken,
    /// The refresh token is not present in the registry (logged out or revoked).
    InvalidRefreshToken,
    /// The refresh token failed signature/expiry verification.
    RefreshTokenExpired,
    /// The requested resource does not exist.
    NotFound,
    /// The caller's role does not permit the operation.
    Forbidden,
    /// Request body validation failed.
    Validation,
    /// An internal server error occurred.
    Internal,
    /// A configuration error occurred.
    Configuration,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingCredentials => write!(f, "MISSING_CREDENTIALS"),
            Self::InvalidCredentials => write!(f, "INVALID_CREDENTIALS"),
            Self::NoToken => write!(f, "NO_TOKEN"),
            Self::TokenExpired => write!(f, "TOKEN_EXPIRED"),
            Self::InvalidToken => write!(f, "INVALID_TOKEN"),
            Self::NoRefreshToken => write!(f, "NO_REFRESH_TOKEN"),
            Self::InvalidRefreshToken => write!(f, "INVALID_REFRESH_TOKEN"),
            Self::RefreshTokenExpired => write!(f, "REFRESH_TOKEN_EXPIRED"),
            Self::NotFound => write!(f, "NOT_FOUND"),
            Self::Forbidden => write!(f, "FORBIDDEN"),
            Self::Validation => write!(f, "VALIDATION"),
            Self::Internal => write!(f, "INTERNAL"),
            Self::Configuration => write!(f, "CONFIGURATION"),
        }
    }
}

/// The unified application error used throughout Taskhub.
///
/// Crate-specific errors are mapped into `AppError` using `From` impls or
/// explicit `.map_err()` calls, giving a single error type at the
/// application boundary.
#[derive(Debug, Error)]
#[error("{code}: {message}")]
pub struct AppError {
    /// The stable error code.
    pub code: ErrorCode,
    /// A human-readable error message.
    pub message: String,
    /// Optional underlying cause.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new application error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Create a new application error with an underlying cause.
    pub fn with_source(
        code: ErrorCode,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            code,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a missing-credentials error.
    pub fn missing_credentials(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::MissingCredentials, message)
    }

    /// Create an invalid-credentials error.
    pub fn invalid_credentials(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidCredentials, message)
    }

    /// Create a no-token error.
    pub fn no_token(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NoToken, message)
    }

    /// Create a token-expired error.
    pub fn token_expired(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::TokenExpired, message)
    }

    /// Create an invalid-token error.
    pub fn invalid_token(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidToken, message)
    }

    /// Create a no-refresh-token error.
    pub fn no_refresh_token(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NoRefreshToken, message)
    }

    /// Create an invalid-refresh-token error.
    pub fn invalid_refresh_token(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRefreshToken, message)
    }

    /// Create a refresh-token-expired error.
    pub fn refresh_token_expired(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::RefreshTokenExpired, message)
    }

    /// Create a not-found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Create a forbidden error.
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Forbidden, message)
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Validation, message)
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Internal, message)
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Configuration, message)
    }
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        Self {
            code: self.code,
            message: self.message.clone(),
            source: None,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(
            ErrorCode::Internal,
            format!("JSON serialization error: {err}"),
            err,
        )
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(
            ErrorCode::Configuration,
            format!("Configuration error: {err}"),
            err,
        )
    }
}
