//! Maps domain `AppError` to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use taskhub_core::error::{AppError, ErrorCode};

/// Newtype carrying `AppError` across the Axum response boundary.
///
/// Handlers return `Result<_, ApiError>`; `?` on any `AppError` converts
/// automatically.
#[derive(Debug, Clone)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

/// Standard API error response body: `{error, code}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorBody {
    /// Human-readable message.
    pub error: String,
    /// Machine-readable error code.
    pub code: ErrorCode,
}

/// Status code for each error code, per the protocol contract.
pub fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::MissingCredentials | ErrorCode::NoRefreshToken | ErrorCode::Validation => {
            StatusCode::BAD_REQUEST
        }
        ErrorCode::InvalidCredentials | ErrorCode::NoToken | ErrorCode::TokenExpired => {
            StatusCode::UNAUTHORIZED
        }
        ErrorCode::InvalidToken
        | ErrorCode::InvalidRefreshToken
        | ErrorCode::RefreshTokenExpired
        | ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Internal | ErrorCode::Configuration => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = status_for(self.0.code);

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self.0.message, "Internal server error");
        }

        let body = ApiErrorBody {
            error: self.0.message,
            code: self.0.code,
        };

        (status, Json(body)).into_response()
    }
}
