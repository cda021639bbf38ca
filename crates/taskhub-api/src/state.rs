//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use taskhub_auth::jwt::TokenVerifier;
use taskhub_auth::service::AuthService;
use taskhub_core::config::AppConfig;

use crate::tasks::TaskBoard;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Server-side auth protocol (login / refresh / logout / profile).
    pub auth_service: Arc<AuthService>,
    /// Access token verifier used by the auth gateway extractors.
    pub verifier: Arc<TokenVerifier>,
    /// In-memory task board.
    pub tasks: Arc<TaskBoard>,
}
