//! Application builder — wires router + middleware + state into an Axum app.

use std::sync::Arc;

use axum::{Router, middleware as axum_middleware};
use tower_http::trace::TraceLayer;

use taskhub_auth::directory::InMemoryDirectory;
use taskhub_auth::jwt::{TokenIssuer, TokenVerifier};
use taskhub_auth::password::PasswordHasher;
use taskhub_auth::registry::RefreshTokenRegistry;
use taskhub_auth::service::AuthService;
use taskhub_core::config::AppConfig;
use taskhub_core::error::AppError;

use crate::middleware::cors::build_cors_layer;
use crate::middleware::logging::request_logging;
use crate::router::build_router;
use crate::state::AppState;
use crate::tasks::TaskBoard;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    let cors = build_cors_layer(&state.config.cors);

    build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(request_logging))
}

/// Constructs the application state from configuration: hasher, seeded
/// credential directory, refresh-token registry, token issuer/verifier,
/// auth service, and the demo task board.
pub fn build_state(config: AppConfig) -> Result<AppState, AppError> {
    let hasher = Arc::new(PasswordHasher::new());
    let directory = Arc::new(InMemoryDirectory::with_demo_accounts(&hasher)?);
    let registry = Arc::new(RefreshTokenRegistry::new());
    let issuer = Arc::new(TokenIssuer::new(&config.auth, Arc::clone(&registry)));
    let verifier = Arc::new(TokenVerifier::new(&config.auth));
    let auth_service = Arc::new(AuthService::new(
        directory,
        issuer,
        Arc::clone(&verifier),
        registry,
        hasher,
    )?);

    Ok(AppState {
        config: Arc::new(config),
        auth_service,
        verifier,
        tasks: Arc::new(TaskBoard::with_demo_tasks()),
    })
}
