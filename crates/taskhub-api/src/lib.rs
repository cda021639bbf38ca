//! # taskhub-api
//!
//! HTTP API layer for Taskhub built on Axum.
//!
//! Provides the auth endpoints (login, refresh, logout), the protected
//! task/user endpoints that exercise them, middleware (CORS, request
//! logging, role gate), extractors, DTOs, and error mapping.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;
pub mod tasks;

pub use app::build_app;
pub use state::AppState;
