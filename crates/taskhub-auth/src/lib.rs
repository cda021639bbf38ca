//! # taskhub-auth
//!
//! Authentication core for Taskhub: token issuance and verification,
//! password hashing, the credential directory, the refresh-token registry,
//! and the auth service tying them together.
//!
//! ## Modules
//!
//! - `jwt` — access/refresh token creation and verification (two secrets)
//! - `password` — Argon2id password hashing
//! - `registry` — concurrency-safe set of currently-honored refresh tokens
//! - `directory` — account lookup and password checking
//! - `service` — login / refresh / logout / profile flows

pub mod directory;
pub mod jwt;
pub mod password;
pub mod registry;
pub mod service;

pub use directory::{CredentialStore, InMemoryDirectory};
pub use jwt::{AccessClaims, RefreshClaims, TokenError, TokenIssuer, TokenVerifier};
pub use password::PasswordHasher;
pub use registry::RefreshTokenRegistry;
pub use service::AuthService;
