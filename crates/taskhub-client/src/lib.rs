//! # taskhub-client
//!
//! HTTP client for the Taskhub API with transparent session renewal.
//!
//! Every protected call attaches the stored access token. When a response
//! reports an expired token, the client runs a single-flight renewal:
//! concurrent callers queue behind one `/auth/refresh` request, observe
//! its single outcome, and each retries its original call at most once.
//! Any other auth failure tears the session down.

pub mod api;
pub mod error;
pub mod renewal;
pub mod tokens;

pub use api::ApiClient;
pub use error::ClientError;
pub use renewal::RenewalCoordinator;
pub use tokens::{SessionTokens, TokenStore};
