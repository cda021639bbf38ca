//! # taskhub-core
//!
//! Core crate for Taskhub. Contains configuration schemas, the account
//! entity, pagination types, and the unified error system.
//!
//! This crate has **no** internal dependencies on other Taskhub crates.

pub mod account;
pub mod config;
pub mod error;
pub mod pagination;

pub use account::{Account, PublicAccount, Role};
pub use error::{AppError, ErrorCode};
