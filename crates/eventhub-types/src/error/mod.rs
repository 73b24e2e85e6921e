//! Typed error definitions for EventHub.
//!
//! [`ApiError`] is the single normalized shape every failed gateway call
//! resolves to. [`ConfigError`] covers startup configuration problems.

mod api;
mod config;

pub use api::ApiError;
pub use config::ConfigError;

/// Standard Result type for gateway operations.
pub type Result<T> = std::result::Result<T, ApiError>;
