//! Warden Server Library
//!
//! Account-management service: registration, login with bearer tokens,
//! profile updates and asset listing over HTTP.
//!
//! This library exposes the core components for testing purposes.

pub mod api;
pub mod config;
pub mod error;
pub mod services;
pub mod state;

// Re-export commonly used types for convenience
pub use api::router;
pub use config::ServerConfig;
pub use error::{Endpoint, Result, ServerError};
pub use services::{AssetService, CredentialHasher, IdentityService, TokenIssuer};
pub use state::AppState;
