//! Warden Core
//!
//! Platform-agnostic domain types, store traits, and error handling for the
//! Warden account service.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `User`, `PublicUser`, `NewUser`, `UserPatch`, `Asset`
//! - **Store Traits**: `UserStore`, `AssetStore`
//! - **Error Handling**: Unified `WardenError` and `Result` types
//!
//! It performs no I/O. Storage backends live in `warden-storage`.
//!
//! # Example
//!
//! ```rust
//! use warden_core::types::{NewUser, UserId};
//!
//! let new_user = NewUser {
//!     username: "example123".to_string(),
//!     email: "example@gmail.com".to_string(),
//!     password_hash: "$2b$10$...".to_string(),
//!     first_name: Some("Bill".to_string()),
//!     last_name: Some("William".to_string()),
//! };
//! assert_eq!(new_user.username, "example123");
//!
//! let id = UserId::generate();
//! assert!(!id.as_str().is_empty());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod storage;
pub mod types;

pub use error::{Result, WardenError};
pub use storage::{AssetStore, UserStore};

pub use types::{
    Asset, AssetId, NewAsset, NewUser, ProfileFields, PublicUser, UniqueField, User, UserId,
    UserPatch,
};
