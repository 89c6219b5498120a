//! Store traits for user accounts and assets

use crate::error::Result;
use crate::types::{Asset, NewAsset, NewUser, User, UserId, UserPatch};
use async_trait::async_trait;

/// Durable collection of user accounts
///
/// Implementations own the uniqueness invariant: `insert` and
/// `update_by_id` must fail with `WardenError::Duplicate` whenever the write
/// would leave two users sharing a username or an email, including when a
/// concurrent writer got there first.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Look a user up by login name
    async fn find_by_username(&self, username: &str) -> Result<Option<User>>;

    /// Look a user up by identifier
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>>;

    async fn exists_by_username(&self, username: &str) -> Result<bool>;

    async fn exists_by_email(&self, email: &str) -> Result<bool>;

    /// Persist a new user, assigning its id and creation time
    async fn insert(&self, user: NewUser) -> Result<User>;

    /// Apply a partial update; returns the number of matched rows (0 or 1)
    async fn update_by_id(&self, id: &UserId, patch: UserPatch) -> Result<u64>;

    /// Remove a user; returns the number of deleted rows (0 or 1)
    async fn delete_by_id(&self, id: &UserId) -> Result<u64>;

    /// Up to `limit` users in insertion order
    async fn list(&self, limit: u32) -> Result<Vec<User>>;
}

/// Read-mostly collection of assets
#[async_trait]
pub trait AssetStore: Send + Sync {
    /// Up to `limit` assets in insertion order
    async fn list_assets(&self, limit: u32) -> Result<Vec<Asset>>;

    async fn create_asset(&self, asset: NewAsset) -> Result<Asset>;
}
