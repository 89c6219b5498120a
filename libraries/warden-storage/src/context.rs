use crate::{assets, users, StorageError};
use async_trait::async_trait;
use warden_core::{
    error::Result,
    storage::{AssetStore, UserStore},
    types::*,
};
use sqlx::SqlitePool;

/// `SQLite`-backed implementation of the Warden stores
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Connect to `database_url` and bring the schema up to date
    pub async fn open(database_url: &str) -> std::result::Result<Self, StorageError> {
        let pool = crate::create_pool(database_url).await?;
        crate::run_migrations(&pool).await?;
        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl UserStore for SqliteStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        Ok(users::get_by_username(&self.pool, username).await?)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>> {
        Ok(users::get_by_id(&self.pool, id).await?)
    }

    async fn exists_by_username(&self, username: &str) -> Result<bool> {
        Ok(users::exists_by_username(&self.pool, username).await?)
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool> {
        Ok(users::exists_by_email(&self.pool, email).await?)
    }

    async fn insert(&self, user: NewUser) -> Result<User> {
        Ok(users::create(&self.pool, user).await?)
    }

    async fn update_by_id(&self, id: &UserId, patch: UserPatch) -> Result<u64> {
        Ok(users::update(&self.pool, id, &patch).await?)
    }

    async fn delete_by_id(&self, id: &UserId) -> Result<u64> {
        Ok(users::delete(&self.pool, id).await?)
    }

    async fn list(&self, limit: u32) -> Result<Vec<User>> {
        Ok(users::list(&self.pool, limit).await?)
    }
}

#[async_trait]
impl AssetStore for SqliteStore {
    async fn list_assets(&self, limit: u32) -> Result<Vec<Asset>> {
        Ok(assets::list(&self.pool, limit).await?)
    }

    async fn create_asset(&self, asset: NewAsset) -> Result<Asset> {
        Ok(assets::create(&self.pool, asset).await?)
    }
}
