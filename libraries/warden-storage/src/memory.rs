//! In-memory store with the same contract as [`crate::SqliteStore`]

use async_trait::async_trait;
use tokio::sync::RwLock;
use warden_core::{
    error::{Result, WardenError},
    storage::{AssetStore, UserStore},
    types::*,
};

#[derive(Debug, Default)]
struct State {
    users: Vec<User>,
    assets: Vec<Asset>,
}

/// Process-local store
///
/// Uniqueness checks and writes happen under a single write lock, so
/// concurrent inserts of the same username cannot both succeed.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<State>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users
    pub async fn user_count(&self) -> usize {
        self.state.read().await.users.len()
    }
}

fn conflicting_field(
    users: &[User],
    skip: Option<&UserId>,
    username: &str,
    email: &str,
) -> Option<UniqueField> {
    let others: Vec<&User> = users.iter().filter(|u| Some(&u.id) != skip).collect();

    if others.iter().any(|u| u.username == username) {
        Some(UniqueField::Username)
    } else if others.iter().any(|u| u.email == email) {
        Some(UniqueField::Email)
    } else {
        None
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        let state = self.state.read().await;
        Ok(state.users.iter().find(|u| u.username == username).cloned())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>> {
        let state = self.state.read().await;
        Ok(state.users.iter().find(|u| &u.id == id).cloned())
    }

    async fn exists_by_username(&self, username: &str) -> Result<bool> {
        let state = self.state.read().await;
        Ok(state.users.iter().any(|u| u.username == username))
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool> {
        let state = self.state.read().await;
        Ok(state.users.iter().any(|u| u.email == email))
    }

    async fn insert(&self, new_user: NewUser) -> Result<User> {
        let mut state = self.state.write().await;

        if let Some(field) = conflicting_field(&state.users, None, &new_user.username, &new_user.email) {
            return Err(WardenError::Duplicate(field));
        }

        let user = User {
            id: UserId::generate(),
            username: new_user.username,
            email: new_user.email,
            password_hash: new_user.password_hash,
            first_name: new_user.first_name,
            last_name: new_user.last_name,
            profile: ProfileFields::new(),
            created_at: chrono::Utc::now().timestamp(),
        };
        state.users.push(user.clone());

        Ok(user)
    }

    async fn update_by_id(&self, id: &UserId, patch: UserPatch) -> Result<u64> {
        let mut state = self.state.write().await;

        let Some(index) = state.users.iter().position(|u| &u.id == id) else {
            return Ok(0);
        };

        let mut updated = state.users[index].clone();
        patch.apply_to(&mut updated);

        if let Some(field) = conflicting_field(&state.users, Some(id), &updated.username, &updated.email) {
            return Err(WardenError::Duplicate(field));
        }

        state.users[index] = updated;
        Ok(1)
    }

    async fn delete_by_id(&self, id: &UserId) -> Result<u64> {
        let mut state = self.state.write().await;
        let before = state.users.len();
        state.users.retain(|u| &u.id != id);

        let removed = before - state.users.len();
        if removed > 0 {
            for asset in &mut state.assets {
                asset.users.retain(|u| u != id);
            }
        }

        Ok(removed as u64)
    }

    async fn list(&self, limit: u32) -> Result<Vec<User>> {
        let state = self.state.read().await;
        Ok(state.users.iter().take(limit as usize).cloned().collect())
    }
}

#[async_trait]
impl AssetStore for MemoryStore {
    async fn list_assets(&self, limit: u32) -> Result<Vec<Asset>> {
        let state = self.state.read().await;
        Ok(state.assets.iter().take(limit as usize).cloned().collect())
    }

    async fn create_asset(&self, new_asset: NewAsset) -> Result<Asset> {
        let new_asset = new_asset.dedup_users();
        let mut state = self.state.write().await;

        if let Some(missing) = new_asset
            .users
            .iter()
            .find(|id| !state.users.iter().any(|u| &u.id == *id))
        {
            return Err(WardenError::invalid_input(format!("unknown user {missing}")));
        }

        let asset = Asset {
            id: AssetId::generate(),
            balance: new_asset.balance,
            symbol: new_asset.symbol,
            users: new_asset.users,
        };
        state.assets.push(asset.clone());

        Ok(asset)
    }
}
