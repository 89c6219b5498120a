/// Asset domain types
use serde::{Deserialize, Serialize};

use super::{AssetId, UserId};

/// Balance record referencing the users that hold it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub id: AssetId,
    pub balance: f64,
    pub symbol: String,
    pub users: Vec<UserId>,
}

/// Data needed to create an asset
#[derive(Debug, Clone, PartialEq)]
pub struct NewAsset {
    pub balance: f64,
    pub symbol: String,
    pub users: Vec<UserId>,
}

impl NewAsset {
    /// Drop repeated user references, keeping first occurrences in order
    pub fn dedup_users(mut self) -> Self {
        let mut seen = std::collections::HashSet::new();
        self.users.retain(|id| seen.insert(id.clone()));
        self
    }
}
