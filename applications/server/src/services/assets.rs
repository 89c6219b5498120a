/// Asset listing
use crate::error::{Result, ServerError};
use std::sync::Arc;
use warden_core::{Asset, AssetStore};

pub struct AssetService {
    store: Arc<dyn AssetStore>,
}

impl AssetService {
    pub fn new(store: Arc<dyn AssetStore>) -> Self {
        Self { store }
    }

    /// Up to `limit` assets, failing with `EmptyResult` when there are none
    pub async fn list_assets(&self, limit: u32) -> Result<Vec<Asset>> {
        let assets = self
            .store
            .list_assets(limit)
            .await
            .map_err(|e| ServerError::StoreUnavailable(e.to_string()))?;

        if assets.is_empty() {
            return Err(ServerError::EmptyResult("assets".to_string()));
        }

        Ok(assets)
    }
}
