/// Shared application state
use crate::services::{AssetService, IdentityService};
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub identity: Arc<IdentityService>,
    pub assets: Arc<AssetService>,
}

impl AppState {
    pub fn new(identity: Arc<IdentityService>, assets: Arc<AssetService>) -> Self {
        Self { identity, assets }
    }
}
