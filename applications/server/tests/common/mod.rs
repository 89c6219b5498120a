//! Common test utilities and fixtures
#![allow(dead_code)]

use std::sync::Arc;
use tempfile::TempDir;
use warden_core::UserStore;
use warden_server::{
    services::{AssetService, CredentialHasher, IdentityService, Registration, TokenIssuer},
    state::AppState,
};
use warden_storage::SqliteStore;

/// Secret used to sign tokens in tests
pub const TEST_SECRET: &str = "test-secret-key";

/// File-backed SQLite store in a temporary directory
pub struct TestDb {
    pub store: Arc<SqliteStore>,
    _temp_dir: TempDir,
}

impl TestDb {
    pub async fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let url = format!("sqlite://{}", temp_dir.path().join("test.db").display());
        let store = SqliteStore::open(&url)
            .await
            .expect("Failed to open test database");

        Self {
            store: Arc::new(store),
            _temp_dir: temp_dir,
        }
    }
}

/// Cheapest bcrypt cost, so tests stay fast
pub fn test_hasher() -> CredentialHasher {
    CredentialHasher::new(4).expect("valid cost")
}

pub fn test_issuer() -> TokenIssuer {
    TokenIssuer::new(TEST_SECRET, chrono::Duration::hours(1)).expect("valid secret")
}

pub fn identity_service(store: Arc<dyn UserStore>) -> IdentityService {
    IdentityService::new(store, test_hasher(), test_issuer())
}

/// Application state over a SQLite test database
pub fn app_state(db: &TestDb) -> AppState {
    AppState::new(
        Arc::new(identity_service(db.store.clone())),
        Arc::new(AssetService::new(db.store.clone())),
    )
}

/// Test user credentials
pub mod fixtures {
    use super::Registration;

    pub const TEST_USERNAME: &str = "example123";
    pub const TEST_PASSWORD: &str = "admin123";
    pub const TEST_EMAIL: &str = "example@gmail.com";

    pub fn registration(username: &str, email: &str) -> Registration {
        Registration {
            username: Some(username.to_string()),
            email: Some(email.to_string()),
            password: Some(TEST_PASSWORD.to_string()),
            first_name: Some("bill".to_string()),
            last_name: Some("william".to_string()),
        }
    }

    pub fn example_user() -> Registration {
        registration(TEST_USERNAME, TEST_EMAIL)
    }
}
