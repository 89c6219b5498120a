//! Warden Storage
//!
//! `SQLite` persistence for Warden user accounts and assets, plus an
//! in-memory store with the same semantics for tests and tooling.
//!
//! # Architecture
//!
//! - **Vertical Slicing**: each collection (`users`, `assets`) owns its queries
//! - **Store Traits**: [`SqliteStore`] and [`MemoryStore`] implement
//!   `warden_core::UserStore` and `warden_core::AssetStore`
//! - **Uniqueness**: enforced by unique indexes; violations surface as
//!   `WardenError::Duplicate`
//!
//! # Example
//!
//! ```rust,no_run
//! use warden_storage::{create_pool, run_migrations, SqliteStore};
//! use warden_core::UserStore;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = create_pool("sqlite://warden.db").await?;
//! run_migrations(&pool).await?;
//!
//! let store = SqliteStore::new(pool);
//! let users = store.list(10).await?;
//! # Ok(())
//! # }
//! ```

mod context;
mod error;
mod memory;

// Vertical slices
pub mod assets;
pub mod users;

pub use context::SqliteStore;
pub use error::StorageError;
pub use memory::MemoryStore;

use sqlx::migrate::Migrator;
use sqlx::sqlite::SqlitePool;

// Embed migrations into binary
static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Run database migrations
///
/// This should be called once when the application starts to ensure
/// the database schema is up to date.
///
/// # Errors
///
/// Returns an error if migrations fail to run
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    MIGRATOR.run(pool).await
}

/// Create a new `SQLite` pool
///
/// # Arguments
///
/// * `database_url` - `SQLite` connection string (e.g., `<sqlite://warden.db>`)
///
/// # Errors
///
/// Returns an error if the connection fails
pub async fn create_pool(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
    use std::str::FromStr;

    tracing::debug!(database_url, "creating sqlite pool");

    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .foreign_keys(true)
        .busy_timeout(std::time::Duration::from_secs(30));

    if let Some(parent) = options.get_filename().parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    tracing::debug!("sqlite pool ready");

    Ok(pool)
}
