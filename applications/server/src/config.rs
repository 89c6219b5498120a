/// Server configuration
use crate::error::{Result, ServerError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Longest accepted token lifetime: one year
pub const MAX_TOKEN_TTL_HOURS: u64 = 24 * 365;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_server")]
    pub server: ServerSettings,

    #[serde(default = "default_storage")]
    pub storage: StorageSettings,

    #[serde(default = "default_auth")]
    pub auth: AuthSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageSettings {
    #[serde(default = "default_database_url")]
    pub database_url: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthSettings {
    #[serde(default)]
    pub jwt_secret: String,

    #[serde(default = "default_token_ttl_hours")]
    pub token_ttl_hours: u64,

    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,
}

impl ServerConfig {
    /// Load configuration from `config.toml` (if present) and environment
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration from an explicit file, falling back to `config.toml`
    ///
    /// Environment variables prefixed with `WARDEN_` override file values,
    /// using `__` between sections (`WARDEN_AUTH__JWT_SECRET`). A bare
    /// `JWT_SECRET` is honoured when no prefixed secret is set.
    pub fn load_from(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let config_path = PathBuf::from("config.toml");
                if config_path.exists() {
                    settings = settings.add_source(config::File::from(config_path));
                }
            }
        }

        settings = settings
            .add_source(
                config::Environment::with_prefix("WARDEN")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_default("auth.jwt_secret", std::env::var("JWT_SECRET").unwrap_or_default())
            .map_err(|e| ServerError::Config(e.to_string()))?;

        let config = settings
            .build()
            .map_err(|e| ServerError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| ServerError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.auth.jwt_secret.is_empty() {
            return Err(ServerError::Config(
                "JWT secret is required (set WARDEN_AUTH__JWT_SECRET or JWT_SECRET)".to_string(),
            ));
        }

        if self.auth.token_ttl_hours == 0 {
            return Err(ServerError::Config(
                "auth.token_ttl_hours must be greater than zero".to_string(),
            ));
        }

        if self.auth.token_ttl_hours > MAX_TOKEN_TTL_HOURS {
            return Err(ServerError::Config(format!(
                "auth.token_ttl_hours must be at most {MAX_TOKEN_TTL_HOURS}"
            )));
        }

        Ok(())
    }

    /// Token lifetime, capped at [`MAX_TOKEN_TTL_HOURS`]
    pub fn token_ttl(&self) -> chrono::Duration {
        let hours = self.auth.token_ttl_hours.min(MAX_TOKEN_TTL_HOURS);
        chrono::Duration::hours(hours as i64)
    }
}

// Default values
fn default_server() -> ServerSettings {
    ServerSettings {
        host: default_host(),
        port: default_port(),
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_storage() -> StorageSettings {
    StorageSettings {
        database_url: default_database_url(),
    }
}

fn default_database_url() -> String {
    "sqlite://./data/warden.db".to_string()
}

fn default_auth() -> AuthSettings {
    AuthSettings {
        jwt_secret: String::new(),
        token_ttl_hours: default_token_ttl_hours(),
        bcrypt_cost: default_bcrypt_cost(),
    }
}

fn default_token_ttl_hours() -> u64 {
    24
}

fn default_bcrypt_cost() -> u32 {
    crate::services::hasher::DEFAULT_COST
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            server: default_server(),
            storage: default_storage(),
            auth: default_auth(),
        }
    }
}
