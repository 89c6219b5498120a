/// Password hashing with bcrypt
use crate::error::{Result, ServerError};

/// Work factor used when none is configured
pub const DEFAULT_COST: u32 = 10;

const MIN_COST: u32 = 4;
const MAX_COST: u32 = 31;

/// One-way credential hashing
///
/// Every call to [`hash`](Self::hash) draws a fresh salt, so two users with
/// the same password never share a secret.
#[derive(Debug, Clone, Copy)]
pub struct CredentialHasher {
    cost: u32,
}

impl CredentialHasher {
    pub fn new(cost: u32) -> Result<Self> {
        if !(MIN_COST..=MAX_COST).contains(&cost) {
            return Err(ServerError::Config(format!(
                "bcrypt cost must be between {MIN_COST} and {MAX_COST}, got {cost}"
            )));
        }
        Ok(Self { cost })
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Hash a password using bcrypt
    pub fn hash(&self, plaintext: &str) -> Result<String> {
        bcrypt::hash(plaintext, self.cost).map_err(ServerError::from)
    }

    /// Verify a password against a stored secret
    ///
    /// A mismatch is `Ok(false)`; only a malformed secret is an error.
    pub fn verify(&self, plaintext: &str, secret: &str) -> Result<bool> {
        bcrypt::verify(plaintext, secret).map_err(ServerError::from)
    }

    /// [`hash`](Self::hash) on the blocking pool
    pub async fn hash_async(&self, plaintext: String) -> Result<String> {
        let hasher = *self;
        tokio::task::spawn_blocking(move || hasher.hash(&plaintext)).await?
    }

    /// [`verify`](Self::verify) on the blocking pool
    pub async fn verify_async(&self, plaintext: String, secret: String) -> Result<bool> {
        let hasher = *self;
        tokio::task::spawn_blocking(move || hasher.verify(&plaintext, &secret)).await?
    }
}

impl Default for CredentialHasher {
    fn default() -> Self {
        Self { cost: DEFAULT_COST }
    }
}
