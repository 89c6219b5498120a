//! Identity service - registration, login and profile lifecycle
//!
//! Sits between the HTTP handlers and the injected [`UserStore`]. Every
//! operation returns a tagged [`ServerError`]; the API layer decides how each
//! one is reported.

use crate::error::{Result, ServerError};
use crate::services::{hasher::CredentialHasher, tokens::TokenIssuer};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use warden_core::{NewUser, ProfileFields, PublicUser, UserId, UserPatch, UserStore};

/// Page size when the caller gives none
pub const DEFAULT_LIST_LIMIT: u32 = 10;

/// Message used when an update or delete names no user
pub const MISSING_USER_ID: &str = "User Not Found...!";

/// Keys an update may never touch
const IMMUTABLE_KEYS: &[&str] = &[
    "username",
    "id",
    "_id",
    "passwordHash",
    "password_hash",
    "createdAt",
];

/// Registration payload
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Successful login
#[derive(Debug, Clone, Serialize)]
pub struct LoginGrant {
    pub username: String,
    pub access_token: String,
}

pub struct IdentityService {
    store: Arc<dyn UserStore>,
    hasher: CredentialHasher,
    issuer: TokenIssuer,
}

fn required(value: Option<String>, field: &str) -> Result<String> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ServerError::BadRequest(format!("Missing {field}"))),
    }
}

fn present_id(user_id: Option<&str>) -> Result<UserId> {
    match user_id {
        Some(id) if !id.is_empty() => Ok(UserId::new(id)),
        _ => Err(ServerError::BadRequest(MISSING_USER_ID.to_string())),
    }
}

fn optional_text(key: &str, value: Value) -> Result<Option<String>> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        _ => Err(ServerError::BadRequest(format!("{key} must be a string"))),
    }
}

impl IdentityService {
    pub fn new(store: Arc<dyn UserStore>, hasher: CredentialHasher, issuer: TokenIssuer) -> Self {
        Self {
            store,
            hasher,
            issuer,
        }
    }

    pub fn issuer(&self) -> &TokenIssuer {
        &self.issuer
    }

    /// Create an account
    ///
    /// Both availability checks always run to completion; a taken username
    /// is reported ahead of a taken email. The store's insert remains the
    /// final arbiter when a concurrent registration slips between the checks
    /// and the write.
    pub async fn register(&self, registration: Registration) -> Result<UserId> {
        let username = required(registration.username, "username")?;
        let password = required(registration.password, "password")?;
        let email = required(registration.email, "email")?;

        let (username_taken, email_taken) = tokio::join!(
            self.store.exists_by_username(&username),
            self.store.exists_by_email(&email),
        );
        if username_taken? {
            return Err(ServerError::Conflict(warden_core::UniqueField::Username));
        }
        if email_taken? {
            return Err(ServerError::Conflict(warden_core::UniqueField::Email));
        }

        let password_hash = self.hasher.hash_async(password).await?;

        let user = self
            .store
            .insert(NewUser {
                username,
                email,
                password_hash,
                first_name: registration.first_name,
                last_name: registration.last_name,
            })
            .await?;

        tracing::info!(user_id = %user.id, username = %user.username, "Registered user");
        Ok(user.id)
    }

    /// Check a password and issue an access token
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginGrant> {
        let user = self
            .store
            .find_by_username(username)
            .await?
            .ok_or_else(|| ServerError::NotFound(format!("user {username}")))?;

        let matches = self
            .hasher
            .verify_async(password.to_string(), user.password_hash.clone())
            .await?;
        if !matches {
            tracing::debug!(username = %username, "Rejected login");
            return Err(ServerError::InvalidCredential);
        }

        let access_token = self.issuer.issue(&user.id, &user.username)?;
        tracing::info!(user_id = %user.id, "User logged in");

        Ok(LoginGrant {
            username: user.username,
            access_token,
        })
    }

    /// Existence probe by username; no password involved
    pub async fn verify(&self, username: &str) -> Result<PublicUser> {
        self.find_public(username).await
    }

    pub async fn get_user(&self, username: &str) -> Result<PublicUser> {
        if username.is_empty() {
            return Err(ServerError::BadRequest("Invalid Username".to_string()));
        }
        self.find_public(username).await
    }

    /// Up to `limit` users in insertion order
    pub async fn list_users(&self, limit: u32) -> Result<Vec<PublicUser>> {
        let users = self
            .store
            .list(limit)
            .await
            .map_err(|e| ServerError::StoreUnavailable(e.to_string()))?;

        if users.is_empty() {
            return Err(ServerError::EmptyResult("users".to_string()));
        }

        Ok(users.into_iter().map(|u| u.into_public()).collect())
    }

    /// Apply a partial update to the user with `user_id`
    ///
    /// `email`, `firstName` and `lastName` update their columns and
    /// `password` is re-hashed. Identity and secret keys are refused. Any
    /// other key lands in the profile, where `null` removes it.
    ///
    /// Returns the number of rows updated; an unknown id yields `Ok(0)`.
    pub async fn update_user(&self, user_id: Option<&str>, changes: ProfileFields) -> Result<u64> {
        let id = present_id(user_id)?;

        let mut patch = UserPatch::default();
        for (key, value) in changes {
            if IMMUTABLE_KEYS.contains(&key.as_str()) {
                return Err(ServerError::BadRequest(format!(
                    "Field '{key}' cannot be updated"
                )));
            }

            match key.as_str() {
                "email" => match value {
                    Value::String(email) if !email.is_empty() => patch.email = Some(email),
                    _ => {
                        return Err(ServerError::BadRequest(
                            "email must be a non-empty string".to_string(),
                        ))
                    }
                },
                "firstName" => patch.first_name = Some(optional_text(&key, value)?),
                "lastName" => patch.last_name = Some(optional_text(&key, value)?),
                "password" => match value {
                    Value::String(password) if !password.is_empty() => {
                        patch.password_hash = Some(self.hasher.hash_async(password).await?);
                    }
                    _ => {
                        return Err(ServerError::BadRequest(
                            "password must be a non-empty string".to_string(),
                        ))
                    }
                },
                _ => {
                    patch.profile.insert(key, value);
                }
            }
        }

        let updated = self.store.update_by_id(&id, patch).await?;
        if updated == 0 {
            tracing::warn!(user_id = %id, "Update matched no user");
        } else {
            tracing::info!(user_id = %id, "Updated user");
        }

        Ok(updated)
    }

    /// Returns the number of rows deleted; an unknown id yields `Ok(0)`.
    pub async fn delete_user(&self, user_id: Option<&str>) -> Result<u64> {
        let id = present_id(user_id)?;

        let deleted = self.store.delete_by_id(&id).await?;
        if deleted == 0 {
            tracing::warn!(user_id = %id, "Delete matched no user");
        } else {
            tracing::info!(user_id = %id, "Deleted user");
        }

        Ok(deleted)
    }

    async fn find_public(&self, username: &str) -> Result<PublicUser> {
        self.store
            .find_by_username(username)
            .await?
            .map(|u| u.into_public())
            .ok_or_else(|| ServerError::NotFound(format!("user {username}")))
    }
}
