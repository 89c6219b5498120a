//! User account queries

use crate::error::Result;
use warden_core::types::{NewUser, ProfileFields, User, UserId, UserPatch};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

const USER_COLUMNS: &str =
    "id, username, email, password_hash, first_name, last_name, profile, created_at";

fn user_from_row(row: &SqliteRow) -> Result<User> {
    let profile: String = row.try_get("profile")?;
    let profile: ProfileFields = serde_json::from_str(&profile)?;

    Ok(User {
        id: UserId::new(row.try_get::<String, _>("id")?),
        username: row.try_get("username")?,
        email: row.try_get("email")?,
        password_hash: row.try_get("password_hash")?,
        first_name: row.try_get("first_name")?,
        last_name: row.try_get("last_name")?,
        profile,
        created_at: row.try_get("created_at")?,
    })
}

/// Get a user by username
pub async fn get_by_username(pool: &SqlitePool, username: &str) -> Result<Option<User>> {
    let row = sqlx::query(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE username = ?"
    ))
    .bind(username)
    .fetch_optional(pool)
    .await?;

    row.as_ref().map(user_from_row).transpose()
}

/// Get a user by ID
pub async fn get_by_id(pool: &SqlitePool, id: &UserId) -> Result<Option<User>> {
    let row = sqlx::query(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?"))
        .bind(id.as_str())
        .fetch_optional(pool)
        .await?;

    row.as_ref().map(user_from_row).transpose()
}

/// Check whether a username is taken
pub async fn exists_by_username(pool: &SqlitePool, username: &str) -> Result<bool> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE username = ?")
        .bind(username)
        .fetch_one(pool)
        .await?;

    Ok(count > 0)
}

/// Check whether an email is taken
pub async fn exists_by_email(pool: &SqlitePool, email: &str) -> Result<bool> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE email = ?")
        .bind(email)
        .fetch_one(pool)
        .await?;

    Ok(count > 0)
}

/// Create a new user
///
/// The unique indexes on `username` and `email` reject the insert with
/// `StorageError::Duplicate` if another writer took either value first.
pub async fn create(pool: &SqlitePool, new_user: NewUser) -> Result<User> {
    let id = UserId::generate();
    let now = chrono::Utc::now().timestamp();

    sqlx::query(
        "INSERT INTO users (id, username, email, password_hash, first_name, last_name, profile, created_at)
         VALUES (?, ?, ?, ?, ?, ?, '{}', ?)",
    )
    .bind(id.as_str())
    .bind(&new_user.username)
    .bind(&new_user.email)
    .bind(&new_user.password_hash)
    .bind(&new_user.first_name)
    .bind(&new_user.last_name)
    .bind(now)
    .execute(pool)
    .await?;

    Ok(User {
        id,
        username: new_user.username,
        email: new_user.email,
        password_hash: new_user.password_hash,
        first_name: new_user.first_name,
        last_name: new_user.last_name,
        profile: ProfileFields::new(),
        created_at: now,
    })
}

/// Apply a partial update to a user
///
/// Runs as one statement; the profile is merged in place by `json_patch`.
///
/// Returns the number of rows matched; an unknown ID yields `0`.
pub async fn update(pool: &SqlitePool, id: &UserId, patch: &UserPatch) -> Result<u64> {
    let profile = serde_json::to_string(&patch.profile)?;

    let result = sqlx::query(
        "UPDATE users SET
            email = COALESCE(?, email),
            first_name = CASE WHEN ? THEN ? ELSE first_name END,
            last_name = CASE WHEN ? THEN ? ELSE last_name END,
            password_hash = COALESCE(?, password_hash),
            profile = json_patch(profile, ?)
         WHERE id = ?",
    )
    .bind(&patch.email)
    .bind(patch.first_name.is_some())
    .bind(patch.first_name.clone().flatten())
    .bind(patch.last_name.is_some())
    .bind(patch.last_name.clone().flatten())
    .bind(&patch.password_hash)
    .bind(profile)
    .bind(id.as_str())
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}

/// Delete a user
///
/// Returns the number of rows deleted; an unknown ID yields `0`.
pub async fn delete(pool: &SqlitePool, id: &UserId) -> Result<u64> {
    let result = sqlx::query("DELETE FROM users WHERE id = ?")
        .bind(id.as_str())
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}

/// Get up to `limit` users in insertion order
pub async fn list(pool: &SqlitePool, limit: u32) -> Result<Vec<User>> {
    let rows = sqlx::query(&format!(
        "SELECT {USER_COLUMNS} FROM users ORDER BY rowid LIMIT ?"
    ))
    .bind(i64::from(limit))
    .fetch_all(pool)
    .await?;

    rows.iter().map(user_from_row).collect()
}
