/// User domain types
use serde::{Deserialize, Serialize};
use std::fmt;

use super::UserId;

/// Open-ended profile fields stored alongside the fixed columns
pub type ProfileFields = serde_json::Map<String, serde_json::Value>;

/// Stored user account
///
/// Carries the credential secret and therefore deliberately does not
/// implement `Serialize`. Convert with [`User::into_public`] before anything
/// leaves the process.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    /// Store-assigned identifier
    pub id: UserId,

    /// Unique login name
    pub username: String,

    /// Unique email address
    pub email: String,

    /// bcrypt secret derived from the password
    pub password_hash: String,

    pub first_name: Option<String>,
    pub last_name: Option<String>,

    /// Extra fields set through profile updates
    pub profile: ProfileFields,

    /// Unix timestamp (seconds)
    pub created_at: i64,
}

impl User {
    /// Drop the credential secret
    pub fn into_public(self) -> PublicUser {
        PublicUser {
            id: self.id,
            username: self.username,
            email: self.email,
            first_name: self.first_name,
            last_name: self.last_name,
            created_at: self.created_at,
            profile: self.profile,
        }
    }
}

/// User as returned to callers: every field except the credential secret
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub id: UserId,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    pub created_at: i64,
    #[serde(flatten)]
    pub profile: ProfileFields,
}

/// Data needed to create a user; the store assigns `id` and `created_at`
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Partial replacement of a user's mutable fields
///
/// `None` leaves a field untouched. For the optional name fields,
/// `Some(None)` clears the value. `profile` is merged key by key and a
/// `null` value removes the key. `id` and `username` cannot be changed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserPatch {
    pub email: Option<String>,
    pub first_name: Option<Option<String>>,
    pub last_name: Option<Option<String>>,
    /// Already-hashed secret; never a plaintext password
    pub password_hash: Option<String>,
    pub profile: ProfileFields,
}

impl UserPatch {
    /// True when applying the patch would change nothing
    pub fn is_empty(&self) -> bool {
        self.email.is_none()
            && self.first_name.is_none()
            && self.last_name.is_none()
            && self.password_hash.is_none()
            && self.profile.is_empty()
    }

    /// Apply the patch to an in-memory record
    pub fn apply_to(&self, user: &mut User) {
        if let Some(email) = &self.email {
            user.email = email.clone();
        }
        if let Some(first_name) = &self.first_name {
            user.first_name = first_name.clone();
        }
        if let Some(last_name) = &self.last_name {
            user.last_name = last_name.clone();
        }
        if let Some(hash) = &self.password_hash {
            user.password_hash = hash.clone();
        }
        merge_profile(&mut user.profile, &self.profile);
    }
}

/// JSON merge-patch (RFC 7396), the same merge SQLite's `json_patch` applies
///
/// `null` deletes a key, objects merge recursively, anything else replaces.
pub fn merge_profile(target: &mut ProfileFields, changes: &ProfileFields) {
    for (key, value) in changes {
        match value {
            serde_json::Value::Null => {
                target.remove(key);
            }
            serde_json::Value::Object(nested) => {
                let entry = target
                    .entry(key.clone())
                    .or_insert_with(|| serde_json::Value::Object(ProfileFields::new()));
                if !entry.is_object() {
                    *entry = serde_json::Value::Object(ProfileFields::new());
                }
                if let serde_json::Value::Object(inner) = entry {
                    merge_profile(inner, nested);
                }
            }
            other => {
                target.insert(key.clone(), other.clone());
            }
        }
    }
}

/// Fields covered by the uniqueness invariant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UniqueField {
    Username,
    Email,
}

impl UniqueField {
    pub fn as_str(&self) -> &'static str {
        match self {
            UniqueField::Username => "username",
            UniqueField::Email => "email",
        }
    }
}

impl fmt::Display for UniqueField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
