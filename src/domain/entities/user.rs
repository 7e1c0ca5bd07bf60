//! User entity and its write-side companions.

use chrono::{DateTime, Utc};

/// A stored user account, including the password hash.
///
/// Only returned by lookups that need the hash (login).
#[derive(Debug, Clone)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Read projection of a user without credentials.
#[derive(Debug, Clone, PartialEq)]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            created_at: user.created_at,
        }
    }
}

/// Input data for creating a new user. The password is already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

/// Partial update for an existing user.
///
/// `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserPatch {
    pub name: Option<String>,
    pub email: Option<String>,
}

impl UserPatch {
    /// Builds a patch from raw request fields; blank fields are not overwritten.
    pub fn from_fields(name: &str, email: &str) -> Self {
        let keep = |value: &str| (!value.trim().is_empty()).then(|| value.to_string());
        Self {
            name: keep(name),
            email: keep(email),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none()
    }
}
