//! User entity and the shapes exchanged with storage.
//!
//! The stored password hash lives in [`User`] and is deliberately not
//! serialisable; everything returned to callers goes through
//! [`UserProfile`], which has no password field at all.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A registered user as stored by a backend, password hash included.
///
/// Only the authentication path reads this shape (to verify a login
/// candidate); it intentionally does not implement `Serialize`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
    /// Argon2 PHC-string hash. Never the plaintext.
    pub password: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// The caller-safe view of this user.
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            created_at: self.created_at,
        }
    }
}

/// A user record without credential material, safe to serialise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserProfile {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// Fields required to create a user. `password` is hashed by the accounts
/// service before this shape reaches any backend.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    /// Argon2 PHC-string hash.
    pub password: String,
}
