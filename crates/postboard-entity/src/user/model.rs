//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::version::Versioned;

/// A registered user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: i64,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// Display name.
    pub name: String,
    /// Lower-cased, unique email address.
    pub email: String,
    /// Argon2 PHC password hash.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Whether the account has been activated.
    pub activated: bool,
    /// Optimistic concurrency counter.
    pub version: i32,
}

impl Versioned for User {
    fn id(&self) -> i64 {
        self.id
    }

    fn version(&self) -> i32 {
        self.version
    }

    fn set_version(&mut self, version: i32) {
        self.version = version;
    }
}

/// Data required to create a new user.
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Display name.
    pub name: String,
    /// Email address; stored lower-cased.
    pub email: String,
    /// Pre-hashed password.
    pub password_hash: String,
    /// Initial activation state.
    pub activated: bool,
}
