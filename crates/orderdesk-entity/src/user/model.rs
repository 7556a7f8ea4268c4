//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A registered user.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Unique email address, used as the login name and token subject.
    pub email: String,
    /// Argon2 password hash.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Whether the account may use the API.
    pub active: bool,
    /// Whether the account has elevated permissions.
    pub admin: bool,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Check if this user has admin privileges.
    pub fn is_admin(&self) -> bool {
        self.admin
    }

    /// Check if the account is active.
    pub fn is_active(&self) -> bool {
        self.active
    }
}

/// Data required to create a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Pre-hashed password.
    pub password_hash: String,
    /// Initial active flag.
    pub active: bool,
    /// Initial admin flag.
    pub admin: bool,
}

impl CreateUser {
    /// A regular, active, non-admin account as created by signup.
    pub fn regular(name: String, email: String, password_hash: String) -> Self {
        Self {
            name,
            email,
            password_hash,
            active: true,
            admin: false,
        }
    }
}
