//! User Entity
//!
//! A registered account together with its credential hash.

use chrono::{DateTime, Utc};

use crate::domain::value_object::{
    email::Email, user_id::UserId, user_name::UserName, user_password::UserPassword,
    user_role::UserRole,
};

/// User entity as stored
#[derive(Debug, Clone)]
pub struct User {
    /// Numeric identifier assigned by the store
    pub user_id: UserId,
    /// User name (unique, case-insensitive)
    pub user_name: UserName,
    /// Email (unique, lowercase)
    pub email: Email,
    /// Argon2id hash; never the clear text
    pub password: UserPassword,
    pub user_role: UserRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.user_role.is_admin()
    }
}

/// A user that has passed validation but has no identifier yet
#[derive(Debug, Clone)]
pub struct NewUser {
    pub user_name: UserName,
    pub email: Email,
    pub password: UserPassword,
    pub user_role: UserRole,
}

impl NewUser {
    /// Create a regular (non-admin) user
    pub fn new(user_name: UserName, email: Email, password: UserPassword) -> Self {
        Self {
            user_name,
            email,
            password,
            user_role: UserRole::default(),
        }
    }

    /// Attach the identifier and timestamps assigned on insert
    pub fn into_user(self, user_id: UserId, created_at: DateTime<Utc>) -> User {
        User {
            user_id,
            user_name: self.user_name,
            email: self.email,
            password: self.password,
            user_role: self.user_role,
            created_at,
            updated_at: created_at,
        }
    }
}
