//! API DTOs (Data Transfer Objects)
//!
//! Request fields are optional: absent fields are validation failures with
//! field messages, not malformed bodies. Request types carry passwords and
//! deliberately have no `Debug`.

use serde::{Deserialize, Serialize};

use crate::domain::entity::user::User;
use crate::domain::value_object::user_id::UserId;

// ============================================================================
// Sign Up
// ============================================================================

/// Sign up request
#[derive(Default, Deserialize)]
pub struct SignUpRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

// ============================================================================
// Sign In
// ============================================================================

/// Login request
#[derive(Default, Deserialize)]
pub struct SignInRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Login response
#[derive(Debug, Clone, Serialize)]
pub struct SignInResponse {
    pub token: String,
    pub user: UserResponse,
    pub is_admin: bool,
}

// ============================================================================
// Current User
// ============================================================================

/// Current user response
#[derive(Debug, Clone, Serialize)]
pub struct CurrentUserResponse {
    pub user: UserResponse,
    pub is_admin: bool,
}

// ============================================================================
// Shared
// ============================================================================

/// Public user profile
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: UserId,
    pub username: String,
    pub email: String,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.user_id,
            username: user.user_name.original().to_string(),
            email: user.email.as_str().to_string(),
        }
    }
}

/// `{"message": "..."}`
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

impl MessageResponse {
    pub const fn new(message: &'static str) -> Self {
        Self { message }
    }
}
