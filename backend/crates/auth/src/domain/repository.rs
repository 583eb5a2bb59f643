//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use crate::domain::entity::{
    auth_token::AuthToken,
    user::{NewUser, User},
};
use crate::domain::value_object::{
    auth_token_id::AuthTokenId, email::Email, user_id::UserId, user_name::UserName,
};
use crate::error::AuthResult;

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Insert a new user and return it with its assigned ID
    ///
    /// A taken user name or email fails with `AuthError::Duplicate`, even
    /// when a concurrent insert won the race after the caller's checks.
    async fn insert(&self, user: NewUser) -> AuthResult<User>;

    /// Find user by ID
    async fn find_by_id(&self, user_id: UserId) -> AuthResult<Option<User>>;

    /// Find user by email
    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>>;

    /// Check if user name exists (case-insensitive)
    async fn exists_by_user_name(&self, user_name: &UserName) -> AuthResult<bool>;

    /// Check if email exists
    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool>;
}

/// Auth token repository trait
#[trait_variant::make(AuthTokenRepository: Send)]
pub trait LocalAuthTokenRepository {
    /// Persist a new token
    async fn create(&self, token: &AuthToken) -> AuthResult<()>;

    /// Find a token that exists and has not expired
    async fn find_active(&self, token_id: AuthTokenId) -> AuthResult<Option<AuthToken>>;

    /// Record a use of the token
    async fn touch(&self, token: &AuthToken) -> AuthResult<()>;

    /// Delete every token owned by the user
    async fn delete_all_for_user(&self, user_id: UserId) -> AuthResult<u64>;

    /// Clean up expired tokens
    async fn cleanup_expired(&self) -> AuthResult<u64>;
}
