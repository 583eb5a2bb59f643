//! In-Memory Repository Implementation
//!
//! Process-local store for tests and for running the service without a
//! database. Uniqueness is checked and the user inserted under one write
//! lock, so concurrent signups race the same way they would against the
//! PostgreSQL constraints.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;

use crate::domain::entity::{
    auth_token::AuthToken,
    user::{NewUser, User},
};
use crate::domain::repository::{AuthTokenRepository, UserRepository};
use crate::domain::value_object::{
    auth_token_id::AuthTokenId, email::Email, user_id::UserId, user_name::UserName,
    user_role::UserRole,
};
use crate::error::{AuthError, AuthResult, UniqueField};

#[derive(Default)]
struct MemoryState {
    users: HashMap<UserId, User>,
    last_user_id: i64,
    tokens: HashMap<AuthTokenId, AuthToken>,
}

/// In-memory auth repository
#[derive(Default, Clone)]
pub struct InMemoryAuthRepository {
    state: Arc<RwLock<MemoryState>>,
}

impl InMemoryAuthRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users
    pub async fn user_count(&self) -> usize {
        self.state.read().await.users.len()
    }

    /// Number of stored tokens owned by `user_id`, expired ones included
    pub async fn token_count(&self, user_id: UserId) -> usize {
        self.state
            .read()
            .await
            .tokens
            .values()
            .filter(|t| t.user_id == user_id)
            .count()
    }

    /// Change a user's role. Returns `false` if the user doesn't exist.
    pub async fn set_user_role(&self, user_id: UserId, role: UserRole) -> bool {
        let mut state = self.state.write().await;
        match state.users.get_mut(&user_id) {
            Some(user) => {
                user.user_role = role;
                user.updated_at = Utc::now();
                true
            }
            None => false,
        }
    }
}

// ============================================================================
// User Repository Implementation
// ============================================================================

impl UserRepository for InMemoryAuthRepository {
    async fn insert(&self, user: NewUser) -> AuthResult<User> {
        let mut state = self.state.write().await;

        if state
            .users
            .values()
            .any(|u| u.user_name.canonical() == user.user_name.canonical())
        {
            return Err(AuthError::Duplicate(UniqueField::UserName));
        }
        if state.users.values().any(|u| u.email == user.email) {
            return Err(AuthError::Duplicate(UniqueField::Email));
        }

        state.last_user_id += 1;
        let user = user.into_user(UserId::new(state.last_user_id), Utc::now());
        state.users.insert(user.user_id, user.clone());

        Ok(user)
    }

    async fn find_by_id(&self, user_id: UserId) -> AuthResult<Option<User>> {
        Ok(self.state.read().await.users.get(&user_id).cloned())
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        let state = self.state.read().await;
        Ok(state.users.values().find(|u| &u.email == email).cloned())
    }

    async fn exists_by_user_name(&self, user_name: &UserName) -> AuthResult<bool> {
        let state = self.state.read().await;
        Ok(state
            .users
            .values()
            .any(|u| u.user_name.canonical() == user_name.canonical()))
    }

    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool> {
        let state = self.state.read().await;
        Ok(state.users.values().any(|u| &u.email == email))
    }
}

// ============================================================================
// Auth Token Repository Implementation
// ============================================================================

impl AuthTokenRepository for InMemoryAuthRepository {
    async fn create(&self, token: &AuthToken) -> AuthResult<()> {
        let mut state = self.state.write().await;
        if !state.users.contains_key(&token.user_id) {
            return Err(AuthError::Internal(format!(
                "Token owner {} does not exist",
                token.user_id
            )));
        }
        state.tokens.insert(token.token_id, token.clone());
        Ok(())
    }

    async fn find_active(&self, token_id: AuthTokenId) -> AuthResult<Option<AuthToken>> {
        let state = self.state.read().await;
        Ok(state
            .tokens
            .get(&token_id)
            .filter(|t| !t.is_expired())
            .cloned())
    }

    async fn touch(&self, token: &AuthToken) -> AuthResult<()> {
        let mut state = self.state.write().await;
        if let Some(stored) = state.tokens.get_mut(&token.token_id) {
            stored.last_used_at = token.last_used_at;
        }
        Ok(())
    }

    async fn delete_all_for_user(&self, user_id: UserId) -> AuthResult<u64> {
        let mut state = self.state.write().await;
        let before = state.tokens.len();
        state.tokens.retain(|_, t| t.user_id != user_id);
        Ok((before - state.tokens.len()) as u64)
    }

    async fn cleanup_expired(&self) -> AuthResult<u64> {
        let mut state = self.state.write().await;
        let now_ms = Utc::now().timestamp_millis();
        let before = state.tokens.len();
        state.tokens.retain(|_, t| !t.is_expired_at(now_ms));
        let deleted = (before - state.tokens.len()) as u64;

        tracing::info!(tokens_deleted = deleted, "Cleaned up expired auth tokens");

        Ok(deleted)
    }
}
