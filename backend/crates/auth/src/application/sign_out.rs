//! Sign Out Use Case
//!
//! Revokes every bearer token of the authenticated user.

use std::sync::Arc;

use crate::domain::repository::AuthTokenRepository;
use crate::domain::value_object::user_id::UserId;
use crate::error::{AuthAction, AuthResult};

/// Sign out use case
pub struct SignOutUseCase<T>
where
    T: AuthTokenRepository,
{
    token_repo: Arc<T>,
}

impl<T> SignOutUseCase<T>
where
    T: AuthTokenRepository,
{
    pub fn new(token_repo: Arc<T>) -> Self {
        Self { token_repo }
    }

    /// Returns the number of tokens revoked
    pub async fn execute(&self, user_id: UserId) -> AuthResult<u64> {
        let revoked = self
            .token_repo
            .delete_all_for_user(user_id)
            .await
            .map_err(|e| e.during(AuthAction::SignOut))?;

        tracing::info!(user_id = %user_id, tokens_revoked = revoked, "User logged out");
        Ok(revoked)
    }
}
