//! Authenticate Use Case
//!
//! Resolves a bearer token to the user it was issued to.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::token::BearerToken;
use crate::domain::entity::user::User;
use crate::domain::repository::{AuthTokenRepository, UserRepository};
use crate::domain::value_object::auth_token_id::AuthTokenId;
use crate::error::{AuthAction, AuthError, AuthResult};

/// The caller behind a live bearer token
///
/// Inserted into request extensions by `require_auth`.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user: User,
    pub token_id: AuthTokenId,
}

/// Authenticate use case
pub struct AuthenticateUseCase<U, T>
where
    U: UserRepository,
    T: AuthTokenRepository + Send + Sync + 'static,
{
    user_repo: Arc<U>,
    token_repo: Arc<T>,
    config: Arc<AuthConfig>,
}

impl<U, T> AuthenticateUseCase<U, T>
where
    U: UserRepository,
    T: AuthTokenRepository + Send + Sync + 'static,
{
    pub fn new(user_repo: Arc<U>, token_repo: Arc<T>, config: Arc<AuthConfig>) -> Self {
        Self {
            user_repo,
            token_repo,
            config,
        }
    }

    /// Fails with `Unauthenticated` unless the token is signed, stored and
    /// unexpired and its owner still exists.
    pub async fn execute(&self, bearer: &str) -> AuthResult<AuthenticatedUser> {
        self.run(bearer)
            .await
            .map_err(|e| e.during(AuthAction::Authenticate))
    }

    async fn run(&self, bearer: &str) -> AuthResult<AuthenticatedUser> {
        let token_id = BearerToken::verify(&self.config.token_secret, bearer)
            .ok_or(AuthError::Unauthenticated)?;

        let mut token = self
            .token_repo
            .find_active(token_id)
            .await?
            .ok_or(AuthError::Unauthenticated)?;

        let user = self
            .user_repo
            .find_by_id(token.user_id)
            .await?
            .ok_or(AuthError::Unauthenticated)?;

        // Update last use in background (fire and forget)
        token.touch();
        let repo = self.token_repo.clone();
        tokio::spawn(async move {
            if let Err(e) = repo.touch(&token).await {
                tracing::warn!(error = %e, "Failed to update token last use");
            }
        });

        Ok(AuthenticatedUser { user, token_id })
    }
}
