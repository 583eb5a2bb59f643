//! Sign In Use Case
//!
//! Verifies email + password and issues a bearer token.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::password_hasher::verify_password;
use crate::application::token::BearerToken;
use crate::domain::entity::{auth_token::AuthToken, user::User};
use crate::domain::repository::{AuthTokenRepository, UserRepository};
use crate::domain::value_object::{email::Email, user_password::RawPassword};
use crate::error::{AuthAction, AuthError, AuthResult};

/// Sign in input
#[derive(Default)]
pub struct SignInInput {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Sign in output
pub struct SignInOutput {
    /// Bearer token for the `Authorization` header
    pub token: BearerToken,
    pub user: User,
    pub is_admin: bool,
}

/// Sign in use case
pub struct SignInUseCase<U, T>
where
    U: UserRepository,
    T: AuthTokenRepository,
{
    user_repo: Arc<U>,
    token_repo: Arc<T>,
    config: Arc<AuthConfig>,
}

impl<U, T> SignInUseCase<U, T>
where
    U: UserRepository,
    T: AuthTokenRepository,
{
    pub fn new(user_repo: Arc<U>, token_repo: Arc<T>, config: Arc<AuthConfig>) -> Self {
        Self {
            user_repo,
            token_repo,
            config,
        }
    }

    pub async fn execute(&self, input: SignInInput) -> AuthResult<SignInOutput> {
        self.run(input)
            .await
            .map_err(|e| e.during(AuthAction::SignIn))
    }

    async fn run(&self, input: SignInInput) -> AuthResult<SignInOutput> {
        let (email, raw_password) = validate(input)?;

        let user = self.user_repo.find_by_email(&email).await?;

        // Unknown emails still pay for a verification
        let stored = user.as_ref().map(|u| u.password.clone());
        let password_valid = verify_password(self.config.clone(), stored, raw_password).await?;

        let user = match user {
            Some(user) if password_valid => user,
            _ => return Err(AuthError::InvalidCredentials),
        };

        let ttl = self
            .config
            .token_ttl_chrono()
            .map_err(|e| AuthError::Internal(format!("Invalid token TTL: {e}")))?;
        let auth_token = AuthToken::new(user.user_id, ttl);
        self.token_repo.create(&auth_token).await?;

        let token = BearerToken::sign(&self.config.token_secret, auth_token.token_id);

        tracing::info!(
            user_id = %user.user_id,
            token_id = %auth_token.token_id,
            "User logged in"
        );

        let is_admin = user.is_admin();
        Ok(SignInOutput {
            token,
            user,
            is_admin,
        })
    }
}

fn validate(input: SignInInput) -> AuthResult<(Email, RawPassword)> {
    let mut errors: Vec<String> = Vec::new();

    let email = Email::new(input.email.unwrap_or_default())
        .map_err(|e| errors.push(e.to_string()))
        .ok();
    let password = RawPassword::for_login(input.password.unwrap_or_default())
        .map_err(|e| errors.push(e.to_string()))
        .ok();

    match (email, password) {
        (Some(email), Some(password)) => Ok((email, password)),
        _ => Err(AuthError::Validation(errors)),
    }
}
