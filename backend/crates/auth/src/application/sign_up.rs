//! Sign Up Use Case
//!
//! Creates a new user account.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::password_hasher::hash_password;
use crate::domain::entity::user::NewUser;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    email::Email, user_id::UserId, user_name::UserName, user_password::RawPassword,
};
use crate::error::{AuthAction, AuthError, AuthResult, UniqueField};

/// Sign up input
///
/// Fields are optional so that a missing field is reported as a validation
/// message rather than a malformed body.
#[derive(Default)]
pub struct SignUpInput {
    pub user_name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Sign up output
pub struct SignUpOutput {
    pub user_id: UserId,
}

/// Sign up use case
pub struct SignUpUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<AuthConfig>,
}

impl<U> SignUpUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<AuthConfig>) -> Self {
        Self { user_repo, config }
    }

    pub async fn execute(&self, input: SignUpInput) -> AuthResult<SignUpOutput> {
        self.run(input)
            .await
            .map_err(|e| e.during(AuthAction::SignUp))
    }

    async fn run(&self, input: SignUpInput) -> AuthResult<SignUpOutput> {
        let (user_name, email, raw_password) = self.validate(input).await?;

        let password = hash_password(self.config.clone(), raw_password).await?;

        // The store re-checks uniqueness; a concurrent signup surfaces as Duplicate
        let user = self
            .user_repo
            .insert(NewUser::new(user_name, email, password))
            .await?;

        tracing::info!(
            user_id = %user.user_id,
            user_name = %user.user_name,
            "User signed up"
        );

        Ok(SignUpOutput {
            user_id: user.user_id,
        })
    }

    /// Check every field, collecting one message per violated rule
    ///
    /// Uniqueness is only looked up for values that are otherwise valid.
    async fn validate(
        &self,
        input: SignUpInput,
    ) -> AuthResult<(UserName, Email, RawPassword)> {
        let mut errors: Vec<String> = Vec::new();

        let user_name = match UserName::new(input.user_name.unwrap_or_default()) {
            Ok(user_name) if self.user_repo.exists_by_user_name(&user_name).await? => {
                errors.push(UniqueField::UserName.message().to_string());
                None
            }
            Ok(user_name) => Some(user_name),
            Err(e) => {
                errors.push(e.to_string());
                None
            }
        };

        let email = match Email::new(input.email.unwrap_or_default()) {
            Ok(email) if self.user_repo.exists_by_email(&email).await? => {
                errors.push(UniqueField::Email.message().to_string());
                None
            }
            Ok(email) => Some(email),
            Err(e) => {
                errors.push(e.to_string());
                None
            }
        };

        let password = match RawPassword::new(input.password.unwrap_or_default()) {
            Ok(password) => Some(password),
            Err(violations) => {
                errors.extend(violations.iter().map(ToString::to_string));
                None
            }
        };

        match (user_name, email, password) {
            (Some(user_name), Some(email), Some(password)) => Ok((user_name, email, password)),
            _ => Err(AuthError::Validation(errors)),
        }
    }
}
