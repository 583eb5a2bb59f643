//! Password hashing off the async runtime
//!
//! Argon2id is deliberately slow and memory hungry, so every hash and verify
//! runs on tokio's blocking pool with the caller's span entered.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::value_object::user_password::{RawPassword, UserPassword};
use crate::error::{AuthError, AuthResult};

/// Hash a validated password
pub async fn hash_password(config: Arc<AuthConfig>, raw: RawPassword) -> AuthResult<UserPassword> {
    let span = tracing::Span::current();
    tokio::task::spawn_blocking(move || {
        span.in_scope(|| {
            UserPassword::from_raw(&raw, config.pepper(), &config.password_hash_params)
                .map_err(AuthError::from)
        })
    })
    .await
    .map_err(|e| AuthError::Internal(format!("Password hashing task failed: {e}")))?
}

/// Verify a password against a stored hash
///
/// With `stored = None` the password is checked against a dummy hash priced
/// like a real one and the result is always `false`.
pub async fn verify_password(
    config: Arc<AuthConfig>,
    stored: Option<UserPassword>,
    raw: RawPassword,
) -> AuthResult<bool> {
    let span = tracing::Span::current();
    tokio::task::spawn_blocking(move || {
        span.in_scope(|| match stored {
            Some(hash) => hash.verify(&raw, config.pepper()),
            None => {
                let dummy = UserPassword::dummy(&config.password_hash_params);
                let _ = dummy.verify(&raw, config.pepper());
                false
            }
        })
    })
    .await
    .map_err(|e| AuthError::Internal(format!("Password verification task failed: {e}")))
}
