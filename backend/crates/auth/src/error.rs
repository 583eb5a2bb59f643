//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.
//!
//! Client-facing messages never carry internal detail: store and hashing
//! failures render a generic per-operation message, and the detail is only
//! written to the log.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::password::PasswordHashError;
use std::fmt;
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Message returned when the request body can't be read as the expected JSON
pub const INVALID_BODY_MESSAGE: &str = "The request body must be a valid JSON object.";

/// Umbrella message for 422 responses (logs only; the body lists the fields)
const VALIDATION_MESSAGE: &str = "The given data was invalid.";

/// Fallback 500 message when no operation is known
const GENERIC_FAILURE_MESSAGE: &str = "An error occurred. Please try again.";

// ============================================================================
// Unique Fields
// ============================================================================

/// Columns with a uniqueness constraint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniqueField {
    UserName,
    Email,
}

impl UniqueField {
    /// Client-facing message for a taken value
    pub const fn message(&self) -> &'static str {
        match self {
            UniqueField::UserName => "This username is already in use.",
            UniqueField::Email => "This email address is already in use.",
        }
    }
}

impl fmt::Display for UniqueField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UniqueField::UserName => f.write_str("username"),
            UniqueField::Email => f.write_str("email"),
        }
    }
}

// ============================================================================
// Actions
// ============================================================================

/// The operation an internal failure happened in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthAction {
    SignUp,
    SignIn,
    SignOut,
    Authenticate,
}

impl AuthAction {
    /// Client-facing 500 message
    pub const fn failure_message(&self) -> &'static str {
        match self {
            AuthAction::SignUp => "An error occurred while signing up. Please try again.",
            AuthAction::SignIn => "An error occurred while logging in. Please try again.",
            AuthAction::SignOut => "An error occurred while logging out. Please try again.",
            AuthAction::Authenticate => GENERIC_FAILURE_MESSAGE,
        }
    }
}

impl fmt::Display for AuthAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AuthAction::SignUp => "sign up",
            AuthAction::SignIn => "login",
            AuthAction::SignOut => "logout",
            AuthAction::Authenticate => "authentication",
        })
    }
}

// ============================================================================
// Auth Error
// ============================================================================

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Input failed validation; one client-facing message per violated rule
    #[error("Validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    /// Unknown email or wrong password
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Missing, malformed, revoked or expired bearer token
    #[error("Unauthenticated")]
    Unauthenticated,

    /// Store rejected a duplicate value
    #[error("Duplicate {0}")]
    Duplicate(UniqueField),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Password hashing error
    #[error("Password hashing error: {0}")]
    PasswordHash(#[from] PasswordHashError),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Internal failure attributed to an operation
    #[error("{action} failed: {source}")]
    Failed {
        action: AuthAction,
        #[source]
        source: Box<AuthError>,
    },
}

impl AuthError {
    /// Attribute an internal failure to `action`
    ///
    /// Client errors pass through unchanged.
    pub fn during(self, action: AuthAction) -> Self {
        match self {
            AuthError::Database(_) | AuthError::PasswordHash(_) | AuthError::Internal(_) => {
                AuthError::Failed {
                    action,
                    source: Box::new(self),
                }
            }
            other => other,
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::Validation(_) | AuthError::Duplicate(_) => ErrorKind::UnprocessableEntity,
            AuthError::InvalidCredentials | AuthError::Unauthenticated => ErrorKind::Unauthorized,
            AuthError::Database(_)
            | AuthError::PasswordHash(_)
            | AuthError::Internal(_)
            | AuthError::Failed { .. } => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError (client-facing content only)
    pub fn to_app_error(&self) -> AppError {
        match self {
            AuthError::Validation(errors) => {
                AppError::unprocessable(VALIDATION_MESSAGE).with_errors(errors.clone())
            }
            AuthError::Duplicate(field) => {
                AppError::unprocessable(VALIDATION_MESSAGE).with_errors([field.message()])
            }
            AuthError::InvalidCredentials => AppError::unauthorized("Invalid credentials."),
            AuthError::Unauthenticated => AppError::unauthorized("Unauthenticated."),
            AuthError::Failed { action, .. } => AppError::internal(action.failure_message()),
            AuthError::Database(_) | AuthError::PasswordHash(_) | AuthError::Internal(_) => {
                AppError::internal(GENERIC_FAILURE_MESSAGE)
            }
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Failed { action, source } => {
                tracing::error!(action = %action, error = %source, "Auth operation failed");
            }
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::PasswordHash(e) => {
                tracing::error!(error = %e, "Auth password hashing error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<JsonRejection> for AuthError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(rejection = %rejection.body_text(), "Rejected request body");
        AuthError::Validation(vec![INVALID_BODY_MESSAGE.to_string()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AuthError::Validation(vec![]).status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            AuthError::Duplicate(UniqueField::Email).status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            AuthError::InvalidCredentials.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AuthError::Unauthenticated.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AuthError::Internal("boom".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_during_wraps_internal_errors() {
        let err = AuthError::Internal("pool timed out".into()).during(AuthAction::SignIn);
        assert!(matches!(
            err,
            AuthError::Failed {
                action: AuthAction::SignIn,
                ..
            }
        ));

        let app = err.to_app_error();
        assert_eq!(app.status_code(), 500);
        assert_eq!(
            app.message(),
            "An error occurred while logging in. Please try again."
        );
        // Detail stays in the log line
        assert!(err.to_string().contains("pool timed out"));
        assert!(!app.message().contains("pool timed out"));
    }

    #[test]
    fn test_during_keeps_client_errors() {
        let err = AuthError::InvalidCredentials.during(AuthAction::SignIn);
        assert!(matches!(err, AuthError::InvalidCredentials));

        let err = AuthError::Duplicate(UniqueField::UserName).during(AuthAction::SignUp);
        assert!(matches!(err, AuthError::Duplicate(UniqueField::UserName)));
    }

    #[test]
    fn test_failure_messages() {
        assert_eq!(
            AuthAction::SignUp.failure_message(),
            "An error occurred while signing up. Please try again."
        );
        assert_eq!(
            AuthAction::SignOut.failure_message(),
            "An error occurred while logging out. Please try again."
        );
    }

    #[test]
    fn test_duplicate_renders_uniqueness_message() {
        let app = AuthError::Duplicate(UniqueField::UserName).to_app_error();
        assert_eq!(app.errors(), ["This username is already in use."]);

        let app = AuthError::Duplicate(UniqueField::Email).to_app_error();
        assert_eq!(app.errors(), ["This email address is already in use."]);
    }

    #[test]
    fn test_credential_messages() {
        assert_eq!(
            AuthError::InvalidCredentials.to_app_error().message(),
            "Invalid credentials."
        );
        assert_eq!(
            AuthError::Unauthenticated.to_app_error().message(),
            "Unauthenticated."
        );
    }
}
