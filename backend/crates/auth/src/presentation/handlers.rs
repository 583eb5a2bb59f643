//! HTTP Handlers

use axum::extract::State;
use axum::{Extension, Json};
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::{
    AuthenticatedUser, SignInInput, SignInUseCase, SignOutUseCase, SignUpInput, SignUpUseCase,
};
use crate::domain::repository::{AuthTokenRepository, UserRepository};
use crate::error::AuthResult;
use crate::presentation::dto::{
    CurrentUserResponse, MessageResponse, SignInRequest, SignInResponse, SignUpRequest,
    UserResponse,
};
use crate::presentation::extract::JsonBody;

const SIGN_UP_MESSAGE: &str = "Signup successful";
const SIGN_OUT_MESSAGE: &str = "You have logged out.";

/// Repository bounds shared by every auth handler
pub trait AuthRepositories:
    UserRepository + AuthTokenRepository + Clone + Send + Sync + 'static
{
}

impl<R> AuthRepositories for R where
    R: UserRepository + AuthTokenRepository + Clone + Send + Sync + 'static
{
}

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<R>
where
    R: AuthRepositories,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
}

// ============================================================================
// Sign Up
// ============================================================================

/// POST /api/auth/signup
pub async fn sign_up<R>(
    State(state): State<AuthAppState<R>>,
    JsonBody(req): JsonBody<SignUpRequest>,
) -> AuthResult<Json<MessageResponse>>
where
    R: AuthRepositories,
{
    let use_case = SignUpUseCase::new(state.repo.clone(), state.config.clone());

    let input = SignUpInput {
        user_name: req.username,
        email: req.email,
        password: req.password,
    };

    use_case.execute(input).await?;

    Ok(Json(MessageResponse::new(SIGN_UP_MESSAGE)))
}

// ============================================================================
// Sign In
// ============================================================================

/// POST /api/auth/login
pub async fn sign_in<R>(
    State(state): State<AuthAppState<R>>,
    JsonBody(req): JsonBody<SignInRequest>,
) -> AuthResult<Json<SignInResponse>>
where
    R: AuthRepositories,
{
    let use_case = SignInUseCase::new(state.repo.clone(), state.repo.clone(), state.config.clone());

    let input = SignInInput {
        email: req.email,
        password: req.password,
    };

    let output = use_case.execute(input).await?;

    Ok(Json(SignInResponse {
        token: output.token.into_string(),
        user: UserResponse::from(&output.user),
        is_admin: output.is_admin,
    }))
}

// ============================================================================
// Sign Out (requires authentication)
// ============================================================================

/// POST /api/auth/logout
pub async fn sign_out<R>(
    State(state): State<AuthAppState<R>>,
    Extension(auth): Extension<AuthenticatedUser>,
) -> AuthResult<Json<MessageResponse>>
where
    R: AuthRepositories,
{
    let use_case = SignOutUseCase::new(state.repo.clone());
    use_case.execute(auth.user.user_id).await?;

    Ok(Json(MessageResponse::new(SIGN_OUT_MESSAGE)))
}

// ============================================================================
// Current User (requires authentication)
// ============================================================================

/// GET /api/auth/me
pub async fn current_user(
    Extension(auth): Extension<AuthenticatedUser>,
) -> Json<CurrentUserResponse> {
    Json(CurrentUserResponse {
        user: UserResponse::from(&auth.user),
        is_admin: auth.user.is_admin(),
    })
}
