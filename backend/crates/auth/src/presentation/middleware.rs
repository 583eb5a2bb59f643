//! Auth Middleware
//!
//! Middleware for requiring authentication on protected routes.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use platform::bearer::extract_bearer_token;

use crate::application::AuthenticateUseCase;
use crate::error::AuthError;
use crate::presentation::handlers::{AuthAppState, AuthRepositories};

/// Middleware that requires a live bearer token
///
/// On success the caller is available to handlers as
/// `Extension<AuthenticatedUser>`; otherwise the request is answered with
/// 401 `{"error":"Unauthenticated."}`.
pub async fn require_auth<R>(
    State(state): State<AuthAppState<R>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError>
where
    R: AuthRepositories,
{
    let token = extract_bearer_token(req.headers())
        .map(str::to_owned)
        .ok_or(AuthError::Unauthenticated)?;

    let use_case =
        AuthenticateUseCase::new(state.repo.clone(), state.repo.clone(), state.config.clone());
    let authenticated = use_case.execute(&token).await?;

    req.extensions_mut().insert(authenticated);

    Ok(next.run(req).await)
}
