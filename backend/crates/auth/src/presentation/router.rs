//! Auth Router

use axum::{
    Router, middleware,
    routing::{get, post},
};
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::infra::postgres::PgAuthRepository;
use crate::presentation::handlers::{self, AuthAppState, AuthRepositories};
use crate::presentation::middleware::require_auth;

/// Create the Auth router with PostgreSQL repository
pub fn auth_router(repo: PgAuthRepository, config: AuthConfig) -> Router {
    auth_router_generic(repo, config)
}

/// Create a generic Auth router for any repository implementation
///
/// | Route | Auth |
/// |---|---|
/// | `POST /signup` | public |
/// | `POST /login` | public |
/// | `POST /logout` | bearer |
/// | `GET /me` | bearer |
pub fn auth_router_generic<R>(repo: R, config: AuthConfig) -> Router
where
    R: AuthRepositories,
{
    let state = AuthAppState {
        repo: Arc::new(repo),
        config: Arc::new(config),
    };

    let protected = Router::new()
        .route("/logout", post(handlers::sign_out::<R>))
        .route("/me", get(handlers::current_user))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_auth::<R>,
        ));

    Router::new()
        .route("/signup", post(handlers::sign_up::<R>))
        .route("/login", post(handlers::sign_in::<R>))
        .merge(protected)
        .with_state(state)
}
