use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use auth::domain::entity::{
    auth_token::AuthToken,
    user::{NewUser, User},
};
use auth::domain::value_object::{
    auth_token_id::AuthTokenId, email::Email, user_id::UserId, user_name::UserName,
};
use auth::store::{AuthTokenRepository, UserRepository};
use auth::{AuthConfig, AuthError, AuthResult, InMemoryAuthRepository, auth_router_generic};
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

const PASSWORD: &str = "Secret123";
const STORE_DETAIL: &str = "connection refused by 10.0.0.7:5432";

/// In-memory store whose writes and email lookups fail once broken
///
/// Token lookups keep working so authenticated routes still reach their
/// handler.
#[derive(Clone, Default)]
struct FlakyRepository {
    inner: InMemoryAuthRepository,
    broken: Arc<AtomicBool>,
}

impl FlakyRepository {
    fn break_store(&self) {
        self.broken.store(true, Ordering::SeqCst);
    }

    fn check(&self) -> AuthResult<()> {
        if self.broken.load(Ordering::SeqCst) {
            Err(AuthError::Internal(STORE_DETAIL.to_string()))
        } else {
            Ok(())
        }
    }
}

impl UserRepository for FlakyRepository {
    async fn insert(&self, user: NewUser) -> AuthResult<User> {
        self.check()?;
        self.inner.insert(user).await
    }

    async fn find_by_id(&self, user_id: UserId) -> AuthResult<Option<User>> {
        self.inner.find_by_id(user_id).await
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        self.check()?;
        self.inner.find_by_email(email).await
    }

    async fn exists_by_user_name(&self, user_name: &UserName) -> AuthResult<bool> {
        self.inner.exists_by_user_name(user_name).await
    }

    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool> {
        self.inner.exists_by_email(email).await
    }
}

impl AuthTokenRepository for FlakyRepository {
    async fn create(&self, token: &AuthToken) -> AuthResult<()> {
        self.check()?;
        self.inner.create(token).await
    }

    async fn find_active(&self, token_id: AuthTokenId) -> AuthResult<Option<AuthToken>> {
        self.inner.find_active(token_id).await
    }

    async fn touch(&self, token: &AuthToken) -> AuthResult<()> {
        self.inner.touch(token).await
    }

    async fn delete_all_for_user(&self, user_id: UserId) -> AuthResult<u64> {
        self.check()?;
        self.inner.delete_all_for_user(user_id).await
    }

    async fn cleanup_expired(&self) -> AuthResult<u64> {
        self.inner.cleanup_expired().await
    }
}

fn spawn_app() -> (Router, FlakyRepository) {
    let repo = FlakyRepository::default();
    (auth_router_generic(repo.clone(), AuthConfig::for_tests()), repo)
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, String) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

async fn post_json(app: &Router, uri: &str, body: Value) -> (StatusCode, String) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

fn assert_failure(status: StatusCode, body: &str, message: &str) {
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = serde_json::from_str(body).unwrap();
    assert_eq!(body, json!({ "error": message }));
    assert!(!body.to_string().contains("10.0.0.7"));
}

#[tokio::test]
async fn test_signup_store_failure() {
    let (app, repo) = spawn_app();
    repo.break_store();

    let (status, body) = post_json(
        &app,
        "/signup",
        json!({ "username": "alice", "email": "alice@example.com", "password": PASSWORD }),
    )
    .await;

    assert_failure(
        status,
        &body,
        "An error occurred while signing up. Please try again.",
    );
}

#[tokio::test]
async fn test_login_store_failure() {
    let (app, repo) = spawn_app();
    let (status, _) = post_json(
        &app,
        "/signup",
        json!({ "username": "alice", "email": "alice@example.com", "password": PASSWORD }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    repo.break_store();

    let (status, body) = post_json(
        &app,
        "/login",
        json!({ "email": "alice@example.com", "password": PASSWORD }),
    )
    .await;

    assert_failure(
        status,
        &body,
        "An error occurred while logging in. Please try again.",
    );
}

#[tokio::test]
async fn test_logout_store_failure() {
    let (app, repo) = spawn_app();
    post_json(
        &app,
        "/signup",
        json!({ "username": "alice", "email": "alice@example.com", "password": PASSWORD }),
    )
    .await;
    let (status, body) = post_json(
        &app,
        "/login",
        json!({ "email": "alice@example.com", "password": PASSWORD }),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    let body: Value = serde_json::from_str(&body).unwrap();
    let token = body["token"].as_str().unwrap().to_string();
    repo.break_store();

    let request = Request::builder()
        .method("POST")
        .uri("/logout")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(&app, request).await;

    assert_failure(
        status,
        &body,
        "An error occurred while logging out. Please try again.",
    );
}
