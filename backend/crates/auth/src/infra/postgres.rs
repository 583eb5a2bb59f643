//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::{
    auth_token::AuthToken,
    user::{NewUser, User},
};
use crate::domain::repository::{AuthTokenRepository, UserRepository};
use crate::domain::value_object::{
    auth_token_id::AuthTokenId, email::Email, user_id::UserId, user_name::UserName,
    user_password::UserPassword, user_role::UserRole,
};
use crate::error::{AuthError, AuthResult, UniqueField};

/// SQLSTATE for unique_violation
const UNIQUE_VIOLATION: &str = "23505";

/// Constraint names from the migrations
const USERNAME_UNIQUE_CONSTRAINT: &str = "users_username_canonical_key";
const EMAIL_UNIQUE_CONSTRAINT: &str = "users_email_key";

/// PostgreSQL-backed auth repository
#[derive(Clone)]
pub struct PgAuthRepository {
    pool: PgPool,
}

impl PgAuthRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Map a unique violation on a known constraint to `Duplicate`
fn map_insert_error(err: sqlx::Error) -> AuthError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) {
            match db_err.constraint() {
                Some(USERNAME_UNIQUE_CONSTRAINT) => {
                    return AuthError::Duplicate(UniqueField::UserName);
                }
                Some(EMAIL_UNIQUE_CONSTRAINT) => return AuthError::Duplicate(UniqueField::Email),
                _ => {}
            }
        }
    }
    AuthError::Database(err)
}

// ============================================================================
// User Repository Implementation
// ============================================================================

impl UserRepository for PgAuthRepository {
    async fn insert(&self, user: NewUser) -> AuthResult<User> {
        let (user_id, created_at) = sqlx::query_as::<_, (i64, DateTime<Utc>)>(
            r#"
            INSERT INTO users (
                username,
                username_canonical,
                email,
                password_hash,
                user_role
            ) VALUES ($1, $2, $3, $4, $5)
            RETURNING user_id, created_at
            "#,
        )
        .bind(user.user_name.original())
        .bind(user.user_name.canonical())
        .bind(user.email.as_str())
        .bind(user.password.as_phc_string())
        .bind(user.user_role.code())
        .fetch_one(&self.pool)
        .await
        .map_err(map_insert_error)?;

        Ok(user.into_user(UserId::new(user_id), created_at))
    }

    async fn find_by_id(&self, user_id: UserId) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT
                user_id,
                username,
                email,
                password_hash,
                user_role,
                created_at,
                updated_at
            FROM users
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.as_i64())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT
                user_id,
                username,
                email,
                password_hash,
                user_role,
                created_at,
                updated_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn exists_by_user_name(&self, user_name: &UserName) -> AuthResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE username_canonical = $1)",
        )
        .bind(user_name.canonical())
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
                .bind(email.as_str())
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }
}

// ============================================================================
// Auth Token Repository Implementation
// ============================================================================

impl AuthTokenRepository for PgAuthRepository {
    async fn create(&self, token: &AuthToken) -> AuthResult<()> {
        sqlx::query(
            r#"
            INSERT INTO auth_tokens (
                token_id,
                user_id,
                expires_at_ms,
                created_at,
                last_used_at
            ) VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(token.token_id.as_uuid())
        .bind(token.user_id.as_i64())
        .bind(token.expires_at_ms)
        .bind(token.created_at)
        .bind(token.last_used_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_active(&self, token_id: AuthTokenId) -> AuthResult<Option<AuthToken>> {
        let now_ms = Utc::now().timestamp_millis();

        let row = sqlx::query_as::<_, AuthTokenRow>(
            r#"
            SELECT
                token_id,
                user_id,
                expires_at_ms,
                created_at,
                last_used_at
            FROM auth_tokens
            WHERE token_id = $1
              AND (expires_at_ms IS NULL OR expires_at_ms > $2)
            "#,
        )
        .bind(token_id.as_uuid())
        .bind(now_ms)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(AuthTokenRow::into_auth_token))
    }

    async fn touch(&self, token: &AuthToken) -> AuthResult<()> {
        sqlx::query("UPDATE auth_tokens SET last_used_at = $2 WHERE token_id = $1")
            .bind(token.token_id.as_uuid())
            .bind(token.last_used_at)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn delete_all_for_user(&self, user_id: UserId) -> AuthResult<u64> {
        let deleted = sqlx::query("DELETE FROM auth_tokens WHERE user_id = $1")
            .bind(user_id.as_i64())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted)
    }

    async fn cleanup_expired(&self) -> AuthResult<u64> {
        let now_ms = Utc::now().timestamp_millis();

        let deleted = sqlx::query(
            "DELETE FROM auth_tokens WHERE expires_at_ms IS NOT NULL AND expires_at_ms <= $1",
        )
        .bind(now_ms)
        .execute(&self.pool)
        .await?
        .rows_affected();

        tracing::info!(tokens_deleted = deleted, "Cleaned up expired auth tokens");

        Ok(deleted)
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    user_id: i64,
    username: String,
    email: String,
    password_hash: String,
    user_role: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> AuthResult<User> {
        let password = UserPassword::from_phc_string(self.password_hash).map_err(|e| {
            AuthError::Internal(format!("Invalid password hash for user {}: {e}", self.user_id))
        })?;

        Ok(User {
            user_id: UserId::new(self.user_id),
            user_name: UserName::from_db(self.username),
            email: Email::from_db(self.email),
            password,
            user_role: UserRole::from_db(self.user_role.as_deref()),
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct AuthTokenRow {
    token_id: Uuid,
    user_id: i64,
    expires_at_ms: Option<i64>,
    created_at: DateTime<Utc>,
    last_used_at: DateTime<Utc>,
}

impl AuthTokenRow {
    fn into_auth_token(self) -> AuthToken {
        AuthToken {
            token_id: AuthTokenId::from_uuid(self.token_id),
            user_id: UserId::new(self.user_id),
            expires_at_ms: self.expires_at_ms,
            created_at: self.created_at,
            last_used_at: self.last_used_at,
        }
    }
}
