//! Auth Token Entity
//!
//! Server-side record behind a bearer token. The token string handed to the
//! client only references this row; deleting the row revokes the token.

use chrono::{DateTime, Duration, Utc};

use crate::domain::value_object::{auth_token_id::AuthTokenId, user_id::UserId};

/// Auth token entity
#[derive(Debug, Clone)]
pub struct AuthToken {
    /// Token ID (UUID v4)
    pub token_id: AuthTokenId,
    /// Owner
    pub user_id: UserId,
    /// Expiration (Unix timestamp ms); `None` never expires
    pub expires_at_ms: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub last_used_at: DateTime<Utc>,
}

impl AuthToken {
    /// Create a new token for `user_id`
    ///
    /// TTL is provided by the application layer (config), not hard-coded here.
    pub fn new(user_id: UserId, ttl: Option<Duration>) -> Self {
        let now = Utc::now();

        Self {
            token_id: AuthTokenId::new(),
            user_id,
            expires_at_ms: ttl.map(|ttl| (now + ttl).timestamp_millis()),
            created_at: now,
            last_used_at: now,
        }
    }

    /// Check if token has expired
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now().timestamp_millis())
    }

    pub fn is_expired_at(&self, now_ms: i64) -> bool {
        self.expires_at_ms.is_some_and(|expires| now_ms >= expires)
    }

    /// Update last use timestamp
    pub fn touch(&mut self) {
        self.last_used_at = Utc::now();
    }
}
