//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::fmt;
use std::time::Duration;

use platform::password::PasswordHashParams;

/// Token secret length in bytes
pub const TOKEN_SECRET_LEN: usize = 32;

/// Default bearer token lifetime (1 week)
pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(7 * 24 * 3600);

/// Auth application configuration
#[derive(Clone)]
pub struct AuthConfig {
    /// Secret key for HMAC-signing bearer tokens
    pub token_secret: [u8; TOKEN_SECRET_LEN],
    /// Bearer token lifetime; `None` never expires
    pub token_ttl: Option<Duration>,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
    /// Argon2id cost
    pub password_hash_params: PasswordHashParams,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_secret: [0u8; TOKEN_SECRET_LEN],
            token_ttl: Some(DEFAULT_TOKEN_TTL),
            password_pepper: None,
            password_hash_params: PasswordHashParams::default(),
        }
    }
}

impl AuthConfig {
    /// Create config with a random token secret (for development)
    ///
    /// Tokens issued under a random secret stop verifying after a restart.
    pub fn with_random_secret() -> Self {
        let mut secret = [0u8; TOKEN_SECRET_LEN];
        secret.copy_from_slice(&platform::crypto::random_bytes(TOKEN_SECRET_LEN));
        Self {
            token_secret: secret,
            ..Default::default()
        }
    }

    /// Random secret and the cheapest Argon2 parameters
    pub fn for_tests() -> Self {
        Self {
            password_hash_params: PasswordHashParams::minimal(),
            ..Self::with_random_secret()
        }
    }

    /// Token TTL as a chrono duration, if tokens expire
    pub fn token_ttl_chrono(&self) -> Result<Option<chrono::Duration>, chrono::OutOfRangeError> {
        self.token_ttl.map(chrono::Duration::from_std).transpose()
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("token_secret", &"[REDACTED]")
            .field("token_ttl", &self.token_ttl)
            .field(
                "password_pepper",
                &self.password_pepper.as_ref().map(|_| "[REDACTED]"),
            )
            .field("password_hash_params", &self.password_hash_params)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_ttl_is_one_week() {
        let config = AuthConfig::default();
        assert_eq!(config.token_ttl, Some(Duration::from_secs(604_800)));
        assert_eq!(
            config.token_ttl_chrono().unwrap(),
            Some(chrono::Duration::days(7))
        );
    }

    #[test]
    fn test_no_ttl() {
        let config = AuthConfig {
            token_ttl: None,
            ..AuthConfig::for_tests()
        };
        assert_eq!(config.token_ttl_chrono().unwrap(), None);
    }

    #[test]
    fn test_random_secrets_differ() {
        let a = AuthConfig::with_random_secret();
        let b = AuthConfig::with_random_secret();
        assert_ne!(a.token_secret, b.token_secret);
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config = AuthConfig {
            password_pepper: Some(b"pepper".to_vec()),
            ..AuthConfig::for_tests()
        };
        let debug = format!("{:?}", config);
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("pepper\""));
    }
}
