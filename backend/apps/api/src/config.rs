//! Server Configuration
//!
//! Read once at startup from the environment (after `.env` is loaded).

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, bail};
use auth::AuthConfig;
use auth::config::TOKEN_SECRET_LEN;
use base64::Engine;
use base64::engine::general_purpose;

const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:31113";
const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:40922,http://127.0.0.1:40922";
const DEFAULT_TOKEN_TTL_SECS: u64 = 7 * 24 * 3600;

/// API server configuration
#[derive(Debug)]
pub struct ApiConfig {
    pub database_url: String,
    pub database_max_connections: u32,
    pub bind_addr: SocketAddr,
    pub frontend_origins: Vec<String>,
    pub auth: AuthConfig,
}

impl ApiConfig {
    /// Load from process environment
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok(), cfg!(debug_assertions))
    }

    /// Load from any key lookup
    ///
    /// Outside debug builds `AUTH_TOKEN_SECRET` is mandatory.
    pub fn from_lookup<F>(lookup: F, debug_build: bool) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").context("DATABASE_URL must be set")?;

        let database_max_connections = match lookup("DATABASE_MAX_CONNECTIONS") {
            Some(v) => v
                .trim()
                .parse()
                .context("DATABASE_MAX_CONNECTIONS must be a positive integer")?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        let bind_addr = lookup("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .trim()
            .parse()
            .context("BIND_ADDR must be a socket address such as 0.0.0.0:31113")?;

        let frontend_origins = lookup("FRONTEND_ORIGINS")
            .unwrap_or_else(|| DEFAULT_FRONTEND_ORIGINS.to_string())
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        let token_secret = match lookup("AUTH_TOKEN_SECRET") {
            Some(b64) => decode_secret(&b64)?,
            None if debug_build => {
                tracing::warn!("AUTH_TOKEN_SECRET not set, using a random secret");
                AuthConfig::with_random_secret().token_secret
            }
            None => bail!("AUTH_TOKEN_SECRET must be set in production"),
        };

        let token_ttl_secs = match lookup("AUTH_TOKEN_TTL_SECS") {
            Some(v) => v
                .trim()
                .parse()
                .context("AUTH_TOKEN_TTL_SECS must be a non-negative integer")?,
            None => DEFAULT_TOKEN_TTL_SECS,
        };

        let auth = AuthConfig {
            token_secret,
            // 0 disables expiry
            token_ttl: (token_ttl_secs > 0).then(|| Duration::from_secs(token_ttl_secs)),
            password_pepper: lookup("AUTH_PASSWORD_PEPPER")
                .filter(|p| !p.is_empty())
                .map(String::into_bytes),
            ..AuthConfig::default()
        };

        Ok(Self {
            database_url,
            database_max_connections,
            bind_addr,
            frontend_origins,
            auth,
        })
    }
}

fn decode_secret(b64: &str) -> anyhow::Result<[u8; TOKEN_SECRET_LEN]> {
    let bytes = general_purpose::STANDARD
        .decode(b64.trim())
        .context("AUTH_TOKEN_SECRET must be base64")?;

    bytes.try_into().map_err(|bytes: Vec<u8>| {
        anyhow::anyhow!(
            "AUTH_TOKEN_SECRET must decode to {} bytes, got {}",
            TOKEN_SECRET_LEN,
            bytes.len()
        )
    })
}
