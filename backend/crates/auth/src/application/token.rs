//! Bearer Token Encoding
//!
//! A bearer token is `<token_id>.<signature>` where the signature is the
//! Base64url (no padding) HMAC-SHA256 of the token ID under the configured
//! secret. The signature makes token IDs unforgeable; the stored row makes
//! them revocable.

use std::fmt;

use platform::crypto::{from_base64url, hmac_sha256, to_base64url, verify_hmac_sha256};

use crate::domain::value_object::auth_token_id::AuthTokenId;

/// Signed bearer token string
///
/// Debug output is redacted; the string is a credential.
#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken(String);

impl BearerToken {
    /// Sign `token_id` under `secret`
    pub fn sign(secret: &[u8], token_id: AuthTokenId) -> Self {
        let id = token_id.to_string();
        let signature = hmac_sha256(secret, id.as_bytes());
        Self(format!("{}.{}", id, to_base64url(&signature)))
    }

    /// Verify the signature and extract the token ID
    ///
    /// `None` for anything malformed or signed under another secret.
    pub fn verify(secret: &[u8], token: &str) -> Option<AuthTokenId> {
        let (id, signature_b64) = token.split_once('.')?;
        let signature = from_base64url(signature_b64).ok()?;

        if !verify_hmac_sha256(secret, id.as_bytes(), &signature) {
            return None;
        }

        AuthTokenId::parse_str(id).ok()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("BearerToken").field(&"[REDACTED]").finish()
    }
}
