//! User Password Value Object
//!
//! Domain value objects for user passwords.
//! Delegates to `platform::password` for cryptographic operations.
//!
//! ## Signup Policy
//! - Required (a whitespace-only password counts as missing)
//! - At least 6 characters, counted as typed
//! - At least one ASCII uppercase letter, one lowercase letter and one digit
//!
//! NFKC normalization is applied only to the bytes that are hashed.
//!
//! Login only checks that a password was given.
//!
//! ## Usage
//! ```rust
//! use auth::domain::value_object::user_password::{RawPassword, UserPassword};
//! use platform::password::PasswordHashParams;
//!
//! let raw = RawPassword::new("Secret123".to_string()).unwrap();
//! let hashed = UserPassword::from_raw(&raw, None, &PasswordHashParams::minimal()).unwrap();
//! assert!(hashed.verify(&raw, None));
//! ```

use platform::password::{ClearTextPassword, HashedPassword, PasswordHashError, PasswordHashParams};
use std::fmt;
use thiserror::Error;

/// Minimum password length at signup (in characters)
pub const PASSWORD_MIN_LENGTH: usize = 6;

// ============================================================================
// Error Types
// ============================================================================

/// Password policy violations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordError {
    #[error("Please enter a password.")]
    Empty,

    #[error("Password must be at least {min} characters long.", min = PASSWORD_MIN_LENGTH)]
    TooShort,

    #[error(
        "Password must contain at least one uppercase letter, one lowercase letter, and one number."
    )]
    MissingCharacterClass,
}

// ============================================================================
// Raw Password (User Input)
// ============================================================================

/// Raw password from user input
///
/// Memory is zeroized when dropped.
pub struct RawPassword(ClearTextPassword);

impl RawPassword {
    /// Validate a password chosen at signup
    ///
    /// Every violated rule is reported, except that a missing password
    /// reports only [`PasswordError::Empty`].
    pub fn new(raw: String) -> Result<Self, Vec<PasswordError>> {
        // Rules apply to the password as typed; normalization only affects hashing
        let errors = if is_blank(&raw) {
            vec![PasswordError::Empty]
        } else {
            let mut errors = Vec::new();
            if raw.chars().count() < PASSWORD_MIN_LENGTH {
                errors.push(PasswordError::TooShort);
            }
            if !has_required_classes(&raw) {
                errors.push(PasswordError::MissingCharacterClass);
            }
            errors
        };

        // Wrapped either way so the input is zeroized on drop
        let clear_text = ClearTextPassword::new(raw);
        if errors.is_empty() {
            Ok(Self(clear_text))
        } else {
            Err(errors)
        }
    }

    /// Accept a password presented at login (presence only)
    pub fn for_login(raw: String) -> Result<Self, PasswordError> {
        let blank = is_blank(&raw);
        let clear_text = ClearTextPassword::new(raw);
        if blank {
            return Err(PasswordError::Empty);
        }
        Ok(Self(clear_text))
    }

    /// Access the inner ClearTextPassword
    pub(crate) fn inner(&self) -> &ClearTextPassword {
        &self.0
    }
}

fn is_blank(password: &str) -> bool {
    password.trim().is_empty()
}

fn has_required_classes(password: &str) -> bool {
    let mut lower = false;
    let mut upper = false;
    let mut digit = false;
    for c in password.chars() {
        lower |= c.is_ascii_lowercase();
        upper |= c.is_ascii_uppercase();
        digit |= c.is_ascii_digit();
    }
    lower && upper && digit
}

impl fmt::Debug for RawPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RawPassword").field(&"[REDACTED]").finish()
    }
}

// ============================================================================
// User Password (Hashed, for storage)
// ============================================================================

/// Hashed user password for database storage
///
/// Stores password in Argon2id PHC string format.
#[derive(Clone, PartialEq, Eq)]
pub struct UserPassword(HashedPassword);

impl UserPassword {
    /// Hash a validated raw password
    ///
    /// CPU and memory heavy; callers on the async runtime go through
    /// `application::password_hasher`.
    pub fn from_raw(
        raw: &RawPassword,
        pepper: Option<&[u8]>,
        params: &PasswordHashParams,
    ) -> Result<Self, PasswordHashError> {
        raw.inner().hash(pepper, params).map(Self)
    }

    /// Create from PHC string (from database)
    pub fn from_phc_string(phc_string: impl Into<String>) -> Result<Self, PasswordHashError> {
        HashedPassword::from_phc_string(phc_string).map(Self)
    }

    /// A hash nothing verifies against, priced like a real one
    pub fn dummy(params: &PasswordHashParams) -> Self {
        Self(HashedPassword::dummy(params))
    }

    /// Get PHC string for database storage
    pub fn as_phc_string(&self) -> &str {
        self.0.as_phc_string()
    }

    /// Verify a raw password against this hash
    pub fn verify(&self, raw: &RawPassword, pepper: Option<&[u8]>) -> bool {
        self.0.verify(raw.inner(), pepper)
    }
}

impl fmt::Debug for UserPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}

impl fmt::Display for UserPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[HASHED_PASSWORD]")
    }
}

// ============================================================================
// Tests
// ============================================================================
