//! User Name Value Object
//!
//! The public handle a user signs up with.
//!
//! ## Rules
//! - Surrounding whitespace is trimmed; an all-whitespace name is missing
//! - Length: 3 to 10 characters (Unicode scalar values, not bytes)
//! - Uniqueness is case-insensitive: the canonical form is lowercase
//!
//! Each failed rule maps to exactly one client-facing message, which is the
//! error's `Display` output.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

// ============================================================================
// Constants
// ============================================================================

/// Minimum length for user name (in characters)
pub const USER_NAME_MIN_LENGTH: usize = 3;

/// Maximum length for user name (in characters)
pub const USER_NAME_MAX_LENGTH: usize = 10;

// ============================================================================
// Error Types
// ============================================================================

/// User name validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserNameError {
    #[error("Please enter a username.")]
    Empty,

    #[error("Username must be at least {min} characters long.", min = USER_NAME_MIN_LENGTH)]
    TooShort,

    #[error("Username must not be more than {max} characters long.", max = USER_NAME_MAX_LENGTH)]
    TooLong,
}

// ============================================================================
// User Name
// ============================================================================

/// Validated user name
///
/// Keeps the name as entered (for display) next to its canonical form (for
/// uniqueness checks).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserName {
    original: String,
    canonical: String,
}

impl UserName {
    /// Validate user input
    pub fn new(input: impl AsRef<str>) -> Result<Self, UserNameError> {
        let trimmed = input.as_ref().trim();

        if trimmed.is_empty() {
            return Err(UserNameError::Empty);
        }

        let length = trimmed.chars().count();
        if length < USER_NAME_MIN_LENGTH {
            return Err(UserNameError::TooShort);
        }
        if length > USER_NAME_MAX_LENGTH {
            return Err(UserNameError::TooLong);
        }

        Ok(Self::from_db(trimmed))
    }

    /// Rebuild from a stored value (already validated)
    pub fn from_db(original: impl Into<String>) -> Self {
        let original = original.into();
        let canonical = canonicalize(&original);
        Self {
            original,
            canonical,
        }
    }

    /// The name as entered (trimmed)
    pub fn original(&self) -> &str {
        &self.original
    }

    /// Lowercase form used for uniqueness
    pub fn canonical(&self) -> &str {
        &self.canonical
    }
}

fn canonicalize(name: &str) -> String {
    name.to_lowercase()
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.original)
    }
}

impl AsRef<str> for UserName {
    fn as_ref(&self) -> &str {
        &self.original
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_user_names() {
        assert!(UserName::new("bob").is_ok());
        assert!(UserName::new("alice_1234").is_ok());
        assert!(UserName::new("ÅsaÖberg").is_ok());
    }

    #[test]
    fn test_trims_surrounding_whitespace() {
        let name = UserName::new("  Alice  ").unwrap();
        assert_eq!(name.original(), "Alice");
        assert_eq!(name.canonical(), "alice");
    }

    #[test]
    fn test_empty_and_whitespace_are_missing() {
        assert_eq!(UserName::new(""), Err(UserNameError::Empty));
        assert_eq!(UserName::new("   \t"), Err(UserNameError::Empty));
    }

    #[test]
    fn test_length_bounds() {
        assert_eq!(UserName::new("ab"), Err(UserNameError::TooShort));
        assert!(UserName::new("abc").is_ok());
        assert!(UserName::new("abcdefghij").is_ok());
        assert_eq!(UserName::new("abcdefghijk"), Err(UserNameError::TooLong));
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        // 10 characters, 30 bytes
        assert!(UserName::new("日本語のユーザー名です").is_err());
        assert!(UserName::new("日本語のユーザー名で").is_ok());
        // 2 characters, 6 bytes
        assert_eq!(UserName::new("名前"), Err(UserNameError::TooShort));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(UserNameError::Empty.to_string(), "Please enter a username.");
        assert_eq!(
            UserNameError::TooShort.to_string(),
            "Username must be at least 3 characters long."
        );
        assert_eq!(
            UserNameError::TooLong.to_string(),
            "Username must not be more than 10 characters long."
        );
    }

    #[test]
    fn test_canonical_is_case_insensitive() {
        let a = UserName::new("Alice").unwrap();
        let b = UserName::new("ALICE").unwrap();
        assert_ne!(a.original(), b.original());
        assert_eq!(a.canonical(), b.canonical());
    }
}
