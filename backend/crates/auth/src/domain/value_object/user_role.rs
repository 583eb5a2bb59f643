use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    #[default]
    User,
    Admin,
}

impl UserRole {
    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            UserRole::User => "user",
            UserRole::Admin => "admin",
        }
    }

    #[inline]
    pub const fn is_admin(&self) -> bool {
        matches!(self, UserRole::Admin)
    }

    /// Parse a stored role code. `None` for codes this build doesn't know.
    #[inline]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "user" => Some(UserRole::User),
            "admin" => Some(UserRole::Admin),
            _ => None,
        }
    }

    /// Role from the nullable `user_role` column
    ///
    /// Missing or unknown codes fall back to [`UserRole::User`]; unknown ones
    /// are logged.
    pub fn from_db(code: Option<&str>) -> Self {
        match code {
            None => UserRole::User,
            Some(code) => UserRole::from_code(code).unwrap_or_else(|| {
                tracing::warn!(user_role = %code, "Unknown user role code, treating as user");
                UserRole::User
            }),
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
