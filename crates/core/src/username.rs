//! Profile username type and parsing.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A profile username (the unique key of a profile record).
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    /// Maximum username length in characters.
    pub const MAX_LEN: usize = 64;

    /// Parse a username, validating length and character set.
    pub fn parse(username: impl Into<String>) -> crate::Result<Self> {
        let username = username.into();
        if username.is_empty() {
            return Err(crate::Error::InvalidUsername(
                "username cannot be empty".to_string(),
            ));
        }

        if username.len() > Self::MAX_LEN {
            return Err(crate::Error::InvalidUsername(format!(
                "username must be at most {} chars, got {}",
                Self::MAX_LEN,
                username.len()
            )));
        }

        for c in username.chars() {
            if !matches!(c, 'a'..='z' | 'A'..='Z' | '0'..='9' | '-' | '_' | '.') {
                return Err(crate::Error::InvalidUsername(format!(
                    "invalid character in username: {c}"
                )));
            }
        }

        Ok(Self(username))
    }

    /// Get the username string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Username {
    type Error = crate::Error;

    fn try_from(value: String) -> crate::Result<Self> {
        Self::parse(value)
    }
}

impl From<Username> for String {
    fn from(value: Username) -> Self {
        value.0
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Username({self})")
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
