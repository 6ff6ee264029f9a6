//! Voter identity and session types.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// A voter/owner identity as known to the user directory.
///
/// Usernames are compared exactly; surrounding whitespace is stripped at
/// construction so `"bob "` and `"bob"` name the same identity.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Username(String);

impl Username {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into().trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Username {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Username {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

/// An opaque session token handed out at login and resolved back to a
/// [`Username`] by the user directory.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionToken(Uuid);

impl SessionToken {
    /// Generate a fresh random session token.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for SessionToken {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn username_trims_whitespace() {
        assert_eq!(Username::new("  bob "), Username::new("bob"));
    }

    #[test]
    fn blank_username_is_empty() {
        assert!(Username::new("   ").is_empty());
    }

    #[test]
    fn session_tokens_are_unique() {
        assert_ne!(SessionToken::random(), SessionToken::random());
    }
}
