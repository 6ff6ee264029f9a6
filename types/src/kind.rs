//! Poll kind — how many votes a single voter may cast.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The two kinds of poll.
///
/// Persisted and displayed as `"simple"` / `"multiple"`, the names the wire
/// format uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PollKind {
    /// One vote per voter.
    #[serde(rename = "simple")]
    Single,
    /// Unlimited votes per voter.
    #[serde(rename = "multiple")]
    Multi,
}

impl PollKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PollKind::Single => "simple",
            PollKind::Multi => "multiple",
        }
    }
}

impl fmt::Display for PollKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("unknown poll kind: {0:?} (expected \"simple\" or \"multiple\")")]
pub struct ParsePollKindError(String);

impl FromStr for PollKind {
    type Err = ParsePollKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "simple" => Ok(PollKind::Single),
            "multiple" => Ok(PollKind::Multi),
            other => Err(ParsePollKindError(other.to_string())),
        }
    }
}
