//! Timestamp type used throughout the platform.
//!
//! Timestamps are UTC instants, persisted as RFC 3339 / ISO 8601 strings.
//! Core operations never read the clock themselves — callers pass `now`
//! explicitly, which keeps expiry logic deterministic under test.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A UTC instant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Get the current system time as a `Timestamp`.
    pub fn now() -> Self {
        Self(Utc::now())
    }

    pub fn new(instant: DateTime<Utc>) -> Self {
        Self(instant)
    }

    /// Build a timestamp from Unix epoch seconds.
    ///
    /// # Panics
    /// Panics if `secs` is outside the representable range.
    pub fn from_unix_seconds(secs: i64) -> Self {
        Self(Utc.timestamp_opt(secs, 0).single().expect("timestamp out of range"))
    }

    /// This instant plus a number of seconds.
    pub fn plus_seconds(&self, secs: u64) -> Self {
        Self(self.0 + chrono::Duration::seconds(secs as i64))
    }

    /// Whether this instant is at or after `other`.
    pub fn is_at_or_after(&self, other: Timestamp) -> bool {
        self.0 >= other.0
    }

    /// Whole seconds from `now` until this instant; negative once passed.
    pub fn seconds_until(&self, now: Timestamp) -> i64 {
        (self.0 - now.0).num_seconds()
    }

    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}
