//! Nullable clock — deterministic time for testing.

use std::cell::Cell;
use vox_types::Timestamp;

/// A deterministic clock for testing.
///
/// Time only advances when you tell it to.
pub struct NullClock {
    current: Cell<i64>,
}

impl NullClock {
    pub fn new(initial_secs: i64) -> Self {
        Self {
            current: Cell::new(initial_secs),
        }
    }

    /// Get the current time.
    pub fn now(&self) -> Timestamp {
        Timestamp::from_unix_seconds(self.current.get())
    }

    /// Advance time by a number of seconds.
    pub fn advance(&self, secs: i64) {
        self.current.set(self.current.get() + secs);
    }

    /// Set the time to a specific value.
    pub fn set(&self, secs: i64) {
        self.current.set(secs);
    }
}
