//! Session tracking.
//!
//! An explicit, mutex-guarded value owned by the node — sessions are never
//! process-global state. Tokens are opaque and expire only on logout.

use std::collections::HashMap;
use std::sync::Mutex;

use vox_types::{SessionToken, Username};

/// Maps live session tokens to the identity they were issued to.
pub struct SessionStore {
    sessions: Mutex<HashMap<SessionToken, Username>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Issue a fresh session token for `user`.
    pub fn open(&self, user: &Username) -> SessionToken {
        let token = SessionToken::random();
        self.sessions
            .lock()
            .expect("session store lock poisoned")
            .insert(token, user.clone());
        token
    }

    /// Resolve a token to its identity, if the session is live.
    pub fn identity(&self, token: &SessionToken) -> Option<Username> {
        self.sessions
            .lock()
            .expect("session store lock poisoned")
            .get(token)
            .cloned()
    }

    /// End a session. Unknown tokens are ignored.
    pub fn close(&self, token: &SessionToken) {
        self.sessions
            .lock()
            .expect("session store lock poisoned")
            .remove(token);
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}
