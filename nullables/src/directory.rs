//! Nullable user directory — a fixed identity set for testing.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use vox_ledger::UserDirectory;
use vox_store::StoreError;
use vox_types::{SessionToken, Username};

/// A directory backed by an in-memory identity set.
pub struct NullDirectory {
    users: Mutex<HashSet<Username>>,
    sessions: Mutex<HashMap<SessionToken, Username>>,
}

impl NullDirectory {
    pub fn new() -> Self {
        Self {
            users: Mutex::new(HashSet::new()),
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Create with a fixed set of known identities.
    pub fn with_users(names: &[&str]) -> Self {
        let dir = Self::new();
        for name in names {
            dir.add(name);
        }
        dir
    }

    pub fn add(&self, name: &str) {
        self.users.lock().unwrap().insert(Username::new(name));
    }

    /// Pre-authorize a session for `name` and return its token.
    pub fn open_session(&self, name: &str) -> SessionToken {
        let token = SessionToken::random();
        self.sessions
            .lock()
            .unwrap()
            .insert(token, Username::new(name));
        token
    }
}

impl Default for NullDirectory {
    fn default() -> Self {
        Self::new()
    }
}

impl UserDirectory for NullDirectory {
    fn exists(&self, user: &Username) -> Result<bool, StoreError> {
        Ok(self.users.lock().unwrap().contains(user))
    }

    fn current_identity(&self, session: &SessionToken) -> Option<Username> {
        self.sessions.lock().unwrap().get(session).cloned()
    }
}
