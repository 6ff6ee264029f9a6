//! The production user directory.
//!
//! Implements the [`UserDirectory`] capability the ledger consumes, backed
//! by the user store and the node's session store. Registration and login
//! live here too; password mechanics belong to an outer layer and are out
//! of scope.

use std::sync::Arc;

use vox_ledger::UserDirectory;
use vox_store::{StoreError, UserRecord, UserStore};
use vox_types::{SessionToken, UserId, Username};

use crate::session::SessionStore;
use crate::NodeError;

pub struct DirectoryService {
    users: Arc<dyn UserStore>,
    sessions: Arc<SessionStore>,
}

impl DirectoryService {
    pub fn new(users: Arc<dyn UserStore>, sessions: Arc<SessionStore>) -> Self {
        Self { users, sessions }
    }

    /// Register a new identity with an empty token list.
    pub fn register(&self, name: &Username) -> Result<UserRecord, NodeError> {
        if name.is_empty() {
            return Err(NodeError::EmptyUsername);
        }
        let record = UserRecord {
            name: name.clone(),
            id: UserId::random(),
            token_ids: Vec::new(),
        };
        match self.users.add(&record) {
            Ok(()) => {
                tracing::info!(user = %name, "registered user");
                Ok(record)
            }
            Err(StoreError::Duplicate(_)) => Err(NodeError::UserExists(name.clone())),
            Err(e) => Err(e.into()),
        }
    }

    /// Open a session for a known identity.
    pub fn login(&self, name: &Username) -> Result<SessionToken, NodeError> {
        if self.users.find_by_name(name)?.is_none() {
            return Err(NodeError::UnknownUser(name.clone()));
        }
        Ok(self.sessions.open(name))
    }

    /// End a session. Unknown tokens are ignored.
    pub fn logout(&self, token: &SessionToken) {
        self.sessions.close(token);
    }
}

impl UserDirectory for DirectoryService {
    fn exists(&self, user: &Username) -> Result<bool, StoreError> {
        Ok(self.users.find_by_name(user)?.is_some())
    }

    fn current_identity(&self, session: &SessionToken) -> Option<Username> {
        self.sessions.identity(session)
    }
}
