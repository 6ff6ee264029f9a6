//! User storage trait.
//!
//! User records belong to the user directory; the core consumes them for
//! identity lookups and maintains only the `token_ids` list.

use crate::StoreError;
use serde::{Deserialize, Serialize};
use vox_types::{TokenId, UserId, Username};

/// A registered user and the tokens currently held.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    pub name: Username,
    pub id: UserId,
    #[serde(default)]
    pub token_ids: Vec<TokenId>,
}

/// Trait for user snapshot storage.
pub trait UserStore: Send + Sync {
    /// Load the full user snapshot.
    fn load(&self) -> Result<Vec<UserRecord>, StoreError>;

    /// Replace the full user snapshot.
    fn save(&self, records: &[UserRecord]) -> Result<(), StoreError>;

    /// Append a new user to the snapshot. Names are unique.
    fn add(&self, record: &UserRecord) -> Result<(), StoreError> {
        let mut all = self.load()?;
        if all.iter().any(|r| r.name == record.name) {
            return Err(StoreError::Duplicate(record.name.to_string()));
        }
        all.push(record.clone());
        self.save(&all)
    }

    /// Find a user by name.
    fn find_by_name(&self, name: &Username) -> Result<Option<UserRecord>, StoreError> {
        Ok(self.load()?.into_iter().find(|r| r.name == *name))
    }

    /// Replace an existing user in the snapshot, keyed by name.
    fn update(&self, record: &UserRecord) -> Result<(), StoreError> {
        let mut all = self.load()?;
        match all.iter_mut().find(|r| r.name == record.name) {
            Some(slot) => *slot = record.clone(),
            None => return Err(StoreError::NotFound(record.name.to_string())),
        }
        self.save(&all)
    }
}
