//! Nullable store — thread-safe in-memory storage for testing.

use std::sync::Mutex;

use vox_store::{
    PollRecord, PollStore, StoreError, TokenRecord, TokenStore, UserRecord, UserStore,
};
use vox_types::{UserId, Username};

/// An in-memory snapshot store for every entity kind.
///
/// Implements only `load`/`save` per trait; the provided trait methods
/// supply `add`/`find`/`update`, exactly as they do for real backends.
pub struct NullStore {
    polls: Mutex<Vec<PollRecord>>,
    tokens: Mutex<Vec<TokenRecord>>,
    users: Mutex<Vec<UserRecord>>,
}

impl NullStore {
    pub fn new() -> Self {
        Self {
            polls: Mutex::new(Vec::new()),
            tokens: Mutex::new(Vec::new()),
            users: Mutex::new(Vec::new()),
        }
    }

    /// Convenience: register a user with an empty token list.
    pub fn add_user(&self, name: &str) {
        self.users.lock().unwrap().push(UserRecord {
            name: Username::new(name),
            id: UserId::random(),
            token_ids: Vec::new(),
        });
    }
}

impl Default for NullStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PollStore for NullStore {
    fn load(&self) -> Result<Vec<PollRecord>, StoreError> {
        Ok(self.polls.lock().unwrap().clone())
    }

    fn save(&self, records: &[PollRecord]) -> Result<(), StoreError> {
        *self.polls.lock().unwrap() = records.to_vec();
        Ok(())
    }
}

impl TokenStore for NullStore {
    fn load(&self) -> Result<Vec<TokenRecord>, StoreError> {
        Ok(self.tokens.lock().unwrap().clone())
    }

    fn save(&self, records: &[TokenRecord]) -> Result<(), StoreError> {
        *self.tokens.lock().unwrap() = records.to_vec();
        Ok(())
    }
}

impl UserStore for NullStore {
    fn load(&self) -> Result<Vec<UserRecord>, StoreError> {
        Ok(self.users.lock().unwrap().clone())
    }

    fn save(&self, records: &[UserRecord]) -> Result<(), StoreError> {
        *self.users.lock().unwrap() = records.to_vec();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vox_types::{PollId, PollKind, Timestamp};

    #[test]
    fn poll_snapshot_round_trips() {
        let store = NullStore::new();
        let created = Timestamp::from_unix_seconds(1_000);
        let record = PollRecord {
            id: PollId::random(),
            question: "A or B?".into(),
            options: vec!["A".into(), "B".into()],
            duration_seconds: 60,
            kind: PollKind::Single,
            created_at: created,
            expires_at: created.plus_seconds(60),
            active: true,
        };
        PollStore::add(&store, &record).unwrap();
        assert_eq!(PollStore::find_by_id(&store, &record.id).unwrap(), Some(record));
    }

    #[test]
    fn entity_kinds_are_independent() {
        let store = NullStore::new();
        store.add_user("bob");
        assert_eq!(UserStore::load(&store).unwrap().len(), 1);
        assert!(PollStore::load(&store).unwrap().is_empty());
        assert!(TokenStore::load(&store).unwrap().is_empty());
    }
}
