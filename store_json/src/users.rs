//! JSON-file implementation of [`UserStore`].

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Mutex;

use vox_store::{StoreError, UserRecord, UserStore};

use crate::file::{read_snapshot, write_snapshot};

/// On-disk shape of `users.json`.
#[derive(Default, Serialize, Deserialize)]
struct UsersFile {
    users: Vec<UserRecord>,
}

pub struct JsonUserStore {
    path: PathBuf,
    file_lock: Mutex<()>,
}

impl JsonUserStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            file_lock: Mutex::new(()),
        }
    }
}

impl UserStore for JsonUserStore {
    fn load(&self) -> Result<Vec<UserRecord>, StoreError> {
        let _guard = self.file_lock.lock().expect("user store lock poisoned");
        let file: UsersFile = read_snapshot(&self.path)?;
        Ok(file.users)
    }

    fn save(&self, records: &[UserRecord]) -> Result<(), StoreError> {
        let _guard = self.file_lock.lock().expect("user store lock poisoned");
        let file = UsersFile {
            users: records.to_vec(),
        };
        write_snapshot(&self.path, &file)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vox_types::{UserId, Username};

    fn sample_user(name: &str) -> UserRecord {
        UserRecord {
            name: Username::new(name),
            id: UserId::random(),
            token_ids: Vec::new(),
        }
    }

    #[test]
    fn add_then_find_by_name() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonUserStore::new(dir.path().join("users.json"));
        let user = sample_user("bob");
        store.add(&user).unwrap();
        assert_eq!(store.find_by_name(&Username::new("bob")).unwrap(), Some(user));
    }

    #[test]
    fn duplicate_name_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonUserStore::new(dir.path().join("users.json"));
        store.add(&sample_user("bob")).unwrap();
        let err = store.add(&sample_user("bob")).unwrap_err();
        assert!(matches!(err, StoreError::Duplicate(_)));
    }

    #[test]
    fn token_ids_default_when_absent_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("users.json");
        std::fs::write(
            &path,
            format!(
                "{{\"users\": [{{\"name\": \"bob\", \"id\": \"{}\"}}]}}",
                UserId::random()
            ),
        )
        .unwrap();

        let store = JsonUserStore::new(path);
        let user = store
            .find_by_name(&Username::new("bob"))
            .unwrap()
            .expect("present");
        assert!(user.token_ids.is_empty());
    }
}
