//! JSON-file implementation of [`PollStore`].

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Mutex;

use vox_store::{PollRecord, PollStore, StoreError};

use crate::file::{read_snapshot, write_snapshot};

/// On-disk shape of `polls.json`.
#[derive(Default, Serialize, Deserialize)]
struct PollsFile {
    polls: Vec<PollRecord>,
}

pub struct JsonPollStore {
    path: PathBuf,
    /// Guards individual load/save calls so two writers never interleave a
    /// rename. Read-modify-write spans are serialized by the engines above.
    file_lock: Mutex<()>,
}

impl JsonPollStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            file_lock: Mutex::new(()),
        }
    }
}

impl PollStore for JsonPollStore {
    fn load(&self) -> Result<Vec<PollRecord>, StoreError> {
        let _guard = self.file_lock.lock().expect("poll store lock poisoned");
        let file: PollsFile = read_snapshot(&self.path)?;
        Ok(file.polls)
    }

    fn save(&self, records: &[PollRecord]) -> Result<(), StoreError> {
        let _guard = self.file_lock.lock().expect("poll store lock poisoned");
        let file = PollsFile {
            polls: records.to_vec(),
        };
        write_snapshot(&self.path, &file)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vox_types::{PollId, PollKind, Timestamp};

    fn sample_record() -> PollRecord {
        let created = Timestamp::from_unix_seconds(1_700_000_000);
        PollRecord {
            id: PollId::random(),
            question: "A or B?".into(),
            options: vec!["A".into(), "B".into()],
            duration_seconds: 60,
            kind: PollKind::Single,
            created_at: created,
            expires_at: created.plus_seconds(60),
            active: true,
        }
    }

    #[test]
    fn add_then_find_round_trips_all_fields() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonPollStore::new(dir.path().join("polls.json"));
        let record = sample_record();
        store.add(&record).unwrap();

        let loaded = store.find_by_id(&record.id).unwrap().expect("present");
        assert_eq!(loaded, record);
    }

    #[test]
    fn update_replaces_in_place() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonPollStore::new(dir.path().join("polls.json"));
        let mut record = sample_record();
        store.add(&record).unwrap();

        record.active = false;
        store.update(&record).unwrap();

        let loaded = store.find_by_id(&record.id).unwrap().expect("present");
        assert!(!loaded.active);
        assert_eq!(store.load().unwrap().len(), 1);
    }

    #[test]
    fn update_unknown_poll_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonPollStore::new(dir.path().join("polls.json"));
        let err = store.update(&sample_record()).unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[test]
    fn duplicate_add_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonPollStore::new(dir.path().join("polls.json"));
        let record = sample_record();
        store.add(&record).unwrap();
        let err = store.add(&record).unwrap_err();
        assert!(matches!(err, StoreError::Duplicate(_)));
    }

    #[test]
    fn empty_directory_loads_as_empty_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonPollStore::new(dir.path().join("polls.json"));
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn persisted_kind_uses_wire_names() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("polls.json");
        let store = JsonPollStore::new(path.clone());
        store.add(&sample_record()).unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"simple\""), "got {raw}");
    }
}
