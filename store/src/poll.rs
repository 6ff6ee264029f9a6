//! Poll storage trait.

use crate::StoreError;
use serde::{Deserialize, Serialize};
use vox_types::{PollId, PollKind, Timestamp};

/// The persisted form of a poll.
///
/// Vote history is deliberately absent: votes live only for the process
/// lifetime, held by the poll registry. A reloaded poll starts with an
/// empty history.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PollRecord {
    pub id: PollId,
    pub question: String,
    pub options: Vec<String>,
    pub duration_seconds: u64,
    pub kind: PollKind,
    pub created_at: Timestamp,
    pub expires_at: Timestamp,
    pub active: bool,
}

/// Trait for poll snapshot storage.
pub trait PollStore: Send + Sync {
    /// Load the full poll snapshot.
    fn load(&self) -> Result<Vec<PollRecord>, StoreError>;

    /// Replace the full poll snapshot.
    fn save(&self, records: &[PollRecord]) -> Result<(), StoreError>;

    /// Append a new poll to the snapshot.
    fn add(&self, record: &PollRecord) -> Result<(), StoreError> {
        let mut all = self.load()?;
        if all.iter().any(|r| r.id == record.id) {
            return Err(StoreError::Duplicate(record.id.to_string()));
        }
        all.push(record.clone());
        self.save(&all)
    }

    /// Find a poll by id.
    fn find_by_id(&self, id: &PollId) -> Result<Option<PollRecord>, StoreError> {
        Ok(self.load()?.into_iter().find(|r| r.id == *id))
    }

    /// Replace an existing poll in the snapshot.
    fn update(&self, record: &PollRecord) -> Result<(), StoreError> {
        let mut all = self.load()?;
        match all.iter_mut().find(|r| r.id == record.id) {
            Some(slot) => *slot = record.clone(),
            None => return Err(StoreError::NotFound(record.id.to_string())),
        }
        self.save(&all)
    }
}
