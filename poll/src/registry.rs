//! The poll registry — lifecycle and storage boundary for polls.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use vox_store::{PollRecord, PollStore};
use vox_types::{PollId, PollKind, Timestamp, Username};

use crate::poll::{push_vote, Poll, Vote, VoteHistory};
use crate::PollError;

/// Exclusive owner of poll records.
///
/// Persisted records carry no vote history; the registry keeps votes in an
/// in-memory overlay for the process lifetime. Mutations (create, close,
/// expiry correction, vote recording) run under one registry-wide lock so a
/// load-validate-save sequence is never interleaved with another writer.
pub struct PollRegistry {
    store: Arc<dyn PollStore>,
    votes: Mutex<HashMap<PollId, VoteHistory>>,
    write_lock: Mutex<()>,
}

impl PollRegistry {
    pub fn new(store: Arc<dyn PollStore>) -> Self {
        Self {
            store,
            votes: Mutex::new(HashMap::new()),
            write_lock: Mutex::new(()),
        }
    }

    pub(crate) fn mutation_guard(&self) -> MutexGuard<'_, ()> {
        self.write_lock.lock().expect("poll registry lock poisoned")
    }

    /// Load a poll record, lazily closing it if the deadline has passed.
    /// Caller must hold the mutation guard.
    pub(crate) fn load_resolving_expiry(
        &self,
        id: &PollId,
        now: Timestamp,
    ) -> Result<PollRecord, PollError> {
        let mut record = self
            .store
            .find_by_id(id)?
            .ok_or(PollError::NotFound(*id))?;
        if record.active && now.is_at_or_after(record.expires_at) {
            record.active = false;
            self.store.update(&record)?;
            tracing::info!(poll = %id, "closed expired poll at read time");
        }
        Ok(record)
    }

    /// Attach the in-memory vote history to a record.
    pub(crate) fn materialize(&self, record: PollRecord) -> Poll {
        let history = self
            .votes
            .lock()
            .expect("vote overlay lock poisoned")
            .get(&record.id)
            .cloned()
            .unwrap_or_default();
        Poll::from_record(record, history)
    }

    /// Record an accepted vote into the overlay. Caller must hold the
    /// mutation guard and have validated the vote against the poll.
    pub(crate) fn push_accepted_vote(&self, kind: PollKind, vote: Vote) -> Result<(), PollError> {
        let mut overlay = self.votes.lock().expect("vote overlay lock poisoned");
        push_vote(overlay.entry(vote.poll_id).or_default(), kind, vote)
    }

    /// Whether `voter` already has a recorded vote on `poll`.
    pub(crate) fn has_voted(&self, poll: &PollId, voter: &Username) -> bool {
        self.votes
            .lock()
            .expect("vote overlay lock poisoned")
            .get(poll)
            .is_some_and(|history| history.contains_key(voter))
    }

    /// Validate and persist a new poll.
    pub fn create(
        &self,
        question: &str,
        options: &[String],
        duration_seconds: u64,
        kind: PollKind,
        now: Timestamp,
    ) -> Result<Poll, PollError> {
        let poll = Poll::new(question, options, duration_seconds, kind, now)?;
        let _guard = self.mutation_guard();
        self.store.add(&poll.to_record())?;
        tracing::info!(poll = %poll.id, kind = %poll.kind, "created poll");
        Ok(poll)
    }

    /// Fetch a poll, resolving expiry first.
    pub fn get(&self, id: &PollId, now: Timestamp) -> Result<Poll, PollError> {
        let _guard = self.mutation_guard();
        let record = self.load_resolving_expiry(id, now)?;
        Ok(self.materialize(record))
    }

    /// List polls, resolving expiry for each before filtering.
    ///
    /// Expiry corrections discovered here are persisted in a single
    /// snapshot write.
    pub fn list(&self, active_only: bool, now: Timestamp) -> Result<Vec<Poll>, PollError> {
        let _guard = self.mutation_guard();
        let mut records = self.store.load()?;
        let mut corrected = 0usize;
        for record in records.iter_mut() {
            if record.active && now.is_at_or_after(record.expires_at) {
                record.active = false;
                corrected += 1;
            }
        }
        if corrected > 0 {
            self.store.save(&records)?;
            tracing::info!(corrected, "closed expired polls during listing");
        }
        Ok(records
            .into_iter()
            .filter(|r| !active_only || r.active)
            .map(|r| self.materialize(r))
            .collect())
    }

    /// Close a poll. Returns `false` (not an error) if already closed.
    pub fn close(&self, id: &PollId) -> Result<bool, PollError> {
        let _guard = self.mutation_guard();
        let mut record = self
            .store
            .find_by_id(id)?
            .ok_or(PollError::NotFound(*id))?;
        if !record.active {
            return Ok(false);
        }
        record.active = false;
        self.store.update(&record)?;
        tracing::info!(poll = %id, "closed poll");
        Ok(true)
    }

    pub(crate) fn store(&self) -> &dyn PollStore {
        self.store.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vox_nullables::NullStore;

    fn now() -> Timestamp {
        Timestamp::from_unix_seconds(1_700_000_000)
    }

    fn options(labels: &[&str]) -> Vec<String> {
        labels.iter().map(|s| s.to_string()).collect()
    }

    fn registry() -> PollRegistry {
        PollRegistry::new(Arc::new(NullStore::new()))
    }

    #[test]
    fn create_persists_and_returns_active_poll() {
        let registry = registry();
        let poll = registry
            .create("A or B?", &options(&["A", "B"]), 60, PollKind::Single, now())
            .unwrap();
        let fetched = registry.get(&poll.id, now()).unwrap();
        assert!(fetched.active);
        assert_eq!(fetched.question, "A or B?");
    }

    #[test]
    fn create_rejects_invalid_input_without_persisting() {
        let registry = registry();
        assert!(registry
            .create("A?", &options(&["A"]), 60, PollKind::Single, now())
            .is_err());
        assert!(registry
            .create("A or B?", &options(&["A", "B"]), 0, PollKind::Single, now())
            .is_err());
        assert!(registry.list(false, now()).unwrap().is_empty());
    }

    #[test]
    fn get_unknown_poll_is_not_found() {
        let registry = registry();
        assert!(matches!(
            registry.get(&PollId::random(), now()),
            Err(PollError::NotFound(_))
        ));
    }

    #[test]
    fn get_lazily_closes_expired_poll_and_persists() {
        let registry = registry();
        let poll = registry
            .create("A or B?", &options(&["A", "B"]), 1, PollKind::Single, now())
            .unwrap();

        let fetched = registry.get(&poll.id, now().plus_seconds(2)).unwrap();
        assert!(!fetched.active);

        // The correction stuck: a later read well before any deadline still
        // sees the poll closed.
        let again = registry.get(&poll.id, now()).unwrap();
        assert!(!again.active);
    }

    #[test]
    fn list_filters_active_only_after_expiry_resolution() {
        let registry = registry();
        let _short = registry
            .create("short", &options(&["A", "B"]), 1, PollKind::Single, now())
            .unwrap();
        let long = registry
            .create("long", &options(&["A", "B"]), 120, PollKind::Single, now())
            .unwrap();

        let later = now().plus_seconds(10);
        let active = registry.list(true, later).unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id, long.id);

        let all = registry.list(false, later).unwrap();
        assert_eq!(all.len(), 2);
    }

    #[test]
    fn close_is_idempotent_and_reports_first_transition() {
        let registry = registry();
        let poll = registry
            .create("A or B?", &options(&["A", "B"]), 60, PollKind::Single, now())
            .unwrap();

        assert!(registry.close(&poll.id).unwrap());
        assert!(!registry.close(&poll.id).unwrap());
        assert!(!registry.get(&poll.id, now()).unwrap().active);
    }

    #[test]
    fn close_unknown_poll_is_not_found() {
        let registry = registry();
        assert!(matches!(
            registry.close(&PollId::random()),
            Err(PollError::NotFound(_))
        ));
    }
}
