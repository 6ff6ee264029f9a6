//! Vote acceptance and aggregation.

use std::sync::Arc;

use vox_ledger::TokenLedger;
use vox_types::{PollId, PollKind, Timestamp, Username, VoteId};

use crate::poll::{Poll, Vote};
use crate::registry::PollRegistry;
use crate::PollError;

/// Per-option vote counts for one poll, in the poll's option order.
///
/// Options with no votes are present with count 0.
#[derive(Clone, Debug, PartialEq)]
pub struct Tally {
    entries: Vec<(String, u64)>,
}

impl Tally {
    /// Count a poll's recorded votes, Multi sequences flattened.
    pub fn of(poll: &Poll) -> Self {
        let mut entries: Vec<(String, u64)> =
            poll.options.iter().map(|o| (o.clone(), 0)).collect();
        for vote in poll.iter_votes() {
            if let Some(entry) = entries.iter_mut().find(|(o, _)| *o == vote.option) {
                entry.1 += 1;
            }
        }
        Self { entries }
    }

    pub fn count(&self, option: &str) -> u64 {
        self.entries
            .iter()
            .find(|(o, _)| o == option)
            .map(|(_, c)| *c)
            .unwrap_or(0)
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.entries.iter().map(|(_, c)| c).sum()
    }

    /// The highest per-option count (0 for an empty tally).
    pub fn max_count(&self) -> u64 {
        self.entries.iter().map(|(_, c)| *c).max().unwrap_or(0)
    }

    /// All options sharing the maximum count, in tally order.
    pub fn leaders(&self) -> Vec<&str> {
        let max = self.max_count();
        self.entries
            .iter()
            .filter(|(_, c)| *c == max)
            .map(|(o, _)| o.as_str())
            .collect()
    }

    /// Whether at least two options share the maximum count.
    pub fn is_tied(&self) -> bool {
        self.leaders().len() >= 2
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.entries.iter().map(|(o, c)| (o.as_str(), *c))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Accepts votes against the registry and mints a participation token per
/// accepted vote.
pub struct VoteTally {
    registry: Arc<PollRegistry>,
    ledger: Arc<TokenLedger>,
}

impl VoteTally {
    pub fn new(registry: Arc<PollRegistry>, ledger: Arc<TokenLedger>) -> Self {
        Self { registry, ledger }
    }

    /// Accept a vote.
    ///
    /// Validation, minting, and recording happen under the registry's
    /// mutation lock, so a duplicate check can never race another accept on
    /// the same poll. The mint happens before the vote is recorded: a
    /// failed mint leaves no vote behind, and recording an already-validated
    /// vote cannot fail.
    pub fn accept(
        &self,
        poll_id: &PollId,
        voter: &Username,
        option: &str,
        now: Timestamp,
    ) -> Result<Vote, PollError> {
        let _guard = self.registry.mutation_guard();

        let record = self.registry.load_resolving_expiry(poll_id, now)?;
        if !record.active {
            return Err(PollError::Closed(*poll_id));
        }
        if !record.options.iter().any(|o| o == option) {
            return Err(PollError::UnknownOption {
                poll: *poll_id,
                option: option.to_string(),
            });
        }
        if record.kind == PollKind::Single && self.registry.has_voted(poll_id, voter) {
            return Err(PollError::AlreadyVoted {
                poll: *poll_id,
                voter: voter.clone(),
            });
        }

        let token = self.ledger.mint(*poll_id, option, voter, now)?;
        let vote = Vote {
            id: VoteId::random(),
            poll_id: *poll_id,
            voter: voter.clone(),
            option: option.to_string(),
            cast_at: now,
            token_id: token.token_id,
        };
        self.registry.push_accepted_vote(record.kind, vote.clone())?;

        tracing::info!(poll = %poll_id, %voter, option, token = %token.token_id, "accepted vote");
        Ok(vote)
    }

    /// The current tally for a poll.
    pub fn tally(&self, poll_id: &PollId) -> Result<Tally, PollError> {
        let record = self
            .registry
            .store()
            .find_by_id(poll_id)?
            .ok_or(PollError::NotFound(*poll_id))?;
        Ok(Tally::of(&self.registry.materialize(record)))
    }
}
