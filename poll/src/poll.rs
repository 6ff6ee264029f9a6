//! The poll domain model.

use std::collections::HashMap;

use vox_store::PollRecord;
use vox_types::{PollId, PollKind, Timestamp, TokenId, Username, VoteId};

use crate::PollError;

/// A single recorded vote.
///
/// Immutable once accepted; `token_id` links the participation token minted
/// for it.
#[derive(Clone, Debug, PartialEq)]
pub struct Vote {
    pub id: VoteId,
    pub poll_id: PollId,
    pub voter: Username,
    pub option: String,
    pub cast_at: Timestamp,
    pub token_id: TokenId,
}

/// What one voter holds on one poll: a single vote, or a sequence on
/// Multi polls.
#[derive(Clone, Debug, PartialEq)]
pub enum VoteSlot {
    Single(Vote),
    Multi(Vec<Vote>),
}

impl VoteSlot {
    pub fn iter(&self) -> impl Iterator<Item = &Vote> {
        match self {
            VoteSlot::Single(v) => std::slice::from_ref(v).iter(),
            VoteSlot::Multi(vs) => vs.iter(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            VoteSlot::Single(_) => 1,
            VoteSlot::Multi(vs) => vs.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Per-poll vote history, keyed by voter.
pub type VoteHistory = HashMap<Username, VoteSlot>;

/// Record a vote into a history, enforcing the per-kind rules.
///
/// Single polls reject a second vote from the same voter. Multi polls
/// append unconditionally — the same voter may stack votes on the same
/// option; that is the product behavior, not an accident of this code.
pub(crate) fn push_vote(
    history: &mut VoteHistory,
    kind: PollKind,
    vote: Vote,
) -> Result<(), PollError> {
    match kind {
        PollKind::Single => {
            if history.contains_key(&vote.voter) {
                return Err(PollError::AlreadyVoted {
                    poll: vote.poll_id,
                    voter: vote.voter.clone(),
                });
            }
            history.insert(vote.voter.clone(), VoteSlot::Single(vote));
        }
        PollKind::Multi => match history.entry(vote.voter.clone()) {
            std::collections::hash_map::Entry::Occupied(mut slot) => {
                if let VoteSlot::Multi(vs) = slot.get_mut() {
                    vs.push(vote);
                }
            }
            std::collections::hash_map::Entry::Vacant(slot) => {
                slot.insert(VoteSlot::Multi(vec![vote]));
            }
        },
    }
    Ok(())
}

/// A poll with its in-memory vote history attached.
///
/// The persisted form is [`PollRecord`]; votes live only for the process
/// lifetime (see `PollRegistry`).
#[derive(Clone, Debug)]
pub struct Poll {
    pub id: PollId,
    pub question: String,
    pub options: Vec<String>,
    pub duration_seconds: u64,
    pub kind: PollKind,
    pub created_at: Timestamp,
    pub expires_at: Timestamp,
    pub active: bool,
    pub votes: VoteHistory,
}

impl Poll {
    /// Validate inputs and build a new active poll.
    pub fn new(
        question: &str,
        options: &[String],
        duration_seconds: u64,
        kind: PollKind,
        now: Timestamp,
    ) -> Result<Self, PollError> {
        if question.trim().is_empty() {
            return Err(PollError::EmptyQuestion);
        }
        if options.len() < 2 {
            return Err(PollError::TooFewOptions { have: options.len() });
        }
        for (i, option) in options.iter().enumerate() {
            if options[..i].contains(option) {
                return Err(PollError::DuplicateOption(option.clone()));
            }
        }
        if duration_seconds == 0 {
            return Err(PollError::InvalidDuration);
        }
        Ok(Self {
            id: PollId::random(),
            question: question.trim().to_string(),
            options: options.to_vec(),
            duration_seconds,
            kind,
            created_at: now,
            expires_at: now.plus_seconds(duration_seconds),
            active: true,
            votes: VoteHistory::new(),
        })
    }

    /// Close the poll if its deadline has passed. Returns whether the poll
    /// is now inactive.
    pub fn check_expiry(&mut self, now: Timestamp) -> bool {
        if self.active && now.is_at_or_after(self.expires_at) {
            self.active = false;
        }
        !self.active
    }

    /// Validate that a vote by `voter` for `option` would be accepted.
    pub fn ensure_accepts(&self, voter: &Username, option: &str) -> Result<(), PollError> {
        if !self.active {
            return Err(PollError::Closed(self.id));
        }
        if !self.options.iter().any(|o| o == option) {
            return Err(PollError::UnknownOption {
                poll: self.id,
                option: option.to_string(),
            });
        }
        if self.kind == PollKind::Single && self.votes.contains_key(voter) {
            return Err(PollError::AlreadyVoted {
                poll: self.id,
                voter: voter.clone(),
            });
        }
        Ok(())
    }

    /// Record an already-validated vote.
    pub fn record_vote(&mut self, vote: Vote) -> Result<(), PollError> {
        self.ensure_accepts(&vote.voter, &vote.option)?;
        push_vote(&mut self.votes, self.kind, vote)
    }

    /// Total number of recorded votes, Multi sequences flattened.
    pub fn vote_count(&self) -> usize {
        self.votes.values().map(VoteSlot::len).sum()
    }

    /// Iterate every recorded vote, Multi sequences flattened.
    pub fn iter_votes(&self) -> impl Iterator<Item = &Vote> {
        self.votes.values().flat_map(VoteSlot::iter)
    }

    /// Strip the vote history down to the persisted form.
    pub fn to_record(&self) -> PollRecord {
        PollRecord {
            id: self.id,
            question: self.question.clone(),
            options: self.options.clone(),
            duration_seconds: self.duration_seconds,
            kind: self.kind,
            created_at: self.created_at,
            expires_at: self.expires_at,
            active: self.active,
        }
    }

    /// Rebuild a poll from its persisted form plus a vote history.
    pub fn from_record(record: PollRecord, votes: VoteHistory) -> Self {
        Self {
            id: record.id,
            question: record.question,
            options: record.options,
            duration_seconds: record.duration_seconds,
            kind: record.kind,
            created_at: record.created_at,
            expires_at: record.expires_at,
            active: record.active,
            votes,
        }
    }
}
