use thiserror::Error;
use vox_types::{PollId, Username};

#[derive(Debug, Error)]
pub enum PollError {
    #[error("poll not found: {0}")]
    NotFound(PollId),

    #[error("a poll needs at least 2 options, got {have}")]
    TooFewOptions { have: usize },

    #[error("duplicate option label: {0:?}")]
    DuplicateOption(String),

    #[error("poll question must not be empty")]
    EmptyQuestion,

    #[error("poll duration must be positive")]
    InvalidDuration,

    #[error("option {option:?} is not part of poll {poll}")]
    UnknownOption { poll: PollId, option: String },

    #[error("poll {0} is closed")]
    Closed(PollId),

    #[error("{voter} has already voted on poll {poll}")]
    AlreadyVoted { poll: PollId, voter: Username },

    #[error("ledger error: {0}")]
    Ledger(#[from] vox_ledger::LedgerError),

    #[error("storage error: {0}")]
    Storage(#[from] vox_store::StoreError),
}
