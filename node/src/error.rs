use thiserror::Error;
use vox_types::Username;

#[derive(Debug, Error)]
pub enum NodeError {
    #[error("poll error: {0}")]
    Poll(#[from] vox_poll::PollError),

    #[error("ledger error: {0}")]
    Ledger(#[from] vox_ledger::LedgerError),

    #[error("store error: {0}")]
    Store(#[from] vox_store::StoreError),

    #[error("username must not be empty")]
    EmptyUsername,

    #[error("user already exists: {0}")]
    UserExists(Username),

    #[error("unknown user: {0}")]
    UnknownUser(Username),

    #[error("config error: {0}")]
    Config(String),
}
