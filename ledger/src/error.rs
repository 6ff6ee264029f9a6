use thiserror::Error;
use vox_types::{TokenId, Username};

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("token not found: {0}")]
    TokenNotFound(TokenId),

    #[error("unknown identity: {0}")]
    UnknownIdentity(Username),

    #[error("token {token} is not owned by {claimed}")]
    NotOwner { token: TokenId, claimed: Username },

    #[error("storage error: {0}")]
    Storage(#[from] vox_store::StoreError),
}
