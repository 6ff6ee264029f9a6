//! Participation-token storage trait.

use crate::StoreError;
use serde::{Deserialize, Serialize};
use vox_types::{PollId, Timestamp, TokenId, Username};

/// A participation token — minted once per accepted vote, transferable,
/// never deleted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TokenRecord {
    pub token_id: TokenId,
    pub poll_id: PollId,
    /// The option this token attests a vote for.
    pub option: String,
    pub owner: Username,
    pub issued_at: Timestamp,
}

/// Trait for token snapshot storage.
pub trait TokenStore: Send + Sync {
    /// Load the full token snapshot.
    fn load(&self) -> Result<Vec<TokenRecord>, StoreError>;

    /// Replace the full token snapshot.
    fn save(&self, records: &[TokenRecord]) -> Result<(), StoreError>;

    /// Append a newly minted token to the snapshot.
    fn add(&self, record: &TokenRecord) -> Result<(), StoreError> {
        let mut all = self.load()?;
        if all.iter().any(|r| r.token_id == record.token_id) {
            return Err(StoreError::Duplicate(record.token_id.to_string()));
        }
        all.push(record.clone());
        self.save(&all)
    }

    /// Find a token by id.
    fn find_by_id(&self, id: &TokenId) -> Result<Option<TokenRecord>, StoreError> {
        Ok(self.load()?.into_iter().find(|r| r.token_id == *id))
    }

    /// Replace an existing token in the snapshot.
    fn update(&self, record: &TokenRecord) -> Result<(), StoreError> {
        let mut all = self.load()?;
        match all.iter_mut().find(|r| r.token_id == record.token_id) {
            Some(slot) => *slot = record.clone(),
            None => return Err(StoreError::NotFound(record.token_id.to_string())),
        }
        self.save(&all)
    }

    /// All tokens currently owned by `owner`, in issuance order.
    fn list_by_owner(&self, owner: &Username) -> Result<Vec<TokenRecord>, StoreError> {
        Ok(self
            .load()?
            .into_iter()
            .filter(|r| r.owner == *owner)
            .collect())
    }
}
