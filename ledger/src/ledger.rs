//! The token ledger — mint, transfer, and ownership queries.

use std::sync::{Arc, Mutex, MutexGuard};

use vox_store::{TokenRecord, TokenStore, UserStore};
use vox_types::{PollId, Timestamp, TokenId, Username};

use crate::{LedgerError, UserDirectory};

/// Owns all token records and the token-holding lists on user records.
///
/// Every mutating operation executes under a single ledger-wide lock held
/// across the whole load-validate-save span, so overlapping mints or
/// transfers can never interleave a read-modify-write and lose an update.
pub struct TokenLedger {
    tokens: Arc<dyn TokenStore>,
    users: Arc<dyn UserStore>,
    directory: Arc<dyn UserDirectory>,
    write_lock: Mutex<()>,
}

impl TokenLedger {
    pub fn new(
        tokens: Arc<dyn TokenStore>,
        users: Arc<dyn UserStore>,
        directory: Arc<dyn UserDirectory>,
    ) -> Self {
        Self {
            tokens,
            users,
            directory,
            write_lock: Mutex::new(()),
        }
    }

    fn mutation_guard(&self) -> MutexGuard<'_, ()> {
        self.write_lock.lock().expect("ledger write lock poisoned")
    }

    /// Mint a participation token for an accepted vote.
    ///
    /// Fails with [`LedgerError::UnknownIdentity`] if `owner` is not a known
    /// identity. On success the token is persisted and its id appended to
    /// the owner's holding list; if the holding-list write fails, the mint
    /// is rolled back so no orphan token remains.
    pub fn mint(
        &self,
        poll_id: PollId,
        option: &str,
        owner: &Username,
        now: Timestamp,
    ) -> Result<TokenRecord, LedgerError> {
        let _guard = self.mutation_guard();

        if !self.directory.exists(owner)? {
            return Err(LedgerError::UnknownIdentity(owner.clone()));
        }
        let mut users = self.users.load()?;
        let holder = users
            .iter_mut()
            .find(|u| u.name == *owner)
            .ok_or_else(|| LedgerError::UnknownIdentity(owner.clone()))?;

        let token = TokenRecord {
            token_id: TokenId::random(),
            poll_id,
            option: option.to_string(),
            owner: owner.clone(),
            issued_at: now,
        };

        let prior_tokens = self.tokens.load()?;
        let mut tokens = prior_tokens.clone();
        tokens.push(token.clone());
        self.tokens.save(&tokens)?;

        holder.token_ids.push(token.token_id);
        if let Err(e) = self.users.save(&users) {
            let _ = self.tokens.save(&prior_tokens);
            return Err(e.into());
        }

        tracing::debug!(token = %token.token_id, owner = %owner, poll = %poll_id, "minted token");
        Ok(token)
    }

    /// Transfer a token between identities.
    ///
    /// The holding-list removal, the holding-list addition, and the owner
    /// field update land together or not at all: both user records are
    /// rewritten in one snapshot save, and a failed token write restores
    /// the previous user snapshot.
    pub fn transfer(
        &self,
        token_id: TokenId,
        from: &Username,
        to: &Username,
    ) -> Result<(), LedgerError> {
        let _guard = self.mutation_guard();

        let mut users = self.users.load()?;
        let from_idx = users
            .iter()
            .position(|u| u.name == *from)
            .ok_or_else(|| LedgerError::UnknownIdentity(from.clone()))?;
        let to_idx = users
            .iter()
            .position(|u| u.name == *to)
            .ok_or_else(|| LedgerError::UnknownIdentity(to.clone()))?;

        let token = self
            .tokens
            .find_by_id(&token_id)?
            .ok_or(LedgerError::TokenNotFound(token_id))?;
        if token.owner != *from {
            return Err(LedgerError::NotOwner {
                token: token_id,
                claimed: from.clone(),
            });
        }

        let prior_users = users.clone();
        users[from_idx].token_ids.retain(|t| *t != token_id);
        users[to_idx].token_ids.push(token_id);
        self.users.save(&users)?;

        let mut updated = token;
        updated.owner = to.clone();
        if let Err(e) = self.tokens.update(&updated) {
            let _ = self.users.save(&prior_users);
            return Err(e.into());
        }

        tracing::info!(token = %token_id, %from, %to, "transferred token");
        Ok(())
    }

    /// All tokens currently owned by `owner`.
    pub fn list_by_owner(&self, owner: &Username) -> Result<Vec<TokenRecord>, LedgerError> {
        if !self.directory.exists(owner)? {
            return Err(LedgerError::UnknownIdentity(owner.clone()));
        }
        Ok(self.tokens.list_by_owner(owner)?)
    }

    /// Look up a single token.
    pub fn get(&self, token_id: &TokenId) -> Result<TokenRecord, LedgerError> {
        self.tokens
            .find_by_id(token_id)?
            .ok_or(LedgerError::TokenNotFound(*token_id))
    }
}
