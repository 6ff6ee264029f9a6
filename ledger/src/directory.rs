//! The identity capability the ledger consumes.

use vox_store::StoreError;
use vox_types::{SessionToken, Username};

/// Read-only view of the external user directory.
///
/// The production implementation sits on the user store and a session
/// store (see `vox-node`); tests use `NullDirectory` from `vox-nullables`.
pub trait UserDirectory: Send + Sync {
    /// Whether `user` is a known identity.
    fn exists(&self, user: &Username) -> Result<bool, StoreError>;

    /// Resolve a session token back to the identity it was issued to.
    fn current_identity(&self, session: &SessionToken) -> Option<Username>;
}
