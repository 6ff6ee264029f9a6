//! Participation-token ledger.
//!
//! One token is minted per accepted vote, owned by the voter, and can be
//! transferred between identities. Tokens are never deleted; ownership
//! changes only through [`TokenLedger::transfer`].
//!
//! The ledger consumes a [`UserDirectory`] capability for identity
//! existence checks — who the users *are* belongs to an external
//! collaborator, the ledger only maintains their token holdings.

pub mod directory;
pub mod error;
pub mod ledger;

pub use directory::UserDirectory;
pub use error::LedgerError;
pub use ledger::TokenLedger;
pub use vox_store::TokenRecord;
