//! Abstract storage traits for the VOX poll platform.
//!
//! Every storage backend (JSON files, in-memory for testing) implements
//! these traits. The rest of the codebase depends only on the traits.
//!
//! Storage is snapshot-oriented: a store holds the full collection for one
//! entity kind, and `load`/`save` move the whole snapshot. The higher-level
//! operations (`add`, `find_by_id`, `update`) are provided atop load/save so
//! every mutation re-reads the latest snapshot immediately before writing it
//! back. That alone does not make concurrent read-modify-write sequences
//! safe — the engines above hold a mutation lock across the whole
//! load-validate-save span (see `vox-poll` and `vox-ledger`).

pub mod error;
pub mod poll;
pub mod token;
pub mod user;

pub use error::StoreError;
pub use poll::{PollRecord, PollStore};
pub use token::{TokenRecord, TokenStore};
pub use user::{UserRecord, UserStore};
