//! Poll lifecycle and vote tallying.
//!
//! A poll is a timed question with a fixed option set. Votes are accepted
//! while the poll is active; each accepted vote mints a participation token
//! through `vox-ledger`. Results are answered as a [`Tally`], with
//! tie-break and presentation policies applied only at query time.
//!
//! Expiry is lazy: there is no background timer, a poll past its deadline
//! is closed the next time anything reads it.

pub mod error;
pub mod poll;
pub mod present;
pub mod registry;
pub mod tally;
pub mod tiebreak;

pub use error::PollError;
pub use poll::{Poll, Vote, VoteHistory, VoteSlot};
pub use present::PresentationKind;
pub use registry::PollRegistry;
pub use tally::{Tally, VoteTally};
pub use tiebreak::{TieBreakKind, TieBreakOutcome};
