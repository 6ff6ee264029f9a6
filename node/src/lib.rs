//! VOX node — the composition layer.
//!
//! Wires the poll registry, vote tally, and token ledger over a storage
//! backend and exposes the transport-agnostic operations a front end
//! (CLI, web form, chat assistant) calls:
//! create/list/close poll, vote, tally, presented results, token listing
//! and transfer. Also owns the pieces the core treats as collaborators:
//! the user directory, session store, and event bus.

pub mod config;
pub mod directory;
pub mod error;
pub mod events;
pub mod node;
pub mod session;

pub use config::NodeConfig;
pub use directory::DirectoryService;
pub use error::NodeError;
pub use events::{EventBus, PollEvent};
pub use node::VoxNode;
pub use session::SessionStore;
