//! # airboard
//!
//! Client-side synchronization engine for a shared, expiring clipboard
//! board: a named space where multiple devices exchange short-lived text
//! and file entries.
//!
//! The engine reconciles a bounded local history with the remote
//! authoritative store, drives a one-second expiry countdown, and fans out
//! peer notifications after every confirmed mutation. Rendering, peer
//! transport and the board service itself live behind trait seams.

pub mod config;
pub mod core;
pub mod error;
pub mod infrastructure;
pub mod interface;
pub mod message;

// Re-export commonly used types at the crate root
pub use crate::config::ClientConfig;
pub use crate::core::controller::SyncController;
pub use crate::core::expiry::{Countdown, ExpiryClock};
pub use crate::core::history::{BoundedHistoryStore, HISTORY_CAP};
pub use crate::core::session::{BoardName, Language, SessionContext};
pub use crate::core::sync_state::SyncPhase;
pub use crate::error::{LocalError, RemoteError};
pub use crate::infrastructure::network::HttpBoardClient;
pub use crate::interface::{
    BoardApi, ClockPort, PeerEvent, PeerNotifier, RenderInstruction, RenderPort, SystemClock,
    UserNotice,
};
pub use crate::message::{AppendPayload, BoardSnapshot, Entry, EntryId, EntryKind};
