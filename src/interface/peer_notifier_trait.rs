use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::core::session::BoardName;

/// Signal that a board changed, exchanged with other connected devices.
///
/// Serialized shape is the wire contract: `{"type": "board-update",
/// "board": "<name>"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeerEvent {
    #[serde(rename = "type")]
    pub kind: PeerEventKind,
    pub board: BoardName,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PeerEventKind {
    #[serde(rename = "board-update")]
    BoardUpdate,
}

impl PeerEvent {
    pub fn board_update(board: BoardName) -> Self {
        Self {
            kind: PeerEventKind::BoardUpdate,
            board,
        }
    }
}

/// Outbound fan-out to other devices watching the same board. The engine
/// only triggers it: once per confirmed mutation, never on a read-only
/// load. Transport is the collaborator's business.
#[async_trait::async_trait]
pub trait PeerNotifier: Send + Sync {
    async fn broadcast(&self, event: PeerEvent) -> Result<()>;
}
