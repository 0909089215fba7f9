use anyhow::Result;

use crate::core::expiry::Countdown;
use crate::core::session::BoardName;
use crate::message::{Entry, EntryId};

/// One render decision made by the engine. The adapter owns all actual
/// markup, layout variants and notice translation; the engine only decides
/// which of these happen and when.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderInstruction {
    /// Show exactly these entries (full refresh). `empty` drives the
    /// "no items" display.
    ReplaceList { entries: Vec<Entry>, empty: bool },

    /// A confirmed append: show `entry` first and drop the `evicted` rows
    /// that fell out of the visible window.
    PrependEntry { entry: Entry, evicted: Vec<EntryId> },

    /// A confirmed delete of a displayed entry.
    RemoveEntry { id: EntryId, now_empty: bool },

    /// Periodic countdown reading.
    Countdown(Countdown),

    /// Transient user-facing notice.
    Notice(UserNotice),

    /// Leave the current board for another one (observed fallback when the
    /// service rejects a board).
    RedirectTo { board: BoardName },
}

/// Semantic notices; the adapter translates them for the session language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserNotice {
    EntryAdded,
    EntryDeleted,
    PayloadTooLarge { limit_bytes: usize },
    RequestFailed { message: String },
}

/// Sink for render decisions. One engine instance may drive any number of
/// interchangeable adapters.
#[async_trait::async_trait]
pub trait RenderPort: Send + Sync {
    async fn apply(&self, instruction: RenderInstruction) -> Result<()>;
}
