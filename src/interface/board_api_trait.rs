use crate::core::session::BoardName;
use crate::error::RemoteResult;
use crate::message::{AppendPayload, BoardSnapshot, EntryId};

/// Typed access to the remote board store. Every operation answers with a
/// full snapshot of the board; failures are returned, never thrown.
#[async_trait::async_trait]
pub trait BoardApi: Send + Sync {
    /// Full read of the board's current entries and expiry.
    async fn fetch_board(&self, board: &BoardName) -> RemoteResult<BoardSnapshot>;

    /// Appends an entry; the returned snapshot's newest entry is the one
    /// just created, carrying its server-assigned id.
    async fn append_entry(
        &self,
        board: &BoardName,
        payload: AppendPayload,
    ) -> RemoteResult<BoardSnapshot>;

    /// Deletes an entry by id. Idempotent from the caller's perspective:
    /// deleting an absent id still answers with a valid snapshot as long
    /// as the board itself exists.
    async fn delete_entry(&self, board: &BoardName, id: &EntryId) -> RemoteResult<BoardSnapshot>;
}
