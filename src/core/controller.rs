//! Orchestrates board round trips against the remote store.
//!
//! Every operation follows the same shape: issue one remote call, apply
//! the confirmed snapshot to history and countdown as a whole (or not at
//! all on failure), emit render decisions, and, for mutations only, fan
//! out one peer notification. Nothing is applied optimistically; server
//! truth always wins, at the granularity of one completed round trip.
//!
//! Overlapping operations are not mutually excluded. Each completion
//! applies independently and the last one wins, which can transiently
//! show a stale history until the next refetch or peer signal.

use log::{debug, error, info, warn};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::config::ClientConfig;
use crate::core::expiry::ExpiryClock;
use crate::core::history::BoundedHistoryStore;
use crate::core::session::{BoardName, SessionContext};
use crate::core::sync_state::SyncPhase;
use crate::error::{LocalError, RemoteError, RemoteResult};
use crate::interface::{
    BoardApi, PeerEvent, PeerNotifier, RenderInstruction, RenderPort, UserNotice,
};
use crate::message::{AppendPayload, EntryId};

pub struct SyncController {
    session: Arc<SessionContext>,
    api: Arc<dyn BoardApi>,
    history: Arc<RwLock<BoundedHistoryStore>>,
    clock: Arc<ExpiryClock>,
    render: Arc<dyn RenderPort>,
    peers: Arc<dyn PeerNotifier>,
    phase: RwLock<SyncPhase>,
    default_board: BoardName,
    max_payload_bytes: usize,
}

impl SyncController {
    pub fn new(
        session: Arc<SessionContext>,
        config: &ClientConfig,
        api: Arc<dyn BoardApi>,
        clock: Arc<ExpiryClock>,
        render: Arc<dyn RenderPort>,
        peers: Arc<dyn PeerNotifier>,
    ) -> Self {
        Self {
            session,
            api,
            history: Arc::new(RwLock::new(BoundedHistoryStore::new())),
            clock,
            render,
            peers,
            phase: RwLock::new(SyncPhase::default()),
            default_board: BoardName::resolve(Some(&config.default_board)),
            max_payload_bytes: config.max_payload_bytes,
        }
    }

    pub fn history(&self) -> Arc<RwLock<BoundedHistoryStore>> {
        self.history.clone()
    }

    pub async fn phase(&self) -> SyncPhase {
        *self.phase.read().await
    }

    /// Full refetch of the active board.
    ///
    /// On success the snapshot replaces history and re-arms the countdown,
    /// followed by a full-list render. A server rejection surfaces the
    /// server's message and a redirect to the default board; a transport
    /// failure only surfaces the message. Both leave history and countdown
    /// untouched, and neither schedules a retry.
    pub async fn on_load(&self) -> RemoteResult<()> {
        self.begin().await;
        info!("Fetching board {}", self.session.board());
        let result = self.api.fetch_board(self.session.board()).await;
        if self.discard_if_disposed("load") {
            return Ok(());
        }

        match result {
            Ok(snapshot) => {
                let entries = {
                    let mut history = self.history.write().await;
                    history.replace(&snapshot);
                    history.entries()
                };
                self.clock.arm(snapshot.expire_at).await;
                self.finish(true).await;
                let empty = entries.is_empty();
                self.emit(RenderInstruction::ReplaceList { entries, empty })
                    .await;
                Ok(())
            }
            Err(err) => {
                self.finish(false).await;
                warn!("Board fetch failed: {}", err);
                self.emit(RenderInstruction::Notice(UserNotice::RequestFailed {
                    message: err.surface_message(),
                }))
                .await;
                if matches!(err, RemoteError::Rejected { .. }) {
                    self.emit(RenderInstruction::RedirectTo {
                        board: self.default_board.clone(),
                    })
                    .await;
                }
                Err(err)
            }
        }
    }

    /// Appends user content to the board.
    ///
    /// Empty trimmed text is a quiet no-op. The size ceiling is enforced
    /// before any network traffic. On confirmation the new entry becomes
    /// the newest-displayed one regardless of server-side ordering
    /// elsewhere, and exactly one peer notification goes out.
    pub async fn on_append(&self, payload: AppendPayload) -> RemoteResult<()> {
        let payload = match payload.normalized() {
            Ok(payload) => payload,
            Err(LocalError::EmptyInput) => {
                debug!("Skip append: empty input");
                return Ok(());
            }
        };

        let size = payload.size_bytes();
        if size > self.max_payload_bytes {
            self.emit(RenderInstruction::Notice(UserNotice::PayloadTooLarge {
                limit_bytes: self.max_payload_bytes,
            }))
            .await;
            return Err(RemoteError::PayloadTooLarge {
                size,
                limit: self.max_payload_bytes,
            });
        }

        self.begin().await;
        info!("Appending {} bytes to board {}", size, self.session.board());
        let result = self.api.append_entry(self.session.board(), payload).await;
        if self.discard_if_disposed("append") {
            return Ok(());
        }

        match result {
            Ok(snapshot) => {
                // 服务端返回的最新一条就是刚追加的记录
                if let Some(entry) = snapshot.newest().cloned() {
                    let evicted = self.history.write().await.prepend(entry.clone());
                    self.emit(RenderInstruction::PrependEntry { entry, evicted })
                        .await;
                } else {
                    warn!("Append confirmed without an entry in the snapshot");
                }
                self.clock.arm(snapshot.expire_at).await;
                self.finish(true).await;
                self.emit(RenderInstruction::Notice(UserNotice::EntryAdded))
                    .await;
                self.notify_peers().await;
                Ok(())
            }
            Err(err) => {
                self.finish(false).await;
                warn!("Append failed: {}", err);
                self.emit(RenderInstruction::Notice(UserNotice::RequestFailed {
                    message: err.surface_message(),
                }))
                .await;
                Err(err)
            }
        }
    }

    /// Deletes an entry, confirmation first: nothing leaves the local
    /// window until the service has acknowledged the delete.
    pub async fn on_delete(&self, id: &EntryId) -> RemoteResult<()> {
        self.begin().await;
        info!("Deleting entry {} from board {}", id, self.session.board());
        let result = self.api.delete_entry(self.session.board(), id).await;
        if self.discard_if_disposed("delete") {
            return Ok(());
        }

        match result {
            Ok(snapshot) => {
                let (removed, now_empty) = {
                    let mut history = self.history.write().await;
                    let removed = history.remove(id);
                    (removed, history.is_empty())
                };
                self.clock.arm(snapshot.expire_at).await;
                self.finish(true).await;
                if removed {
                    self.emit(RenderInstruction::RemoveEntry {
                        id: id.clone(),
                        now_empty,
                    })
                    .await;
                } else {
                    debug!("Delete confirmed for entry {} not displayed here", id);
                }
                self.emit(RenderInstruction::Notice(UserNotice::EntryDeleted))
                    .await;
                self.notify_peers().await;
                Ok(())
            }
            Err(err) => {
                self.finish(false).await;
                warn!("Delete failed: {}", err);
                self.emit(RenderInstruction::Notice(UserNotice::RequestFailed {
                    message: err.surface_message(),
                }))
                .await;
                Err(err)
            }
        }
    }

    /// Another device changed the board. The embedded state is never
    /// trusted: convergence comes from a full refetch, so losing or
    /// reordering signals can only delay freshness, not corrupt it.
    pub async fn on_peer_signal(&self, event: PeerEvent) -> RemoteResult<()> {
        if &event.board != self.session.board() {
            debug!(
                "Ignore peer signal for board {} (watching {})",
                event.board,
                self.session.board()
            );
            return Ok(());
        }
        debug!("Peer signal for board {}, refetching", event.board);
        self.on_load().await
    }

    /// Tears the view down: stops the countdown and discards completions
    /// of any still-running calls.
    pub async fn dispose(&self) {
        self.session.dispose();
        self.clock.disarm().await;
        debug!("Session for board {} disposed", self.session.board());
    }

    async fn begin(&self) {
        let mut phase = self.phase.write().await;
        *phase = phase.begin_load();
    }

    async fn finish(&self, success: bool) {
        let mut phase = self.phase.write().await;
        *phase = phase.complete(success);
    }

    fn discard_if_disposed(&self, operation: &str) -> bool {
        if self.session.is_disposed() {
            debug!("Discarding {} completion: session disposed", operation);
            true
        } else {
            false
        }
    }

    async fn emit(&self, instruction: RenderInstruction) {
        if let Err(err) = self.render.apply(instruction).await {
            error!("Render port failure: {}", err);
        }
    }

    async fn notify_peers(&self) {
        let event = PeerEvent::board_update(self.session.board().clone());
        if let Err(err) = self.peers.broadcast(event).await {
            error!("Peer notify failed: {}", err);
        }
    }
}
