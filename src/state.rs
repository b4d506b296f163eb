//! Shared tally state and fan-out dispatcher
//!
//! Thread-safe owner of the tally board. Every applied update recomputes the
//! ranked snapshot and broadcasts it once; both delivery channels (raw
//! sockets, SSE subscriptions) are fed from the same broadcast sender, so a
//! given update produces an identical snapshot on each sink.

use std::sync::Mutex;

use tokio::sync::broadcast;

use crate::tally::{Medal, TallyBoard, TallySnapshot};

/// Shared state accessible by the ingest and API layers.
///
/// Mutation, ranking and broadcast happen under one mutex acquisition, so
/// concurrent updates cannot interleave and subscribers observe snapshots in
/// mutation order.
pub struct SharedState {
    board: Mutex<TallyBoard>,

    /// Snapshot broadcaster feeding all subscribers
    snapshot_tx: broadcast::Sender<TallySnapshot>,
}

impl SharedState {
    /// Create new shared state with an empty board
    pub fn new() -> Self {
        let (snapshot_tx, _) = broadcast::channel(100); // Buffer up to 100 snapshots
        Self {
            board: Mutex::new(TallyBoard::new()),
            snapshot_tx,
        }
    }

    /// Apply one validated award event and fan out the resulting snapshot.
    ///
    /// Returns the snapshot produced by this update. Send errors are ignored
    /// (no receivers is OK); a lagging receiver drops old snapshots rather
    /// than stalling the update path.
    pub fn apply_update(&self, country: &str, medal: Medal) -> TallySnapshot {
        let mut board = self.board.lock().unwrap_or_else(|e| e.into_inner());
        board.apply(country, medal);
        let snapshot = board.ranked();
        let _ = self.snapshot_tx.send(snapshot.clone());
        snapshot
    }

    /// Ranked snapshot of the current tallies
    pub fn snapshot(&self) -> TallySnapshot {
        self.board.lock().unwrap_or_else(|e| e.into_inner()).ranked()
    }

    /// Subscribe to the snapshot stream
    pub fn subscribe(&self) -> broadcast::Receiver<TallySnapshot> {
        self.snapshot_tx.subscribe()
    }

    /// Current number of snapshot subscribers
    pub fn subscriber_count(&self) -> usize {
        self.snapshot_tx.receiver_count()
    }
}

impl Default for SharedState {
    fn default() -> Self {
        Self::new()
    }
}
