use super::Storage;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Mirrors committed snapshots into one storage slot.
///
/// The only writer of its slot. It sleeps until the snapshot channel reports a
/// version it has not written yet, so an unchanged cart is never rewritten, and a
/// burst of commits made while a write is in flight collapses into one write of
/// the newest snapshot. A failed write is logged and the next commit retries
/// with fresh contents.
///
/// When the sending side closes, any snapshot not yet written is flushed
/// before [`SlotWriter::run`] returns.
pub struct SlotWriter<T> {
    storage: Arc<dyn Storage>,
    key: String,
    snapshots: watch::Receiver<Vec<T>>,
}

impl<T: Serialize + Send + Sync + 'static> SlotWriter<T> {
    /// `snapshots` should come from `subscribe()` so the state already in the
    /// slot is not written back.
    pub fn new(storage: Arc<dyn Storage>, key: impl Into<String>, snapshots: watch::Receiver<Vec<T>>) -> Self {
        Self {
            storage,
            key: key.into(),
            snapshots,
        }
    }

    pub async fn run(mut self) {
        info!(key = %self.key, "Writer started");
        let mut writes = 0usize;

        while self.snapshots.changed().await.is_ok() {
            let serialized = {
                let snapshot = self.snapshots.borrow_and_update();
                serde_json::to_string(&*snapshot)
            };
            let value = match serialized {
                Ok(value) => value,
                Err(e) => {
                    warn!(key = %self.key, error = %e, "Snapshot not serializable");
                    continue;
                }
            };

            match self.storage.set(&self.key, &value).await {
                Ok(()) => {
                    writes += 1;
                    debug!(key = %self.key, bytes = value.len(), "Snapshot persisted");
                }
                Err(e) => warn!(key = %self.key, error = %e, "Snapshot write failed"),
            }
        }

        info!(key = %self.key, writes, "Writer stopped");
    }
}
