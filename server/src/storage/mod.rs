//! Storage collaborator.
//!
//! The engine computes which events changed; this module writes them.
//! Every write targets one record and is idempotent. A batch is issued
//! concurrently and each failure is reported on its own.

mod memory;

pub use memory::MemoryStore;

use cronos_engine::{Event, EventId};
use futures::future::join_all;

/// Storage errors.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Snapshot error: {0}")]
    Snapshot(#[from] cronos_engine::Error),
}

/// Upsert every event concurrently.
///
/// Returns the ids that failed to persist. In-memory state is never rolled
/// back; the failed records can be written again later.
pub async fn persist_events(store: &MemoryStore, events: &[Event]) -> Vec<EventId> {
    let results = join_all(events.iter().cloned().map(|event| store.upsert_event(event))).await;

    let mut failed = Vec::new();
    for (event, result) in events.iter().zip(results) {
        if let Err(e) = result {
            tracing::warn!(event = %event.id, error = %e, "Failed to persist event");
            failed.push(event.id.clone());
        }
    }

    if let Err(e) = store.flush().await {
        tracing::warn!(error = %e, "Failed to flush store");
    }

    failed
}
