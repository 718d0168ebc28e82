//! Background draft writes.
//!
//! Each save is spawned onto the runtime: wait out the configured latency,
//! stamp the time, write, and report back over a channel that the UI drains
//! on every tick. Saves are not serialized against each other; the last
//! write to land wins. Pending saves must be flushed before the runtime
//! shuts down or they are lost.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use super::record::encode;
use super::store::DraftStore;
use crate::core::wizard::SaveRequest;

/// Result of one background save.
#[derive(Debug, Clone, PartialEq)]
pub enum SaveOutcome {
    Saved { step: usize, timestamp: DateTime<Utc> },
    Failed { error: String },
}

pub struct DraftSaver {
    store: Arc<dyn DraftStore>,
    delay: Duration,
    outcome_tx: mpsc::UnboundedSender<SaveOutcome>,
    outcome_rx: mpsc::UnboundedReceiver<SaveOutcome>,
    pending: Vec<JoinHandle<()>>,
}

impl DraftSaver {
    pub fn new(store: Arc<dyn DraftStore>, delay: Duration) -> Self {
        let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();
        Self {
            store,
            delay,
            outcome_tx,
            outcome_rx,
            pending: Vec::new(),
        }
    }

    pub fn store(&self) -> &Arc<dyn DraftStore> {
        &self.store
    }

    /// Spawn a write of `request`. Must be called inside a tokio runtime.
    pub fn spawn(&mut self, request: SaveRequest) {
        let store = Arc::clone(&self.store);
        let delay = self.delay;
        let tx = self.outcome_tx.clone();

        self.pending.retain(|handle| !handle.is_finished());
        self.pending.push(tokio::spawn(async move {
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            let outcome = write_now(store.as_ref(), &request, Utc::now());
            let _ = tx.send(outcome);
        }));
    }

    /// Number of spawned saves that have not finished writing.
    pub fn pending(&self) -> usize {
        self.pending.iter().filter(|handle| !handle.is_finished()).count()
    }

    /// Wait for every spawned save to finish and return all unreported
    /// outcomes. Call before leaving the runtime.
    pub async fn flush(&mut self) -> Vec<SaveOutcome> {
        let pending = std::mem::take(&mut self.pending);
        if !pending.is_empty() {
            tracing::debug!(count = pending.len(), "Waiting for pending draft saves");
        }
        for handle in pending {
            if let Err(e) = handle.await {
                tracing::error!(error = %e, "Draft save task did not complete");
            }
        }
        self.poll()
    }

    /// Drain finished saves. Call from on_tick.
    pub fn poll(&mut self) -> Vec<SaveOutcome> {
        let mut done = Vec::new();
        while let Ok(outcome) = self.outcome_rx.try_recv() {
            done.push(outcome);
        }
        done
    }

    /// Wait for the next finished save.
    pub async fn next_outcome(&mut self) -> Option<SaveOutcome> {
        self.outcome_rx.recv().await
    }
}

/// Encode and write synchronously.
pub fn write_now(store: &dyn DraftStore, request: &SaveRequest, timestamp: DateTime<Utc>) -> SaveOutcome {
    let result = encode(&request.draft, request.step, timestamp).and_then(|raw| store.store(&raw));
    match result {
        Ok(()) => {
            tracing::debug!(step = request.step, %timestamp, "Draft saved");
            SaveOutcome::Saved {
                step: request.step,
                timestamp,
            }
        }
        Err(e) => {
            tracing::error!(step = request.step, error = %e, "Failed to save draft");
            SaveOutcome::Failed {
                error: e.to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::draft::Draft;
    use crate::core::persistence::{decode, MemoryDraftStore, PersistenceError};

    struct BrokenStore;

    impl DraftStore for BrokenStore {
        fn load(&self) -> Result<Option<String>, PersistenceError> {
            Ok(None)
        }

        fn store(&self, _raw: &str) -> Result<(), PersistenceError> {
            Err(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only").into())
        }
    }

    fn request(step: usize) -> SaveRequest {
        let mut draft = Draft::new();
        draft.issue.name = "Series A Preferred".to_string();
        SaveRequest { draft, step }
    }

    #[tokio::test]
    async fn test_spawned_save_writes_record() {
        let store = Arc::new(MemoryDraftStore::new());
        let mut saver = DraftSaver::new(store.clone(), Duration::from_millis(5));

        saver.spawn(request(3));
        let (step, timestamp) = match saver.next_outcome().await {
            Some(SaveOutcome::Saved { step, timestamp }) => (step, timestamp),
            other => panic!("expected a successful save, got {other:?}"),
        };
        assert_eq!(step, 3);

        let restored = decode(&store.contents().unwrap()).unwrap();
        assert_eq!(restored.step, 3);
        assert_eq!(restored.draft.issue.name, "Series A Preferred");
        assert_eq!(restored.timestamp.unwrap().timestamp_millis(), timestamp.timestamp_millis());
    }

    #[tokio::test(start_paused = true)]
    async fn test_save_waits_for_delay() {
        let store = Arc::new(MemoryDraftStore::new());
        let mut saver = DraftSaver::new(store.clone(), Duration::from_millis(500));

        saver.spawn(request(1));
        tokio::task::yield_now().await;
        assert!(saver.poll().is_empty());
        assert!(store.contents().is_none());

        tokio::time::sleep(Duration::from_millis(600)).await;
        assert_eq!(saver.poll().len(), 1);
        assert!(store.contents().is_some());
    }

    #[tokio::test]
    async fn test_failed_save_reports() {
        let mut saver = DraftSaver::new(Arc::new(BrokenStore), Duration::ZERO);
        saver.spawn(request(0));
        let outcome = saver.next_outcome().await.unwrap();
        assert!(matches!(outcome, SaveOutcome::Failed { ref error } if error.contains("read-only")));
    }

    #[tokio::test(start_paused = true)]
    async fn test_flush_waits_for_pending_saves() {
        let store = Arc::new(MemoryDraftStore::new());
        let mut saver = DraftSaver::new(store.clone(), Duration::from_millis(500));

        saver.spawn(request(1));
        saver.spawn(request(2));
        assert_eq!(saver.pending(), 2);
        assert!(store.contents().is_none());

        let outcomes = saver.flush().await;
        assert_eq!(outcomes.len(), 2);
        assert!(outcomes.iter().all(|o| matches!(o, SaveOutcome::Saved { .. })));
        assert_eq!(saver.pending(), 0);
        assert!(store.contents().is_some());
    }

    #[tokio::test]
    async fn test_flush_with_nothing_pending() {
        let mut saver = DraftSaver::new(Arc::new(MemoryDraftStore::new()), Duration::ZERO);
        assert!(saver.flush().await.is_empty());
    }
}
