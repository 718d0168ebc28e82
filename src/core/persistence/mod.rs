//! Local draft persistence.
//!
//! One record per storage key holds the whole draft, the step the user was
//! on and when it was written. Restoring never fails loudly: anything that
//! cannot be read or parsed is logged and the wizard starts fresh.

mod record;
mod saver;
mod store;

pub use record::{decode, encode, RestoredDraft, DEFAULT_STORAGE_KEY};
pub use saver::{write_now, DraftSaver, SaveOutcome};
pub use store::{DraftStore, FileDraftStore, MemoryDraftStore};

/// Shown after a successful restore.
pub const RESTORED_MESSAGE: &str = "Welcome back! Your progress has been restored.";

#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Malformed record: {0}")]
    Malformed(&'static str),

    #[error("Store lock poisoned")]
    Poisoned,
}

/// Load and decode the stored record, if there is a usable one.
pub fn restore(store: &dyn DraftStore) -> Option<RestoredDraft> {
    let raw = match store.load() {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            tracing::debug!("No saved draft found");
            return None;
        }
        Err(e) => {
            tracing::warn!(error = %e, "Failed to read saved draft, starting fresh");
            return None;
        }
    };

    match decode(&raw) {
        Ok(restored) => {
            tracing::info!(step = restored.step, saved_at = ?restored.timestamp, "Restored saved draft");
            Some(restored)
        }
        Err(e) => {
            tracing::warn!(error = %e, "Saved draft is unusable, starting fresh");
            None
        }
    }
}
