//! Where the raw record lives.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use super::PersistenceError;

/// Raw key/value slot holding one serialized record.
pub trait DraftStore: Send + Sync {
    /// Stored record, or `None` if nothing has been saved yet.
    fn load(&self) -> Result<Option<String>, PersistenceError>;

    /// Overwrite the stored record.
    fn store(&self, raw: &str) -> Result<(), PersistenceError>;
}

static WRITE_SEQ: AtomicU64 = AtomicU64::new(0);

/// One JSON file per storage key under the data directory.
#[derive(Debug, Clone)]
pub struct FileDraftStore {
    path: PathBuf,
}

impl FileDraftStore {
    pub fn new(data_dir: &Path, key: &str) -> Self {
        Self {
            path: data_dir.join(format!("{key}.json")),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DraftStore for FileDraftStore {
    fn load(&self) -> Result<Option<String>, PersistenceError> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn store(&self, raw: &str) -> Result<(), PersistenceError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        // Atomic replace; overlapping saves each get their own temp file.
        let seq = WRITE_SEQ.fetch_add(1, Ordering::Relaxed);
        let tmp = self.path.with_extension(format!("json.{seq}.tmp"));
        let written = fs::write(&tmp, raw).and_then(|()| fs::rename(&tmp, &self.path));
        if let Err(e) = written {
            if let Err(cleanup) = fs::remove_file(&tmp) {
                if cleanup.kind() != ErrorKind::NotFound {
                    tracing::warn!(path = %tmp.display(), error = %cleanup, "Failed to remove temp draft file");
                }
            }
            return Err(e.into());
        }
        Ok(())
    }
}

/// In-process store.
#[derive(Debug, Default)]
pub struct MemoryDraftStore {
    slot: Mutex<Option<String>>,
}

impl MemoryDraftStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_record(raw: impl Into<String>) -> Self {
        Self {
            slot: Mutex::new(Some(raw.into())),
        }
    }

    /// Current contents of the slot.
    pub fn contents(&self) -> Option<String> {
        self.slot.lock().ok().and_then(|slot| slot.clone())
    }
}

impl DraftStore for MemoryDraftStore {
    fn load(&self) -> Result<Option<String>, PersistenceError> {
        let slot = self.slot.lock().map_err(|_| PersistenceError::Poisoned)?;
        Ok(slot.clone())
    }

    fn store(&self, raw: &str) -> Result<(), PersistenceError> {
        let mut slot = self.slot.lock().map_err(|_| PersistenceError::Poisoned)?;
        *slot = Some(raw.to_string());
        Ok(())
    }
}
