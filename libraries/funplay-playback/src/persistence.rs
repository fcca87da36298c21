//! Client-local session persistence
//!
//! The live session is written as one JSON document under a single key.
//! Writes are queued to a background thread so mutations never wait on I/O;
//! the queue is drained in order, so the stored copy always converges on the
//! latest mutation.

use crate::error::Result;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, warn};

/// Durable key/value storage for serialized sessions
pub trait SessionStorage: Send + Sync {
    /// Read the value stored under `key`
    fn load(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    fn save(&self, key: &str, value: &str) -> Result<()>;

    /// Delete the value under `key` (no error if absent)
    fn remove(&self, key: &str) -> Result<()>;
}

/// Stores each key as `<dir>/<key>.json`
#[derive(Debug, Clone)]
pub struct FileSessionStorage {
    dir: PathBuf,
}

impl FileSessionStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl SessionStorage for FileSessionStorage {
    fn load(&self, key: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, key: &str, value: &str) -> Result<()> {
        fs::create_dir_all(&self.dir)?;

        // Write-then-rename so a crash never leaves a truncated session
        let tmp = self.dir.join(format!(".{}.json.tmp", key));
        fs::write(&tmp, value)?;
        fs::rename(&tmp, self.path_for(key))?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Process-memory storage (tests, ephemeral sessions)
#[derive(Debug, Default)]
pub struct MemorySessionStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemorySessionStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStorage for MemorySessionStorage {
    fn load(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.lock().get(key).cloned())
    }

    fn save(&self, key: &str, value: &str) -> Result<()> {
        self.entries
            .lock()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.entries.lock().remove(key);
        Ok(())
    }
}

enum WriteCommand {
    Save(String),
    Remove,
    Flush(oneshot::Sender<()>),
}

/// Fire-and-forget writer for one storage key
///
/// Owns a background thread that exits once the writer is dropped and the
/// queue is drained.
pub(crate) struct PersistenceWriter {
    tx: mpsc::UnboundedSender<WriteCommand>,
}

impl PersistenceWriter {
    pub(crate) fn spawn(storage: Arc<dyn SessionStorage>, key: String) -> Result<Self> {
        let (tx, mut rx) = mpsc::unbounded_channel::<WriteCommand>();

        std::thread::Builder::new()
            .name("funplay-persist".to_string())
            .spawn(move || {
                while let Some(command) = rx.blocking_recv() {
                    match command {
                        WriteCommand::Save(payload) => {
                            if let Err(e) = storage.save(&key, &payload) {
                                warn!(key = %key, error = %e, "Failed to persist playback session");
                            }
                        }
                        WriteCommand::Remove => {
                            if let Err(e) = storage.remove(&key) {
                                warn!(key = %key, error = %e, "Failed to remove persisted session");
                            }
                        }
                        WriteCommand::Flush(done) => {
                            let _ = done.send(());
                        }
                    }
                }
                debug!(key = %key, "Persistence writer stopped");
            })?;

        Ok(Self { tx })
    }

    pub(crate) fn save(&self, payload: String) {
        self.send(WriteCommand::Save(payload));
    }

    pub(crate) fn remove(&self) {
        self.send(WriteCommand::Remove);
    }

    /// Wait until every previously queued write has been applied
    pub(crate) async fn flush(&self) {
        let (done, wait) = oneshot::channel();
        self.send(WriteCommand::Flush(done));
        let _ = wait.await;
    }

    fn send(&self, command: WriteCommand) {
        if self.tx.send(command).is_err() {
            warn!("Persistence writer is gone; dropping write");
        }
    }
}
