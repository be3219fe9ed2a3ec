//! Key-value persistence for the player and match collections.
//!
//! Each collection is stored whole, as JSON, under its own key. Reads that fail or
//! hold garbage load as an empty collection; writes happen in the background and a
//! failed write is only logged.

use crate::models::{PadelMatch, Player, Tracker};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tokio::io::AsyncWriteExt;
use tokio::sync::{mpsc, oneshot};

pub const PLAYERS_KEY: &str = "padel:players";
pub const MATCHES_KEY: &str = "padel:matches";

/// Errors from a storage backend.
#[derive(Debug)]
pub enum StorageError {
    Io(std::io::Error),
    /// Backend refused the operation.
    Unavailable,
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Io(e) => write!(f, "storage I/O error: {}", e),
            StorageError::Unavailable => write!(f, "storage unavailable"),
        }
    }
}

impl std::error::Error for StorageError {}

impl From<std::io::Error> for StorageError {
    fn from(e: std::io::Error) -> Self {
        StorageError::Io(e)
    }
}

/// Asynchronous string key-value store.
pub trait KeyValueStore: Clone + Send + Sync + 'static {
    /// `Ok(None)` when nothing is stored under `key`.
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<String>, StorageError>> + Send;

    /// Replace the value under `key`.
    fn set(&self, key: &str, value: String) -> impl Future<Output = Result<(), StorageError>> + Send;
}

/// One JSON file per key inside a data directory.
#[derive(Clone, Debug)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// `padel:players` -> `<dir>/padel_players.json`
    pub fn path_for(&self, key: &str) -> PathBuf {
        let name: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        self.dir.join(format!("{name}.json"))
    }
}

impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match tokio::fs::read_to_string(self.path_for(key)).await {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Write to a temp file, sync it, then rename over the target so a crash never leaves a half-written collection.
    async fn set(&self, key: &str, value: String) -> Result<(), StorageError> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let path = self.path_for(key);
        let temp_path = path.with_extension("json.tmp");
        {
            let mut file = tokio::fs::File::create(&temp_path).await?;
            file.write_all(value.as_bytes()).await?;
            file.flush().await?;
            file.sync_all().await?;
        }
        tokio::fs::rename(&temp_path, &path).await?;
        log::debug!("Saved {} bytes to {:?}", value.len(), path);
        Ok(())
    }
}

/// In-memory store. Can be switched to fail every call.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    values: Arc<Mutex<HashMap<String, String>>>,
    failing: Arc<AtomicBool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `get`/`set` return [`StorageError::Unavailable`].
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Current value under `key`, bypassing the failure switch.
    pub fn value(&self, key: &str) -> Option<String> {
        self.values.lock().ok()?.get(key).cloned()
    }

    /// Seed a value, bypassing the failure switch.
    pub fn insert(&self, key: &str, value: impl Into<String>) {
        if let Ok(mut values) = self.values.lock() {
            values.insert(key.to_string(), value.into());
        }
    }

    fn check(&self) -> Result<(), StorageError> {
        if self.failing.load(Ordering::SeqCst) {
            Err(StorageError::Unavailable)
        } else {
            Ok(())
        }
    }
}

impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.check()?;
        let values = self.values.lock().map_err(|_| StorageError::Unavailable)?;
        Ok(values.get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> Result<(), StorageError> {
        self.check()?;
        let mut values = self.values.lock().map_err(|_| StorageError::Unavailable)?;
        values.insert(key.to_string(), value);
        Ok(())
    }
}

/// Read both collections once. Anything missing, unreadable or unparseable loads as empty.
pub async fn load_tracker<S: KeyValueStore>(store: &S) -> Tracker {
    let players: Vec<Player> = load_collection(store, PLAYERS_KEY).await;
    let matches: Vec<PadelMatch> = load_collection(store, MATCHES_KEY).await;
    log::info!("Loaded {} player(s) and {} match(es)", players.len(), matches.len());
    Tracker::with_data(players, matches)
}

async fn load_collection<S: KeyValueStore, T: DeserializeOwned>(store: &S, key: &str) -> Vec<T> {
    match store.get(key).await {
        Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|e| {
            log::warn!("Ignoring unparseable {}: {}", key, e);
            Vec::new()
        }),
        Ok(None) => Vec::new(),
        Err(e) => {
            log::warn!("Could not read {}: {}", key, e);
            Vec::new()
        }
    }
}

enum SaveRequest {
    Write { key: &'static str, value: String },
    Flush(oneshot::Sender<()>),
}

/// Handle to the background writer. Saves are queued in order and never awaited by the caller.
#[derive(Clone, Debug)]
pub struct Saver {
    tx: mpsc::UnboundedSender<SaveRequest>,
}

impl fmt::Debug for SaveRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SaveRequest::Write { key, value } => write!(f, "Write({}, {} bytes)", key, value.len()),
            SaveRequest::Flush(_) => write!(f, "Flush"),
        }
    }
}

impl Saver {
    /// Start the writer task on the current tokio runtime.
    pub fn spawn<S: KeyValueStore>(store: S) -> Self {
        let (tx, mut rx) = mpsc::unbounded_channel::<SaveRequest>();
        tokio::spawn(async move {
            while let Some(req) = rx.recv().await {
                match req {
                    SaveRequest::Write { key, value } => {
                        if let Err(e) = store.set(key, value).await {
                            log::warn!("Failed to save {}: {}", key, e);
                        }
                    }
                    SaveRequest::Flush(done) => {
                        let _ = done.send(());
                    }
                }
            }
        });
        Self { tx }
    }

    pub fn save_players(&self, players: &[Player]) {
        self.save(PLAYERS_KEY, players);
    }

    pub fn save_matches(&self, matches: &[PadelMatch]) {
        self.save(MATCHES_KEY, matches);
    }

    fn save<T: Serialize + ?Sized>(&self, key: &'static str, items: &T) {
        let value = match serde_json::to_string(items) {
            Ok(v) => v,
            Err(e) => {
                log::warn!("Failed to serialize {}: {}", key, e);
                return;
            }
        };
        if self.tx.send(SaveRequest::Write { key, value }).is_err() {
            log::warn!("Save queue closed; {} not saved", key);
        }
    }

    /// Wait until every save queued so far has been attempted.
    pub async fn flush(&self) {
        let (done, wait) = oneshot::channel();
        if self.tx.send(SaveRequest::Flush(done)).is_ok() {
            let _ = wait.await;
        }
    }
}
