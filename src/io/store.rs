use std::collections::HashMap;
use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::io::lock::LockError;

/// Key holding the nickname entered at login (plain string)
pub const NICKNAME_KEY: &str = "nickname";
/// Key holding the list collection: JSON array of `{id, name}`
pub const ALL_CUSTOMERS_KEY: &str = "allCustomers";
/// Key holding the full project records (with tasks): JSON array
pub const LOCAL_PROJECTS_KEY: &str = "localProjects";

pub type PinFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Error type for key-value store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("invalid store key {0:?}")]
    InvalidKey(String),
    #[error("could not access {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not encode value: {0}")]
    Encode(#[from] serde_json::Error),
    #[error(transparent)]
    Lock(#[from] LockError),
    #[error("storage task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// An asynchronous string-keyed store. Values are opaque strings; there
/// are no transactions and no locking across calls.
pub trait KeyValueStore: Send + Sync {
    /// Read a key, `None` when absent
    fn get<'a>(&'a self, key: &'a str) -> PinFuture<'a, Result<Option<String>, StoreError>>;

    /// Write a key, replacing any previous value
    fn set<'a>(&'a self, key: &'a str, value: String) -> PinFuture<'a, Result<(), StoreError>>;

    /// Delete a key. Removing an absent key succeeds.
    fn remove<'a>(&'a self, key: &'a str) -> PinFuture<'a, Result<(), StoreError>>;
}

/// Keys end up as file names, so they are kept to a safe alphabet.
pub fn validate_key(key: &str) -> Result<(), StoreError> {
    let ok = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if ok {
        Ok(())
    } else {
        Err(StoreError::InvalidKey(key.to_string()))
    }
}

/// In-process store. Reads or writes can be made to fail, which is how
/// the storage-error paths are exercised.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `get` fail (or succeed again)
    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Make every subsequent `set`/`remove` fail (or succeed again)
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Synchronous peek, bypassing failure injection
    pub fn snapshot(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(key)
            .cloned()
    }

    fn check(&self, flag: &AtomicBool, op: &str) -> Result<(), StoreError> {
        if flag.load(Ordering::SeqCst) {
            Err(StoreError::Unavailable(format!("{} rejected", op)))
        } else {
            Ok(())
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn get<'a>(&'a self, key: &'a str) -> PinFuture<'a, Result<Option<String>, StoreError>> {
        Box::pin(async move {
            self.check(&self.fail_reads, "read")?;
            validate_key(key)?;
            Ok(self.snapshot(key))
        })
    }

    fn set<'a>(&'a self, key: &'a str, value: String) -> PinFuture<'a, Result<(), StoreError>> {
        Box::pin(async move {
            self.check(&self.fail_writes, "write")?;
            validate_key(key)?;
            self.entries
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .insert(key.to_string(), value);
            Ok(())
        })
    }

    fn remove<'a>(&'a self, key: &'a str) -> PinFuture<'a, Result<(), StoreError>> {
        Box::pin(async move {
            self.check(&self.fail_writes, "remove")?;
            validate_key(key)?;
            self.entries
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .remove(key);
            Ok(())
        })
    }
}
