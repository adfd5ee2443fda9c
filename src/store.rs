//! Key-value persistence seam.
//!
//! Invoice history is an append-only JSON log behind this interface, so the
//! billing service stays independent of where the log actually lives
//! (in-process, on disk, or a remote store).

use std::{
    collections::HashMap,
    sync::{Mutex, PoisonError},
};

use mockall::automock;
use thiserror::Error;

/// Errors raised by a key-value store backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store's lock was poisoned by a panicking writer.
    #[error("store lock poisoned")]
    Poisoned,

    /// The backing store failed to read or write.
    #[error("storage backend error: {0}")]
    Backend(String),
}

impl<T> From<PoisonError<T>> for StoreError {
    fn from(_: PoisonError<T>) -> Self {
        Self::Poisoned
    }
}

/// String-keyed, JSON-valued storage.
#[automock]
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: String) -> Result<(), StoreError>;
}

/// In-process [`KeyValueStore`] backed by a mutex-guarded map.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let entries = self.entries.lock()?;

        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: String) -> Result<(), StoreError> {
        let mut entries = self.entries.lock()?;

        entries.insert(key.to_owned(), value);

        Ok(())
    }
}
