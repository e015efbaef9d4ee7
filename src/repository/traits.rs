//! Repository Layer - Core Traits
//!
//! Defines the abstract persistence ports.
//! Implementations can use SQLite, in-memory maps, etc.

use std::marker::PhantomData;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

/// Storage-level errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Raw key-value storage: whole values under string keys
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Overwrite the value under `key`
    fn set(&self, key: &str, value: &str) -> StorageResult<()>;
}

/// Load/save port for one whole collection
pub trait CollectionPort<T>: Send + Sync {
    /// `None` when nothing usable is stored
    fn load(&self) -> StorageResult<Option<T>>;

    fn save(&self, value: &T) -> StorageResult<()>;
}

/// A collection stored as one JSON document under a fixed key
pub struct JsonSlot<T> {
    store: Arc<dyn KeyValueStore>,
    key: &'static str,
    _marker: PhantomData<fn() -> T>,
}

impl<T> JsonSlot<T> {
    pub fn new(store: Arc<dyn KeyValueStore>, key: &'static str) -> Self {
        Self {
            store,
            key,
            _marker: PhantomData,
        }
    }

    pub fn key(&self) -> &'static str {
        self.key
    }
}

impl<T> CollectionPort<T> for JsonSlot<T>
where
    T: Serialize + DeserializeOwned,
{
    fn load(&self) -> StorageResult<Option<T>> {
        let Some(raw) = self.store.get(self.key)? else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                // Malformed data counts as absent
                log::warn!("Ignoring malformed '{}' in storage: {}", self.key, e);
                Ok(None)
            }
        }
    }

    fn save(&self, value: &T) -> StorageResult<()> {
        let json = serde_json::to_string(value)?;
        self.store.set(self.key, &json)
    }
}

/// Port that never persists (session-only collections)
pub struct Ephemeral;

impl<T> CollectionPort<T> for Ephemeral {
    fn load(&self) -> StorageResult<Option<T>> {
        Ok(None)
    }

    fn save(&self, _value: &T) -> StorageResult<()> {
        Ok(())
    }
}
