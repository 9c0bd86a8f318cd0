//! Key-value persistence for the small amount of state that survives restarts.
//!
//! The platform store is modelled by the [`KeyValueStore`] trait: a single flat
//! namespace of string keys mapping to a [`Value`]. [`MemoryStore`] is the
//! in-RAM implementation; its postcard snapshot ([`MemoryStore::to_bytes`]) is
//! the durable record a file or flash backend writes. [`Preferences`] sits on
//! top and provides the typed, fire-and-forget API the application uses.

pub mod preferences;

pub use preferences::{PrefKey, Preferences};

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};
use thiserror_no_std::Error;

/// Maximum length of a fully qualified key (`"<namespace>.<key>"`)
pub const MAX_KEY_LEN: usize = 48;

/// Maximum length of a stored text value
pub const MAX_TEXT_LEN: usize = 16;

pub type TextValue = heapless::String<MAX_TEXT_LEN>;

/// A single stored value
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Float(f32),
    Text(TextValue),
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageError {
    #[error("failed to encode preferences record")]
    Encode,
    #[error("failed to decode preferences record")]
    Decode,
    #[error("storage backend I/O failed")]
    Io,
    #[error("key is longer than the store allows")]
    KeyTooLong,
}

/// Flat key-value store backing the preferences.
///
/// A successful `write` is assumed durable once it returns; there is no
/// separate flush.
pub trait KeyValueStore {
    /// Read the value stored under `key`, `Ok(None)` if nothing was ever stored.
    fn read(&self, key: &str) -> Result<Option<Value>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    fn write(&mut self, key: &str, value: Value) -> Result<(), StorageError>;
}

/// In-memory store, snapshot-able to a postcard record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryStore {
    entries: BTreeMap<String, Value>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore a store from a snapshot produced by [`MemoryStore::to_bytes`].
    ///
    /// An empty buffer is a store that was never written.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, StorageError> {
        if bytes.is_empty() {
            return Ok(Self::default());
        }
        let entries = postcard::from_bytes(bytes).map_err(|_| StorageError::Decode)?;
        Ok(Self { entries })
    }

    /// Encode every entry into a single postcard record.
    pub fn to_bytes(&self) -> Result<Vec<u8>, StorageError> {
        postcard::to_allocvec(&self.entries).map_err(|_| StorageError::Encode)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<Value>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: Value) -> Result<(), StorageError> {
        if key.len() > MAX_KEY_LEN {
            return Err(StorageError::KeyTooLong);
        }
        self.entries.insert(String::from(key), value);
        Ok(())
    }
}
