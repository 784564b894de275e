//! Persistent key-value slots and the task store adapter.
//!
//! # Responsibility
//! - Define the single-valued slot contract (`KeyValueStore`).
//! - Serialize the whole task collection into one slot and read it back.
//!
//! # Invariants
//! - A slot holds at most one value; writes overwrite (last writer wins).
//! - Corrupt persisted state is reported as `StoreError::Corrupt`, never as a
//!   partially decoded collection.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod kv;
pub mod task_store;

pub use kv::{MemoryKeyValueStore, SqliteKeyValueStore};
pub use task_store::{TaskStore, DEFAULT_STORAGE_KEY};

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug)]
pub enum StoreError {
    /// Backend read/write failure.
    Sqlite(rusqlite::Error),
    /// Database was written by a newer binary.
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
    /// Connection has not been migrated to the schema this store needs.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// Slot content cannot be decoded into a valid task collection.
    Corrupt { key: String, message: String },
    /// Task collection cannot be encoded.
    Encode(serde_json::Error),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "database schema version {db_version} is newer than supported {latest_supported}"
            ),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} is below required {expected_version}"
            ),
            Self::Corrupt { key, message } => {
                write!(f, "corrupt state in slot `{key}`: {message}")
            }
            Self::Encode(err) => write!(f, "failed to encode tasks: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::Encode(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. }
            | Self::UninitializedConnection { .. }
            | Self::Corrupt { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

/// Single-valued persistent slots addressed by a string key.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> StoreResult<()>;
    fn remove(&mut self, key: &str) -> StoreResult<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> StoreResult<()> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> StoreResult<()> {
        (**self).remove(key)
    }
}
