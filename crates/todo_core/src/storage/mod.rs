//! Key-value slot storage contracts and implementations.
//!
//! # Responsibility
//! - Define the single-slot persistence contract used by the task store.
//! - Keep SQLite details out of the store and widget layers.
//!
//! # Invariants
//! - `set` is a full overwrite of one slot; there are no partial updates.
//! - A missing slot reads as `Ok(None)`, never as an error.

pub mod memory;
pub mod sqlite;
pub mod task_codec;

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub use memory::MemoryKeyValueStore;
pub use sqlite::SqliteKeyValueStore;
pub use task_codec::{decode_tasks, encode_tasks, TaskCodecError};

pub type StorageResult<T> = Result<T, StorageError>;

/// Transport error raised by slot stores.
#[derive(Debug)]
pub enum StorageError {
    Db(DbError),
    Unavailable(String),
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Unavailable(message) => write!(f, "slot store unavailable: {message}"),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Unavailable(_) => None,
        }
    }
}

impl From<DbError> for StorageError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Persistent string slots addressed by key.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> StorageResult<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        (**self).set(key, value)
    }
}
