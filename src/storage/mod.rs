//! Durable storage for tracker progress.
//!
//! Progress lives in a small key-value store (one JSON document per key),
//! mirroring how a browser keeps records in local storage. The adapter in
//! [`persistence`] maps `ProgressState` onto those records and [`snapshot`]
//! handles the portable export/import format.

pub mod file_store;
pub mod memory;
pub mod persistence;
pub mod snapshot;

pub use file_store::FileStore;
pub use memory::MemoryStore;
pub use persistence::Persistence;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O error on {key:?}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to encode {key:?}: {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// A string-keyed store of serialized records.
///
/// Writes always replace the whole record for a key.
pub trait KeyValueStore: Send {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}
