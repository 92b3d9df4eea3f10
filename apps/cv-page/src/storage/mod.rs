// Durable key-value storage, the on-device stand-in for browser local storage.
// Everything that persists goes through `KeyValueStore` so tests can swap in `MemoryStore`.

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::errors::StorageError;

/// String key-value storage with synchronous, bounded access.
pub trait KeyValueStore {
    /// Returns the stored value, or `None` when the key was never written.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Overwrites the value under `key`. A failed write leaves the previous value in place.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}
