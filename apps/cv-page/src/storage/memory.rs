#![allow(dead_code)]

use std::collections::HashMap;

use crate::errors::StorageError;
use crate::storage::KeyValueStore;

/// In-memory store with failure injection.
///
/// `unavailable()` mimics a privacy-mode browser where every access throws;
/// `with_quota()` mimics a full origin quota (keys plus values, in bytes).
#[derive(Debug, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
    available: bool,
    quota: Option<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore {
            entries: HashMap::new(),
            available: true,
            quota: None,
        }
    }

    pub fn unavailable() -> Self {
        MemoryStore {
            available: false,
            ..MemoryStore::new()
        }
    }

    pub fn with_quota(limit: usize) -> Self {
        MemoryStore {
            quota: Some(limit),
            ..MemoryStore::new()
        }
    }

    pub fn set_available(&mut self, available: bool) {
        self.available = available;
    }

    fn used_bytes_with(&self, key: &str, value: &str) -> usize {
        self.entries
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(k, v)| k.len() + v.len())
            .sum::<usize>()
            + key.len()
            + value.len()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        MemoryStore::new()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        if !self.available {
            return Err(StorageError::Unavailable);
        }
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        if !self.available {
            return Err(StorageError::Unavailable);
        }
        if let Some(limit) = self.quota {
            let needed = self.used_bytes_with(key, value);
            if needed > limit {
                return Err(StorageError::QuotaExceeded { needed, limit });
            }
        }
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
