//! In-memory storage

use rustc_hash::FxHashMap;

use crate::persistence::{CartStorage, StorageError};

/// Storage that lives only as long as the value. Used in tests and headless runs.
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    entries: FxHashMap<String, Vec<u8>>,
}

impl MemoryStorage {
    /// Create empty storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw bytes stored under `key`
    pub fn get(&self, key: &str) -> Option<&[u8]> {
        self.entries.get(key).map(Vec::as_slice)
    }

    /// Number of stored keys
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if nothing is stored
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl CartStorage for MemoryStorage {
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn save(&mut self, key: &str, bytes: &[u8]) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), bytes.to_vec());

        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.entries.remove(key);

        Ok(())
    }
}
