use std::collections::HashMap;

use crate::error::Result;

/// Key-value string storage.
///
/// Backends store raw strings; JSON encoding is the poll store's concern, not
/// the backend's. Values are read whole and written whole.
pub trait Storage {
    /// Read a value by key. Returns `None` if the key is absent.
    fn load(&self, key: &str) -> Result<Option<String>>;

    /// Write a value under key, replacing any previous value.
    fn save(&mut self, key: &str, value: &str) -> Result<()>;

    /// Remove a key. Removing an absent key is a no-op.
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// In-memory backend for tests.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    values: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn load(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn save(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.values.remove(key);
        Ok(())
    }
}
