use std::collections::HashMap;

use crate::error::Result;

use super::KeyValueStore;

/// Volatile store backed by a `HashMap`. Used by tests and `--ephemeral` runs.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing entry, e.g. a snapshot captured elsewhere.
    pub fn with_entry(key: &str, value: &str) -> Self {
        let mut storage = Self::new();
        storage.entries.insert(key.to_string(), value.to_string());
        storage
    }
}

impl KeyValueStore for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_then_get() {
        let mut storage = MemoryStorage::new();
        storage.set("projects", "[]").unwrap();
        assert_eq!(storage.get("projects").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn get_missing_returns_none() {
        let storage = MemoryStorage::new();
        assert!(storage.get("projects").unwrap().is_none());
    }

    #[test]
    fn set_replaces_previous_value() {
        let mut storage = MemoryStorage::with_entry("projects", "[1]");
        storage.set("projects", "[2]").unwrap();
        assert_eq!(storage.get("projects").unwrap().as_deref(), Some("[2]"));
    }
}
