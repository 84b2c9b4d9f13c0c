use crate::DeckError;
use parking_lot::RwLock;
use std::collections::HashMap;

/// Volatile store; contents last as long as the value.
#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
    writes: RwLock<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of successful `set` calls so far.
    pub fn write_count(&self) -> usize {
        *self.writes.read()
    }
}

impl crate::store::KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, DeckError> {
        Ok(self.entries.read().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), DeckError> {
        self.entries
            .write()
            .insert(key.to_string(), value.to_string());
        *self.writes.write() += 1;
        Ok(())
    }
}
