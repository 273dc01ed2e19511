//! In-memory `KvStore` backend.

use super::{KvStore, StoreResult};
use std::cell::RefCell;
use std::collections::BTreeMap;

/// Volatile key-value store; contents live as long as the value.
#[derive(Debug, Default)]
pub struct MemoryKvStore {
    entries: RefCell<BTreeMap<String, String>>,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of every stored blob keyed by name.
    pub fn raw_entries(&self) -> BTreeMap<String, String> {
        self.entries.borrow().clone()
    }
}

impl KvStore for MemoryKvStore {
    fn get_raw(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set_raw(&self, key: &str, value: &str) -> StoreResult<()> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
