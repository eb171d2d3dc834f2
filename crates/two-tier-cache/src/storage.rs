//! Local Storage Helpers
//!
//! In-memory key-value store and a JSON-encoded slot on top of any store.

use std::cell::RefCell;
use std::collections::HashMap;
use std::marker::PhantomData;
use std::rc::Rc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::CacheResult;
use crate::traits::{KeyValueStore, LocalTier};

/// In-memory store. Clones share the same map, so a clone stands in for
/// "the same storage after a reload".
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> CacheResult<()> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) {
        self.entries.borrow_mut().remove(key);
    }
}

/// One JSON-encoded value stored under a fixed key
pub struct JsonSlot<S, T> {
    store: S,
    key: String,
    _value: PhantomData<fn() -> T>,
}

impl<S, T> JsonSlot<S, T> {
    pub fn new(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
            _value: PhantomData,
        }
    }
}

impl<S, T> LocalTier<T> for JsonSlot<S, T>
where
    S: KeyValueStore,
    T: Serialize + DeserializeOwned,
{
    fn load(&self) -> CacheResult<Option<T>> {
        match self.store.get(&self.key) {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    fn store(&self, value: &T) -> CacheResult<()> {
        let raw = serde_json::to_string(value)?;
        self.store.set(&self.key, &raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CacheError;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Counter {
        value: u32,
    }

    #[test]
    fn test_memory_store_clones_share_entries() {
        let store = MemoryStore::new();
        let reloaded = store.clone();
        store.set("k", "v").unwrap();
        assert_eq!(reloaded.get("k").as_deref(), Some("v"));
        reloaded.remove("k");
        assert_eq!(store.get("k"), None);
    }

    #[test]
    fn test_json_slot_missing_key_is_none() {
        let slot: JsonSlot<_, Counter> = JsonSlot::new(MemoryStore::new(), "counter");
        assert_eq!(slot.load().unwrap(), None);
    }

    #[test]
    fn test_json_slot_reads_back_stored_value() {
        let store = MemoryStore::new();
        let slot = JsonSlot::new(store.clone(), "counter");
        slot.store(&Counter { value: 7 }).unwrap();

        assert_eq!(store.get("counter").as_deref(), Some(r#"{"value":7}"#));
        assert_eq!(slot.load().unwrap(), Some(Counter { value: 7 }));
    }

    #[test]
    fn test_json_slot_malformed_entry_is_parse_error() {
        let store = MemoryStore::new();
        store.set("counter", "{not json").unwrap();
        let slot: JsonSlot<_, Counter> = JsonSlot::new(store, "counter");
        assert!(matches!(slot.load(), Err(CacheError::Parse(_))));
    }
}
