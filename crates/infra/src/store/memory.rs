use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;

use stockroom_core::Entity;
use stockroom_inventory::{InventoryRecord, RecordKey};

use super::{InventoryStore, RecordFilter, StoreError};

/// In-memory store for tests/dev. Rows are kept sorted by key.
#[derive(Debug, Default)]
pub struct InMemoryInventoryStore {
    inner: RwLock<BTreeMap<RecordKey, InventoryRecord>>,
}

impl InMemoryInventoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<T>(_: PoisonError<T>) -> StoreError {
    StoreError::Backend("inventory lock poisoned".to_string())
}

#[async_trait]
impl InventoryStore for InMemoryInventoryStore {
    async fn get(&self, key: &RecordKey) -> Result<Option<InventoryRecord>, StoreError> {
        let map = self.inner.read().map_err(poisoned)?;
        Ok(map.get(key).cloned())
    }

    async fn list(&self, filter: &RecordFilter) -> Result<Vec<InventoryRecord>, StoreError> {
        let map = self.inner.read().map_err(poisoned)?;
        Ok(map.values().filter(|r| filter.matches(r)).cloned().collect())
    }

    async fn insert(&self, record: InventoryRecord) -> Result<(), StoreError> {
        let mut map = self.inner.write().map_err(poisoned)?;
        match map.entry(record.key()) {
            Entry::Occupied(e) => Err(StoreError::Conflict(*e.key())),
            Entry::Vacant(e) => {
                e.insert(record);
                Ok(())
            }
        }
    }

    async fn save(&self, key: &RecordKey, record: InventoryRecord) -> Result<(), StoreError> {
        let mut map = self.inner.write().map_err(poisoned)?;
        if !map.contains_key(key) {
            return Err(StoreError::NotFound(*key));
        }
        let new_key = record.key();
        if new_key != *key {
            if map.contains_key(&new_key) {
                return Err(StoreError::Conflict(new_key));
            }
            map.remove(key);
        }
        map.insert(new_key, record);
        Ok(())
    }

    async fn delete(&self, key: &RecordKey) -> Result<bool, StoreError> {
        let mut map = self.inner.write().map_err(poisoned)?;
        Ok(map.remove(key).is_some())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        self.inner.write().map_err(poisoned)?.clear();
        Ok(())
    }
}
