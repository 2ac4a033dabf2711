use std::collections::BTreeMap;

use crate::store::{ItemStore, StoreError};
use crate::types::{Item, ItemId};

/// In-memory store keyed by item id.
///
/// Can be switched offline to exercise the error paths of callers.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    items: BTreeMap<ItemId, Item>,
    offline: bool,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-filled with `items`. Later duplicates of an id win.
    #[must_use]
    pub fn with_items(items: impl IntoIterator<Item = Item>) -> Self {
        Self {
            items: items.into_iter().map(|item| (item.id, item)).collect(),
            offline: false,
        }
    }

    /// Make every subsequent operation fail with `Unavailable`.
    pub const fn set_offline(&mut self, offline: bool) {
        self.offline = offline;
    }

    #[must_use]
    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.items.get(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn ensure_online(&self) -> Result<(), StoreError> {
        if self.offline {
            return Err(StoreError::Unavailable("memory store is offline".to_string()));
        }
        Ok(())
    }
}

impl ItemStore for MemoryStore {
    fn load_all(&self) -> Result<Vec<Item>, StoreError> {
        self.ensure_online()?;
        Ok(self.items.values().cloned().collect())
    }

    fn upsert(&mut self, item: &Item) -> Result<(), StoreError> {
        self.ensure_online()?;
        self.items.insert(item.id, item.clone());
        Ok(())
    }

    fn delete(&mut self, id: ItemId) -> Result<(), StoreError> {
        self.ensure_online()?;
        self.items.remove(&id);
        Ok(())
    }
}
