use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use cartvoice_core::{ItemPatch, ListItem, NewListItem};
use log::debug;
use uuid::Uuid;

use crate::store::list_store::{ListStore, StoreError};

/// In-memory implementation of ListStore
#[derive(Debug, Default)]
pub struct InMemoryListStore {
    /// Thread-safe storage of items, in insertion order
    items: Arc<RwLock<Vec<ListItem>>>,
}

impl InMemoryListStore {
    /// Create a new, empty InMemoryListStore
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ListStore for InMemoryListStore {
    async fn add(&self, item: NewListItem) -> Result<ListItem, StoreError> {
        let item = item.into_item(Uuid::new_v4().to_string());

        let mut items = self.items.write().map_err(|e| {
            StoreError::StorageError(format!("Failed to acquire write lock: {}", e))
        })?;

        items.push(item.clone());
        debug!("Added item {} ({})", item.name, item.id);

        Ok(item)
    }

    async fn list(&self) -> Result<Vec<ListItem>, StoreError> {
        let items = self.items.read().map_err(|e| {
            StoreError::StorageError(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(items.clone())
    }

    async fn update(&self, id: &str, patch: ItemPatch) -> Result<bool, StoreError> {
        let mut items = self.items.write().map_err(|e| {
            StoreError::StorageError(format!("Failed to acquire write lock: {}", e))
        })?;

        match items.iter_mut().find(|item| item.id == id) {
            Some(item) => {
                item.apply(&patch);
                debug!("Updated item {}", id);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn remove(&self, id: &str) -> Result<bool, StoreError> {
        let mut items = self.items.write().map_err(|e| {
            StoreError::StorageError(format!("Failed to acquire write lock: {}", e))
        })?;

        let before = items.len();
        items.retain(|item| item.id != id);
        let removed = items.len() != before;
        if removed {
            debug!("Removed item {}", id);
        }

        Ok(removed)
    }

    async fn clear(&self) -> Result<(), StoreError> {
        let mut items = self.items.write().map_err(|e| {
            StoreError::StorageError(format!("Failed to acquire write lock: {}", e))
        })?;

        debug!("Cleared {} items", items.len());
        items.clear();
        Ok(())
    }
}
