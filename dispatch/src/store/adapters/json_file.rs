use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use cartvoice_core::{ItemPatch, ListItem, NewListItem};
use log::{debug, warn};
use tokio::fs;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::store::list_store::{ListStore, StoreError};

/// ListStore backed by a single pretty-printed JSON file.
///
/// Every call reads the whole file and mutating calls write it back, all under
/// one lock. A missing file is an empty list.
#[derive(Debug)]
pub struct JsonFileListStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileListStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    async fn read_items(&self) -> Result<Vec<ListItem>, StoreError> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(StoreError::StorageError(format!(
                    "Failed to read {}: {}",
                    self.path.display(),
                    e
                )))
            }
        };

        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        serde_json::from_str(&content).map_err(|e| {
            warn!("List file {} is not valid JSON: {}", self.path.display(), e);
            StoreError::StorageError(format!("Failed to parse {}: {}", self.path.display(), e))
        })
    }

    async fn write_items(&self, items: &[ListItem]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await.map_err(|e| {
                    StoreError::StorageError(format!("Failed to create store directory: {}", e))
                })?;
            }
        }

        let content = serde_json::to_string_pretty(items)
            .map_err(|e| StoreError::StorageError(format!("Failed to serialize items: {}", e)))?;

        fs::write(&self.path, content).await.map_err(|e| {
            StoreError::StorageError(format!("Failed to write {}: {}", self.path.display(), e))
        })
    }
}

#[async_trait]
impl ListStore for JsonFileListStore {
    async fn add(&self, item: NewListItem) -> Result<ListItem, StoreError> {
        let _guard = self.lock.lock().await;
        let mut items = self.read_items().await?;

        let item = item.into_item(Uuid::new_v4().to_string());
        items.push(item.clone());
        self.write_items(&items).await?;

        debug!("Added item {} ({}) to {}", item.name, item.id, self.path.display());
        Ok(item)
    }

    async fn list(&self) -> Result<Vec<ListItem>, StoreError> {
        let _guard = self.lock.lock().await;
        self.read_items().await
    }

    async fn update(&self, id: &str, patch: ItemPatch) -> Result<bool, StoreError> {
        let _guard = self.lock.lock().await;
        let mut items = self.read_items().await?;

        let Some(item) = items.iter_mut().find(|item| item.id == id) else {
            return Ok(false);
        };
        item.apply(&patch);
        self.write_items(&items).await?;

        debug!("Updated item {}", id);
        Ok(true)
    }

    async fn remove(&self, id: &str) -> Result<bool, StoreError> {
        let _guard = self.lock.lock().await;
        let mut items = self.read_items().await?;

        let before = items.len();
        items.retain(|item| item.id != id);
        if items.len() == before {
            return Ok(false);
        }
        self.write_items(&items).await?;

        debug!("Removed item {}", id);
        Ok(true)
    }

    async fn clear(&self) -> Result<(), StoreError> {
        let _guard = self.lock.lock().await;
        self.write_items(&[]).await
    }
}
