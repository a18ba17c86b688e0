use std::error::Error;
use std::fmt::{Debug, Display};
use std::sync::Arc;

use async_trait::async_trait;
use cartvoice_core::{AssistantError, ItemPatch, ListItem, NewListItem};

/// Error type for list store operations
#[derive(Debug)]
pub enum StoreError {
    /// Error occurred during a store operation
    StorageError(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::StorageError(msg) => write!(f, "Storage error: {}", msg),
        }
    }
}

impl Error for StoreError {}

impl From<StoreError> for AssistantError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::StorageError(msg) => AssistantError::StoreFailure(msg),
        }
    }
}

/// Trait defining the interface for shopping list stores
///
/// `update` and `remove` report whether an item with the given id existed.
#[async_trait]
pub trait ListStore: Send + Sync + Debug {
    /// Persist a new item and return it with its assigned id
    async fn add(&self, item: NewListItem) -> Result<ListItem, StoreError>;

    /// All items in insertion order
    async fn list(&self) -> Result<Vec<ListItem>, StoreError>;

    /// Apply a patch to the item with the given id
    async fn update(&self, id: &str, patch: ItemPatch) -> Result<bool, StoreError>;

    /// Delete the item with the given id
    async fn remove(&self, id: &str) -> Result<bool, StoreError>;

    /// Delete every item
    async fn clear(&self) -> Result<(), StoreError>;
}

/// Type alias for Arc-wrapped ListStore trait objects
pub type ListStoreRef = Arc<dyn ListStore>;
