//! Shopping list persistence
//!
//! Defines the `ListStore` trait the dispatcher talks to, plus an in-memory
//! adapter and a JSON file adapter.

pub mod adapters;
pub mod list_store;

pub use adapters::{InMemoryListStore, JsonFileListStore};
pub use list_store::{ListStore, ListStoreRef, StoreError};
