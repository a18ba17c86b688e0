use std::collections::BTreeMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use cartvoice_core::{
    ActionKind, AssistantError, AssistantResult, Intent, ItemPatch, ListItem, NewListItem,
    Outcome, Suggestion, DEFAULT_STORE_TIMEOUT_MS,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use crate::recommender::{RecommenderError, RecommenderRef};
use crate::store::{ListStoreRef, StoreError};

/// Counts over the current list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListStatistics {
    pub total_items: usize,
    pub completed_items: usize,
    pub pending_items: usize,
    /// Number of distinct categories on the list
    pub categories: usize,
    pub items_by_category: BTreeMap<String, usize>,
    /// Rounded percentage, 0 for an empty list
    pub completion_rate: u32,
}

impl ListStatistics {
    pub fn from_items(items: &[ListItem]) -> Self {
        let completed_items = items.iter().filter(|item| item.completed).count();
        let mut items_by_category = BTreeMap::new();
        for item in items {
            *items_by_category.entry(item.category.clone()).or_insert(0) += 1;
        }
        let completion_rate = if items.is_empty() {
            0
        } else {
            ((completed_items as f64 / items.len() as f64) * 100.0).round() as u32
        };

        Self {
            total_items: items.len(),
            completed_items,
            pending_items: items.len() - completed_items,
            categories: items_by_category.len(),
            items_by_category,
            completion_rate,
        }
    }
}

/// Snapshot written by `export_json`
#[derive(Debug, Serialize)]
struct ListExport<'a> {
    items: &'a [ListItem],
    /// Category label to item names
    categories: BTreeMap<&'a str, Vec<&'a str>>,
    exported_at: DateTime<Utc>,
    total_items: usize,
    completed_items: usize,
}

/// Executes intents against the list store, keeping a cached copy of the list.
///
/// The cache lock is held for the whole of each store operation, so commands
/// run one at a time. Recommender calls never run under the lock, and both
/// collaborators are bounded by the same timeout.
#[derive(Debug)]
pub struct CommandDispatcher {
    store: ListStoreRef,
    recommender: Option<RecommenderRef>,
    items: Mutex<Vec<ListItem>>,
    timeout: Duration,
}

impl CommandDispatcher {
    pub fn new(store: ListStoreRef, recommender: Option<RecommenderRef>) -> Self {
        Self {
            store,
            recommender,
            items: Mutex::new(Vec::new()),
            timeout: Duration::from_millis(DEFAULT_STORE_TIMEOUT_MS),
        }
    }

    /// Bound every store and recommender call by `timeout`
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    async fn store_call<T, F>(&self, operation: &str, call: F) -> AssistantResult<T>
    where
        F: Future<Output = Result<T, StoreError>>,
    {
        match tokio::time::timeout(self.timeout, call).await {
            Ok(result) => result.map_err(AssistantError::from),
            Err(_) => Err(AssistantError::StoreFailure(format!(
                "{} timed out after {}ms",
                operation,
                self.timeout.as_millis()
            ))),
        }
    }

    /// Drop a cached item the store no longer knows about
    fn forget_stale(items: &mut Vec<ListItem>, id: &str) {
        warn!(id = id, "Cached item is missing from the store, dropping it");
        items.retain(|item| item.id != id);
    }

    /// Replace the cached list with the store's contents.
    ///
    /// On failure the cache is left empty.
    pub async fn load(&self) -> AssistantResult<usize> {
        let mut items = self.items.lock().await;
        match self.store_call("list", self.store.list()).await {
            Ok(loaded) => {
                *items = loaded;
                info!(count = items.len(), "Loaded shopping list");
                Ok(items.len())
            }
            Err(e) => {
                items.clear();
                error!(error = %e, "Failed to load shopping list");
                Err(e)
            }
        }
    }

    /// Copy of the cached list
    pub async fn items(&self) -> Vec<ListItem> {
        self.items.lock().await.clone()
    }

    /// Run one intent. Never fails; problems are reported in the outcome.
    pub async fn execute(&self, intent: Intent) -> Outcome {
        debug!(action = %intent.action(), subject = intent.subject(), "Executing intent");
        match intent {
            Intent::Add {
                name,
                quantity,
                category,
            } => self.add(name, quantity, category).await,
            Intent::Remove { name } => self.remove(&name).await,
            Intent::Search { query } => self.search(&query).await,
        }
    }

    async fn add(&self, name: String, quantity: u32, category: String) -> Outcome {
        let mut items = self.items.lock().await;

        if let Some(index) = items.iter().position(|item| item.has_name(&name)) {
            let id = items[index].id.clone();
            let new_quantity = items[index].quantity.saturating_add(quantity.max(1));
            let patch = ItemPatch::quantity(new_quantity);

            return match self.store_call("update", self.store.update(&id, patch.clone())).await {
                Ok(true) => {
                    items[index].apply(&patch);
                    self.record_history(&items[index]);
                    Outcome::success(
                        ActionKind::Add,
                        format!("Updated {} quantity to {}", name, new_quantity),
                    )
                }
                Ok(false) => {
                    Self::forget_stale(&mut items, &id);
                    Outcome::failure(
                        ActionKind::Add,
                        format!("Failed to add {}: item no longer exists", name),
                    )
                }
                Err(e) => {
                    error!(error = %e, item = %name, "Failed to update item quantity");
                    Outcome::failure(ActionKind::Add, format!("Failed to add {}: {}", name, e))
                }
            };
        }

        let new_item = NewListItem::new(name.clone(), quantity, category);
        match self.store_call("add", self.store.add(new_item)).await {
            Ok(added) => {
                info!(item = %added.name, quantity = added.quantity, "Item added");
                let message = if added.quantity > 1 {
                    format!("Added {} {} to your list", added.quantity, added.name)
                } else {
                    format!("Added {} to your list", added.name)
                };
                self.record_history(&added);
                items.push(added);
                Outcome::success(ActionKind::Add, message)
            }
            Err(e) => {
                error!(error = %e, item = %name, "Failed to add item");
                Outcome::failure(ActionKind::Add, format!("Failed to add {}: {}", name, e))
            }
        }
    }

    async fn remove(&self, name: &str) -> Outcome {
        let mut items = self.items.lock().await;

        let Some(target) = items.iter().find(|item| item.name_contains(name)).cloned() else {
            return Outcome::failure(
                ActionKind::Remove,
                AssistantError::NotFound(name.to_string()).to_string(),
            );
        };

        match self.store_call("remove", self.store.remove(&target.id)).await {
            Ok(false) => {
                Self::forget_stale(&mut items, &target.id);
                Outcome::failure(
                    ActionKind::Remove,
                    format!("Failed to remove {}: item no longer exists", target.name),
                )
            }
            Ok(true) => {
                items.retain(|item| item.id != target.id);
                info!(item = %target.name, "Item removed");
                Outcome::success(
                    ActionKind::Remove,
                    format!("Removed {} from your list", target.name),
                )
            }
            Err(e) => {
                error!(error = %e, item = %name, "Failed to remove item");
                Outcome::failure(
                    ActionKind::Remove,
                    format!("Failed to remove {}: {}", name, e),
                )
            }
        }
    }

    async fn search(&self, query: &str) -> Outcome {
        if let Some(recommender) = &self.recommender {
            match recommender_call(self.timeout, "search", recommender.search(query)).await {
                Ok(suggestions) if !suggestions.is_empty() => {
                    let results = suggestions
                        .iter()
                        .map(|s| format!("{} ({})", s.name, s.category))
                        .collect();
                    return Outcome::success(
                        ActionKind::Search,
                        format!("Found {} suggestions for \"{}\"", suggestions.len(), query),
                    )
                    .with_results(results);
                }
                Ok(_) => debug!(query = query, "Recommender had no matches, searching the list"),
                Err(e) => {
                    warn!(error = %e, "Recommender search failed, continuing with local search")
                }
            }
        }

        let items = self.items.lock().await;
        let matches: Vec<String> = items
            .iter()
            .filter(|item| item.name_contains(query))
            .map(|item| format!("{} x{} ({})", item.name, item.quantity, item.category))
            .collect();

        if matches.is_empty() {
            Outcome::failure(
                ActionKind::Search,
                format!("No items found matching \"{}\"", query),
            )
        } else {
            Outcome::success(
                ActionKind::Search,
                format!("Found {} matching items in your list", matches.len()),
            )
            .with_results(matches)
        }
    }

    /// Hand an item to the recommender without waiting for it
    fn record_history(&self, item: &ListItem) {
        let Some(recommender) = &self.recommender else {
            return;
        };
        let recommender = Arc::clone(recommender);
        let item = item.clone();
        let timeout = self.timeout;
        tokio::spawn(async move {
            let call = recommender.record_history(&item);
            if let Err(e) = recommender_call(timeout, "record_history", call).await {
                warn!(error = %e, item = %item.name, "Failed to record item history");
            }
        });
    }

    /// Flip the completed flag. `Ok(false)` when no item has that id.
    pub async fn toggle_completed(&self, id: &str) -> AssistantResult<bool> {
        let mut items = self.items.lock().await;
        let Some(index) = items.iter().position(|item| item.id == id) else {
            return Ok(false);
        };

        let patch = ItemPatch::completed(!items[index].completed);
        let updated = self.store_call("update", self.store.update(id, patch.clone())).await?;
        if updated {
            items[index].apply(&patch);
        } else {
            Self::forget_stale(&mut items, id);
        }
        Ok(updated)
    }

    /// Set an item's quantity; zero or less removes the item.
    pub async fn set_quantity(&self, id: &str, quantity: i64) -> AssistantResult<bool> {
        let mut items = self.items.lock().await;
        let Some(index) = items.iter().position(|item| item.id == id) else {
            return Ok(false);
        };

        if quantity <= 0 {
            let removed = self.store_call("remove", self.store.remove(id)).await?;
            items.remove(index);
            debug!(id = id, "Removed item after quantity dropped to zero");
            return Ok(removed);
        }

        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        let patch = ItemPatch::quantity(quantity);
        let updated = self.store_call("update", self.store.update(id, patch.clone())).await?;
        if updated {
            items[index].apply(&patch);
        } else {
            Self::forget_stale(&mut items, id);
        }
        Ok(updated)
    }

    /// Delete every item from the store and the cache
    pub async fn clear(&self) -> AssistantResult<()> {
        let mut items = self.items.lock().await;
        self.store_call("clear", self.store.clear()).await?;
        info!(count = items.len(), "Shopping list cleared");
        items.clear();
        Ok(())
    }

    pub async fn statistics(&self) -> ListStatistics {
        ListStatistics::from_items(&self.items.lock().await)
    }

    /// Pretty-printed JSON snapshot of the list, grouped by category
    pub async fn export_json(&self) -> AssistantResult<String> {
        let items = self.items.lock().await;
        let mut categories: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
        for item in items.iter() {
            categories
                .entry(item.category.as_str())
                .or_default()
                .push(item.name.as_str());
        }

        let export = ListExport {
            items: items.as_slice(),
            categories,
            exported_at: Utc::now(),
            total_items: items.len(),
            completed_items: items.iter().filter(|item| item.completed).count(),
        };
        Ok(serde_json::to_string_pretty(&export)?)
    }

    /// Recommendations for the current list; empty without a recommender
    pub async fn suggestions(&self) -> Vec<Suggestion> {
        let Some(recommender) = &self.recommender else {
            return Vec::new();
        };
        let current = self.items().await;
        match recommender_call(self.timeout, "suggest", recommender.suggest(&current)).await {
            Ok(suggestions) => suggestions,
            Err(e) => {
                warn!(error = %e, "Failed to build suggestions, continuing without them");
                Vec::new()
            }
        }
    }
}

/// Run a recommender call under `timeout`
async fn recommender_call<T, F>(timeout: Duration, operation: &str, call: F) -> AssistantResult<T>
where
    F: Future<Output = Result<T, RecommenderError>>,
{
    match tokio::time::timeout(timeout, call).await {
        Ok(result) => result.map_err(AssistantError::from),
        Err(_) => Err(AssistantError::CollaboratorUnavailable(format!(
            "recommender {} timed out after {}ms",
            operation,
            timeout.as_millis()
        ))),
    }
}
