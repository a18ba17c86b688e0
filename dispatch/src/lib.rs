// Executes parsed shopping commands:
// - List store contract with in-memory and JSON file adapters
// - Optional recommender for search and suggestions
// - Dispatcher owning the cached list
// - Assistant tying transcripts, parser and dispatcher together

pub mod store;
pub use store::{InMemoryListStore, JsonFileListStore, ListStore, ListStoreRef, StoreError};

pub mod recommender;
pub use recommender::{Recommender, RecommenderError, RecommenderRef, RuleBasedRecommender};

pub mod dispatcher;
pub use dispatcher::{CommandDispatcher, ListStatistics};

pub mod coordinator;
pub use coordinator::ShoppingAssistant;
