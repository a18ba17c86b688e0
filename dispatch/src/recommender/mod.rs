//! Optional suggestion collaborator for the dispatcher

pub mod rule_based;

use std::fmt::Debug;
use std::sync::Arc;

use async_trait::async_trait;
use cartvoice_core::{AssistantError, ListItem, Suggestion};
use thiserror::Error;

pub use rule_based::RuleBasedRecommender;

#[derive(Error, Debug)]
pub enum RecommenderError {
    #[error("Recommender unavailable: {0}")]
    Unavailable(String),

    #[error("Recommender failed: {0}")]
    Failed(String),
}

impl From<RecommenderError> for AssistantError {
    fn from(err: RecommenderError) -> Self {
        AssistantError::CollaboratorUnavailable(err.to_string())
    }
}

/// Source of item suggestions and search results
#[async_trait]
pub trait Recommender: Send + Sync + Debug {
    /// Candidate items whose names match `query`
    async fn search(&self, query: &str) -> Result<Vec<Suggestion>, RecommenderError>;

    /// Remember an item the user added
    async fn record_history(&self, item: &ListItem) -> Result<(), RecommenderError>;

    /// Items worth adding given what is already on the list
    async fn suggest(&self, _current: &[ListItem]) -> Result<Vec<Suggestion>, RecommenderError> {
        Ok(Vec::new())
    }
}

/// Type alias for Arc-wrapped Recommender trait objects
pub type RecommenderRef = Arc<dyn Recommender>;
