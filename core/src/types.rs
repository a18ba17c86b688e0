use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Text produced by one recognition event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transcript {
    pub text: String,
    /// Recognizer confidence in 0..=1. Kept as metadata only.
    pub confidence: f32,
}

impl Transcript {
    pub fn new(text: impl Into<String>, confidence: f32) -> Self {
        Self {
            text: text.into(),
            confidence: confidence.clamp(0.0, 1.0),
        }
    }

    /// Typed input has no recognizer behind it, so it is fully confident.
    pub fn typed(text: impl Into<String>) -> Self {
        Self::new(text, 1.0)
    }
}

/// Failure signals a transcript source may emit instead of text.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecognitionError {
    #[error("no speech detected")]
    NoSpeech,
    #[error("microphone permission denied")]
    PermissionDenied,
    #[error("audio capture failed: {0}")]
    CaptureFailed(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("{0}")]
    Other(String),
}

/// What a transcript source hands over per recognition event.
#[derive(Debug, Clone, PartialEq)]
pub enum TranscriptEvent {
    Recognized(Transcript),
    Failed(RecognitionError),
}

/// The three actions a command can resolve to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Add,
    Remove,
    Search,
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionKind::Add => write!(f, "add"),
            ActionKind::Remove => write!(f, "remove"),
            ActionKind::Search => write!(f, "search"),
        }
    }
}

/// Structured form of a shopping command.
///
/// Names keep the casing the user gave them; all comparisons against the
/// list are case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Intent {
    Add {
        name: String,
        quantity: u32,
        category: String,
    },
    Remove {
        name: String,
    },
    Search {
        query: String,
    },
}

impl Intent {
    pub fn action(&self) -> ActionKind {
        match self {
            Intent::Add { .. } => ActionKind::Add,
            Intent::Remove { .. } => ActionKind::Remove,
            Intent::Search { .. } => ActionKind::Search,
        }
    }

    /// The item name or search query the intent is about
    pub fn subject(&self) -> &str {
        match self {
            Intent::Add { name, .. } | Intent::Remove { name } => name,
            Intent::Search { query } => query,
        }
    }
}

/// An entry as held by a list store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListItem {
    pub id: String,
    pub name: String,
    pub quantity: u32,
    pub category: String,
    pub completed: bool,
    #[serde(default = "default_priority")]
    pub priority: u8,
    pub added_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl ListItem {
    /// Case-insensitive exact name comparison
    pub fn has_name(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase()
    }

    /// Case-insensitive substring comparison
    pub fn name_contains(&self, fragment: &str) -> bool {
        self.name.to_lowercase().contains(&fragment.to_lowercase())
    }

    /// Apply a patch in place, stamping `updated_at`
    pub fn apply(&mut self, patch: &ItemPatch) {
        if let Some(quantity) = patch.quantity {
            self.quantity = quantity;
        }
        if let Some(completed) = patch.completed {
            self.completed = completed;
        }
        self.updated_at = Some(Utc::now());
    }
}

fn default_priority() -> u8 {
    3
}

/// An entry before the store has assigned it an id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewListItem {
    pub name: String,
    pub quantity: u32,
    pub category: String,
    pub completed: bool,
    pub priority: u8,
}

impl NewListItem {
    pub fn new(name: impl Into<String>, quantity: u32, category: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            quantity: quantity.max(1),
            category: category.into(),
            completed: false,
            priority: default_priority(),
        }
    }

    /// Materialize into a stored entry with the given id
    pub fn into_item(self, id: String) -> ListItem {
        ListItem {
            id,
            name: self.name,
            quantity: self.quantity,
            category: self.category,
            completed: self.completed,
            priority: self.priority,
            added_at: Utc::now(),
            updated_at: None,
        }
    }
}

/// Partial update for a stored entry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

impl ItemPatch {
    pub fn quantity(quantity: u32) -> Self {
        Self {
            quantity: Some(quantity),
            ..Default::default()
        }
    }

    pub fn completed(completed: bool) -> Self {
        Self {
            completed: Some(completed),
            ..Default::default()
        }
    }
}

/// Result of handling one command, ready to show to the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outcome {
    /// `None` when the input was not understood at all
    pub action: Option<ActionKind>,
    pub success: bool,
    pub message: String,
    /// Extra display lines, e.g. search matches
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub results: Vec<String>,
}

impl Outcome {
    pub fn success(action: ActionKind, message: impl Into<String>) -> Self {
        Self {
            action: Some(action),
            success: true,
            message: message.into(),
            results: Vec::new(),
        }
    }

    pub fn failure(action: ActionKind, message: impl Into<String>) -> Self {
        Self {
            action: Some(action),
            success: false,
            message: message.into(),
            results: Vec::new(),
        }
    }

    /// Outcome for input no rule could interpret
    pub fn not_understood(text: &str) -> Self {
        Self {
            action: None,
            success: false,
            message: format!("Sorry, I didn't understand \"{}\"", text.trim()),
            results: Vec::new(),
        }
    }

    /// Outcome for a recognition event that produced no usable text
    pub fn unrecognized() -> Self {
        Self {
            action: None,
            success: false,
            message: "Sorry, I couldn't understand that. Please try again.".to_string(),
            results: Vec::new(),
        }
    }

    pub fn with_results(mut self, results: Vec<String>) -> Self {
        self.results = results;
        self
    }
}

/// Where a suggestion came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionKind {
    Complementary,
    Seasonal,
    Frequent,
    Essential,
    Catalog,
}

/// A candidate item offered by a recommender
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub name: String,
    pub reason: String,
    pub kind: SuggestionKind,
    pub priority: u8,
    pub category: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transcript_confidence_is_clamped() {
        assert_eq!(Transcript::new("milk", 1.7).confidence, 1.0);
        assert_eq!(Transcript::new("milk", -0.2).confidence, 0.0);
        assert_eq!(Transcript::typed("milk").confidence, 1.0);
    }

    #[test]
    fn test_intent_action_and_subject() {
        let add = Intent::Add {
            name: "Milk".to_string(),
            quantity: 2,
            category: "Dairy".to_string(),
        };
        assert_eq!(add.action(), ActionKind::Add);
        assert_eq!(add.subject(), "Milk");

        let search = Intent::Search {
            query: "rice".to_string(),
        };
        assert_eq!(search.action(), ActionKind::Search);
        assert_eq!(search.subject(), "rice");
    }

    #[test]
    fn test_intent_serializes_with_action_tag() {
        let intent = Intent::Remove {
            name: "bread".to_string(),
        };
        let json = serde_json::to_value(&intent).unwrap();
        assert_eq!(json["action"], "remove");
        assert_eq!(json["name"], "bread");
    }

    #[test]
    fn test_list_item_name_matching() {
        let item = NewListItem::new("Whole Milk", 1, "Dairy").into_item("1".to_string());
        assert!(item.has_name("whole milk"));
        assert!(!item.has_name("milk"));
        assert!(item.name_contains("MILK"));
        assert!(!item.name_contains("bread"));
    }

    #[test]
    fn test_new_item_quantity_is_at_least_one() {
        let item = NewListItem::new("eggs", 0, "Dairy");
        assert_eq!(item.quantity, 1);
        assert!(!item.completed);
        assert_eq!(item.priority, 3);
    }

    #[test]
    fn test_apply_patch() {
        let mut item = NewListItem::new("eggs", 1, "Dairy").into_item("1".to_string());
        assert!(item.updated_at.is_none());

        item.apply(&ItemPatch::quantity(4));
        assert_eq!(item.quantity, 4);
        assert!(!item.completed);
        assert!(item.updated_at.is_some());

        item.apply(&ItemPatch::completed(true));
        assert_eq!(item.quantity, 4);
        assert!(item.completed);
    }

    #[test]
    fn test_outcome_constructors() {
        let outcome = Outcome::not_understood("  asdf ");
        assert_eq!(outcome.action, None);
        assert!(!outcome.success);
        assert_eq!(outcome.message, "Sorry, I didn't understand \"asdf\"");

        let outcome = Outcome::success(ActionKind::Search, "Found 1")
            .with_results(vec!["milk".to_string()]);
        assert!(outcome.success);
        assert_eq!(outcome.results, vec!["milk".to_string()]);
    }
}
