// Command interpretation for the shopping assistant:
// - Transcript, intent, list item and outcome types
// - Quantity resolution, categorization, item extraction
// - Ordered-rule command parsing
// - Command history, configuration loading and shared error types

// Export types module - Transcripts, intents, list entries, outcomes
pub mod types;
pub use types::*;

// Export errors module - Shared error types
pub mod errors;
pub use errors::*;

// Export config module - Configuration loading
pub mod config;
pub use config::*;

pub mod quantity;

pub mod categorizer;
pub use categorizer::{categorize, CategoryRule, Categorizer, FALLBACK_CATEGORY};

pub mod extractor;
pub use extractor::{ExtractedItem, ItemExtractor};

pub mod parser;
pub use parser::CommandParser;

pub mod history;
pub use history::{CommandHistory, CommandHistoryEntry};
