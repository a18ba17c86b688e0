use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::types::Transcript;

/// Default number of commands kept in memory
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

/// One recognized command
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandHistoryEntry {
    pub command: String,
    pub confidence: f32,
    pub timestamp: DateTime<Utc>,
}

/// Append-only log of recognized commands, keeping only the most recent ones
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandHistory {
    entries: VecDeque<CommandHistoryEntry>,
    limit: usize,
}

impl Default for CommandHistory {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_LIMIT)
    }
}

impl CommandHistory {
    /// A limit of zero is treated as one
    pub fn new(limit: usize) -> Self {
        let limit = limit.max(1);
        Self {
            entries: VecDeque::with_capacity(limit.min(DEFAULT_HISTORY_LIMIT)),
            limit,
        }
    }

    /// Record a transcript, evicting the oldest entry when full
    pub fn record(&mut self, transcript: &Transcript) -> &CommandHistoryEntry {
        if self.entries.len() == self.limit {
            self.entries.pop_front();
        }
        self.entries.push_back(CommandHistoryEntry {
            command: transcript.text.clone(),
            confidence: transcript.confidence,
            timestamp: Utc::now(),
        });
        // just pushed, so never empty
        &self.entries[self.entries.len() - 1]
    }

    /// The last `count` entries, oldest first
    pub fn recent(&self, count: usize) -> Vec<CommandHistoryEntry> {
        let skip = self.entries.len().saturating_sub(count);
        self.entries.iter().skip(skip).cloned().collect()
    }
}
