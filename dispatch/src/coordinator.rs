use std::sync::Arc;

use cartvoice_core::{
    AssistantConfig, AssistantResult, CommandHistory, CommandHistoryEntry, CommandParser, Outcome,
    Transcript, TranscriptEvent,
};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::dispatcher::CommandDispatcher;
use crate::recommender::{RecommenderRef, RuleBasedRecommender};
use crate::store::ListStoreRef;

/// Turns transcripts into list changes: records, parses, dispatches.
#[derive(Debug)]
pub struct ShoppingAssistant {
    parser: CommandParser,
    dispatcher: CommandDispatcher,
    history: Mutex<CommandHistory>,
}

impl ShoppingAssistant {
    pub fn new(parser: CommandParser, dispatcher: CommandDispatcher, history_limit: usize) -> Self {
        Self {
            parser,
            dispatcher,
            history: Mutex::new(CommandHistory::new(history_limit)),
        }
    }

    /// Wire up parser, recommender and dispatcher from configuration
    pub fn from_config(config: &AssistantConfig, store: ListStoreRef) -> AssistantResult<Self> {
        let parser = CommandParser::with_categorizer(config.categorizer())?;

        let recommender: Option<RecommenderRef> = if config.suggestions_enabled() {
            Some(Arc::new(RuleBasedRecommender::new()))
        } else {
            None
        };
        let dispatcher =
            CommandDispatcher::new(store, recommender).with_timeout(config.store_timeout());

        Ok(Self::new(parser, dispatcher, config.history_limit()))
    }

    pub fn dispatcher(&self) -> &CommandDispatcher {
        &self.dispatcher
    }

    /// Handle one recognized transcript end to end
    pub async fn handle_transcript(&self, transcript: Transcript) -> Outcome {
        if transcript.text.trim().is_empty() {
            return Outcome::unrecognized();
        }

        self.history.lock().await.record(&transcript);
        debug!(
            command = %transcript.text,
            confidence = transcript.confidence,
            "Recorded command"
        );

        match self.parser.try_parse(&transcript.text) {
            Ok(intent) => {
                info!(action = %intent.action(), subject = intent.subject(), "Parsed command");
                self.dispatcher.execute(intent).await
            }
            Err(e) if e.is_parse_error() => {
                debug!(error = %e, "Command not understood");
                Outcome::not_understood(&transcript.text)
            }
            Err(e) => {
                warn!(error = %e, "Parser failed, treating command as not understood");
                Outcome::not_understood(&transcript.text)
            }
        }
    }

    /// Handle whatever a transcript source produced
    pub async fn handle_event(&self, event: TranscriptEvent) -> Outcome {
        match event {
            TranscriptEvent::Recognized(transcript) => self.handle_transcript(transcript).await,
            TranscriptEvent::Failed(e) => {
                warn!(error = %e, "Speech recognition failed");
                Outcome::unrecognized()
            }
        }
    }

    /// The last `count` recorded commands, oldest first
    pub async fn history(&self, count: usize) -> Vec<CommandHistoryEntry> {
        self.history.lock().await.recent(count)
    }
}
