use thiserror::Error;

/// Shopping assistant errors
#[derive(Error, Debug)]
pub enum AssistantError {
    /// No rule matched the transcript. Expected, not exceptional.
    #[error("Didn't understand: \"{0}\"")]
    ParseFailure(String),

    /// A rule matched but left nothing to use as an item name.
    #[error("No item name found in \"{0}\"")]
    ExtractionFailure(String),

    #[error("Item \"{0}\" not found in your list")]
    NotFound(String),

    #[error("Store Error: {0}")]
    StoreFailure(String),

    #[error("Collaborator Unavailable: {0}")]
    CollaboratorUnavailable(String),

    #[error("Configuration Error: {0}")]
    ConfigError(String),

    #[error(transparent)]
    PatternError(#[from] regex::Error),

    #[error(transparent)]
    SerdeError(#[from] serde_json::Error),
}

impl AssistantError {
    /// Whether the error means the input was understood poorly rather than
    /// that something downstream failed.
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            AssistantError::ParseFailure(_) | AssistantError::ExtractionFailure(_)
        )
    }
}

/// Result type for assistant operations
pub type AssistantResult<T> = Result<T, AssistantError>;
