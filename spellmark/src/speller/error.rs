//! Error types for spell-checking resources.

/// Errors that can occur while compiling a morphological dictionary.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum SpellerError {
    /// The affix or word file could not be parsed
    #[error("Failed to parse dictionary: {0}")]
    Parse(String),
}

/// Errors that can occur while loading a supplemental word list.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum WordSetError {
    /// The word list could not be read
    #[error("Failed to read word list")]
    Io(#[from] std::io::Error),

    /// The word list is not valid JSON
    #[error("Failed to parse word list")]
    Json(#[from] serde_json::Error),

    /// The word list is valid JSON but not an object keyed by word
    #[error("Word list must be a JSON object keyed by word")]
    NotAMapping,
}
