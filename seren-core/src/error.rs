//! Error types for seren-core

use thiserror::Error;

/// Main error type for the seren-core library
#[derive(Error, Debug)]
pub enum Error {
    /// Storage error
    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding/decoding error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Input rejected before any state was mutated
    #[error("validation error: {0}")]
    Validation(String),

    /// Hosted AI capability error (network, non-2xx, malformed payload)
    #[error("AI error: {0}")]
    Ai(String),

    /// Mood entry not found
    #[error("entry not found: {0}")]
    EntryNotFound(String),
}

/// Result type alias for seren-core
pub type Result<T> = std::result::Result<T, Error>;
