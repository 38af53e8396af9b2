//! Error types for the suggestion subsystem.

use thiserror::Error;

/// Errors that can occur while requesting or reading a suggestion.
#[derive(Debug, Error)]
pub enum AiError {
    /// The model refused or stopped before producing a suggestion.
    #[error("Suggestion blocked: {0}")]
    Blocked(String),

    /// The response envelope did not have the expected shape.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// No JSON object could be recovered from the model text.
    #[error("Response is not valid JSON: {0}")]
    NotJson(String),

    /// The image handed in for analysis is unusable.
    #[error("Invalid image: {0}")]
    InvalidImage(String),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for suggestion operations.
pub type AiResult<T> = std::result::Result<T, AiError>;
