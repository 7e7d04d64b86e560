//! Error types for quizzer-core

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for the quiz pipeline
#[derive(Error, Debug)]
pub enum Error {
    /// A source document or persisted file does not exist.
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The model reply does not follow the requested layout.
    #[error("malformed model response: {0}")]
    MalformedResponse(String),

    /// The chat or embedding call itself failed.
    #[error("gateway failure: {0}")]
    Gateway(#[from] quizzer_models::Error),

    /// A question record violates its invariants.
    #[error("invalid question: {0}")]
    InvalidQuestion(String),

    /// The reading assistant was asked an empty question.
    #[error("Please enter a question.")]
    EmptyQuestion,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Errors raised by the quiz session state machine
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("Invalid state: expected {expected}, got {actual}")]
    InvalidState { expected: String, actual: String },

    /// An answer was submitted with no option selected.
    #[error("Please select an answer.")]
    NoAnswerSelected,

    /// The selected option is outside 1..=4.
    #[error("Invalid choice {0}: pick an option between 1 and 4")]
    InvalidChoice(usize),

    /// A follow-up round was requested with no questions in it.
    #[error("Follow-up round has no questions")]
    EmptyRound,
}
