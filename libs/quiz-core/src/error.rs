//! Error types for quiz-core.

use thiserror::Error;

/// Result type alias using EngineError.
pub type Result<T> = std::result::Result<T, EngineError>;

/// Errors that can occur while importing a deck.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("missing question at line {line}")]
    MissingQuestion { line: usize },

    #[error("missing answer at line {line}")]
    MissingAnswer { line: usize },

    #[error("missing group at line {line}")]
    MissingGroup { line: usize },

    #[error("empty {field} in item {position}")]
    EmptyField { field: &'static str, position: usize },

    #[error("invalid {field} in item {position}: expected text")]
    InvalidField { field: &'static str, position: usize },

    #[error("unsupported deck format: {0}")]
    UnsupportedFormat(String),

    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors reported by the sampler, the weight store and sessions.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("deck has no items")]
    EmptyDeck,

    #[error("at least one option must be requested")]
    ZeroOptions,

    #[error("weight vector has {found} entries, deck has {expected} items")]
    WeightLengthMismatch { expected: usize, found: usize },

    #[error("index {index} out of range for {len} items")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("group '{group}' has {available} items, {requested} options requested")]
    InsufficientGroup {
        group: String,
        available: usize,
        requested: usize,
    },

    #[error("corrupt weight state for {key}: {reason}")]
    CorruptState { key: String, reason: String },

    #[error("invalid user id: {0:?}")]
    InvalidUserId(String),

    #[error("no quiz is waiting for an answer")]
    NoPendingQuiz,

    #[error("position {position} out of range for {len} options")]
    InvalidPosition { position: usize, len: usize },

    #[error("invalid weights: {0}")]
    InvalidWeights(String),

    #[error("deck import failed: {0}")]
    Parse(#[from] ParseError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
