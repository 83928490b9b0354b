//! Error types for Cosmo Assist.

/// Top-level error type for the engine.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Transcript error: {0}")]
    Transcript(#[from] TranscriptError),
}

/// Transcript invariant violations.
///
/// The conversation controller is the sole writer and always appends with a
/// fresh UUID and the current time, so these indicate a programming error,
/// not a user-facing condition.
#[derive(Debug, thiserror::Error)]
pub enum TranscriptError {
    #[error("Duplicate message id: {id}")]
    DuplicateId { id: String },

    #[error("Message {id} timestamp precedes the previous entry")]
    TimestampRegression { id: String },
}

/// Result type alias for the engine.
pub type Result<T> = std::result::Result<T, Error>;
