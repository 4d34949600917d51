//! Error types for engine infrastructure operations

use thiserror::Error;

/// Errors raised by the engine's infrastructure collaborators
///
/// Business-rule failures are a separate taxonomy
/// ([`crate::aggregate::CommandError`]); everything here means the command
/// was not applied for reasons unrelated to its validity. There is no
/// automatic retry; a blind retry after a lost acknowledgment can
/// double-append unless the caller deduplicates.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Event log append or read failure
    #[error("Event store error: {0}")]
    EventStore(String),

    /// Projection store save or load failure
    #[error("Projection store error: {0}")]
    ProjectionStore(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Deserialization error
    #[error("Deserialization error: {0}")]
    Deserialization(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Generic infrastructure error
    #[error("Engine error: {0}")]
    Generic(String),
}

/// Result type for engine infrastructure operations
pub type EngineResult<T> = Result<T, EngineError>;

impl From<serde_json::Error> for EngineError {
    fn from(err: serde_json::Error) -> Self {
        EngineError::Serialization(err.to_string())
    }
}
