//! Error types for schedule rendering

use thiserror::Error;

/// Result type alias for rendering operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or rendering a schedule
#[derive(Error, Debug)]
pub enum Error {
    /// Computed geometry is unusable (e.g. a zero-width column)
    #[error("Rendering failed: {0}")]
    RenderError(String),

    /// Layout slots do not line up with the input events
    #[error("Layout correlation failed: {0}")]
    CorrelationError(String),

    /// The delegated engine could not be loaded
    #[error("Engine load failed: {0}")]
    EngineLoadError(String),

    /// The delegated engine failed while rendering, or its worker went away
    #[error("Engine error: {0}")]
    EngineError(String),

    /// Invalid operation on the document tree
    #[error("Document error: {0}")]
    DocumentError(String),

    /// Event list could not be encoded or decoded
    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}
