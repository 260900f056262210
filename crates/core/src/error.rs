/// Domain-level errors shared across the workbench crates.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// An operation that talks to the captioning backend was invoked
    /// without an API key. Raised before any network call is made.
    #[error("API key is required")]
    MissingApiKey,

    /// A caption was empty after trimming whitespace.
    #[error("Caption is empty")]
    EmptyCaption,

    /// An index-addressed catalog access was out of bounds.
    #[error("Index {index} out of range for catalog of {len} entries")]
    OutOfRange { index: usize, len: usize },

    #[error("{entity} not found: {path}")]
    NotFound { entity: &'static str, path: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
