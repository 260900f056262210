//! The seam between the controllers and the captioning service.
//!
//! Controllers depend on [`CaptionBackend`] only, so the live
//! OpenAI-plus-filesystem implementation and scripted test doubles are
//! interchangeable. Every operation is keyed by image path and is
//! idempotent at that granularity.

use std::path::Path;

use async_trait::async_trait;

use capdeck_openai::OpenAiApiError;

/// Failures from the captioning backend, classified per the error
/// taxonomy. The carried text is human-readable and shown unmodified.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// The captioning service rejected the API key.
    #[error("{0}")]
    Auth(String),

    /// The captioning service or model failed to produce a caption.
    #[error("{0}")]
    Generation(String),

    /// The request never completed (connect, TLS, timeout).
    #[error("{0}")]
    Network(String),

    /// Persisting or clearing a caption failed.
    #[error("{0}")]
    Persist(String),
}

impl From<OpenAiApiError> for BackendError {
    fn from(err: OpenAiApiError) -> Self {
        match err {
            OpenAiApiError::Auth { .. } => Self::Auth(err.to_string()),
            OpenAiApiError::Api { .. } | OpenAiApiError::MissingContent => {
                Self::Generation(err.to_string())
            }
            OpenAiApiError::Request(_) => Self::Network(err.to_string()),
        }
    }
}

/// Captioning service operations the controllers drive.
#[async_trait]
pub trait CaptionBackend: Send + Sync {
    /// Produce a caption for the image at `path`. Must not mutate any
    /// local state.
    async fn generate_caption(
        &self,
        api_key: &str,
        model: &str,
        path: &Path,
    ) -> Result<String, BackendError>;

    /// Persist `text` as the caption for `path`. Saving the same text
    /// twice yields the same stored state.
    async fn save_caption(&self, path: &Path, text: &str) -> Result<(), BackendError>;

    /// Clear the caption for `path`. Deleting a non-existent caption
    /// succeeds silently; returns whether one existed.
    async fn delete_caption(&self, path: &Path) -> Result<bool, BackendError>;
}
