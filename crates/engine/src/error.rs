use capdeck_core::error::CoreError;

use crate::backend::BackendError;

/// Errors surfaced by the controllers.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// A domain-level error (missing key, empty caption, conflict, …).
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A captioning-backend failure; the detail text is surfaced to the
    /// user unmodified.
    #[error(transparent)]
    Backend(#[from] BackendError),
}
