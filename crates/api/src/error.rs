use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use capdeck_core::error::CoreError;
use capdeck_engine::scanner::ScanError;
use capdeck_engine::{BackendError, EngineError};

/// Application-level error type for HTTP handlers.
///
/// Wraps the domain and engine errors and implements [`IntoResponse`]
/// to produce consistent `{"detail": …}` JSON bodies; backend failure
/// text is surfaced to the caller unmodified.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `capdeck_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A controller error from `capdeck_engine`.
    #[error(transparent)]
    Engine(#[from] EngineError),

    /// A folder-scan error.
    #[error(transparent)]
    Scan(#[from] ScanError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, detail) = match &self {
            AppError::Core(core) => classify_core_error(core),
            AppError::Engine(EngineError::Core(core)) => classify_core_error(core),
            AppError::Engine(EngineError::Backend(backend)) => classify_backend_error(backend),

            AppError::Scan(scan) => match scan {
                ScanError::InvalidFolder => (StatusCode::BAD_REQUEST, scan.to_string()),
                ScanError::Io(_) => {
                    tracing::error!(error = %scan, "Folder scan failed");
                    (StatusCode::INTERNAL_SERVER_ERROR, scan.to_string())
                }
            },

            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, msg.clone())
            }
        };

        let body = json!({ "detail": detail });
        (status, axum::Json(body)).into_response()
    }
}

/// Map a [`CoreError`] to an HTTP status plus detail text.
fn classify_core_error(err: &CoreError) -> (StatusCode, String) {
    let status = match err {
        CoreError::MissingApiKey
        | CoreError::EmptyCaption
        | CoreError::OutOfRange { .. }
        | CoreError::Validation(_) => StatusCode::BAD_REQUEST,
        CoreError::NotFound { .. } => StatusCode::NOT_FOUND,
        CoreError::Conflict(_) => StatusCode::CONFLICT,
        CoreError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    if status == StatusCode::INTERNAL_SERVER_ERROR {
        tracing::error!(error = %err, "Internal core error");
    }
    (status, err.to_string())
}

/// Map a [`BackendError`] to an HTTP status plus detail text.
fn classify_backend_error(err: &BackendError) -> (StatusCode, String) {
    let status = match err {
        BackendError::Auth(_) => StatusCode::UNAUTHORIZED,
        BackendError::Generation(_) | BackendError::Network(_) => StatusCode::BAD_GATEWAY,
        BackendError::Persist(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, err.to_string())
}
