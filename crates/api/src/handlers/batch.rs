//! Batch captioning and progress reporting.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use capdeck_core::progress::Progress;
use capdeck_engine::{BatchOptions, BatchRun};

use crate::error::AppResult;
use crate::handlers::caption_options;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct CaptionAllRequest {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    /// Overrides the stored skip-existing flag for this run.
    #[serde(default)]
    pub skip_existing: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct CaptionAllResponse {
    pub total: usize,
}

/// POST /api/caption-all
///
/// Starts a sequential batch run over the current catalog and returns
/// `202 Accepted` with the working-set size. Rejected with `409` while
/// a run is already active; per-item progress is observable via
/// `GET /api/progress`.
pub async fn caption_all(
    State(state): State<AppState>,
    body: Option<Json<CaptionAllRequest>>,
) -> AppResult<impl IntoResponse> {
    let request = body.map(|Json(r)| r).unwrap_or_default();

    let caption = caption_options(&state, request.api_key, request.model)?;
    let mut skip_existing = state.settings.get().skip_existing;
    if let Some(skip) = request.skip_existing {
        if skip != skip_existing {
            let mut settings = state.settings.get();
            settings.skip_existing = skip;
            state.settings.update(settings)?;
        }
        skip_existing = skip;
    }

    let total = Arc::clone(&state.batch)
        .start(BatchOptions {
            caption,
            skip_existing,
        })
        .await?;

    Ok((StatusCode::ACCEPTED, Json(CaptionAllResponse { total })))
}

#[derive(Debug, Serialize)]
pub struct ProgressResponse {
    pub captioned: usize,
    pub total: usize,
    pub percent: f64,
    pub batch: BatchRun,
}

/// GET /api/progress
///
/// Captioned/total ratio derived from the catalog, plus the state of
/// the active batch run, if any.
pub async fn progress(State(state): State<AppState>) -> AppResult<Json<ProgressResponse>> {
    let snapshot = {
        let catalog = state.catalog.read().await;
        Progress::of(&catalog)
    };

    Ok(Json(ProgressResponse {
        captioned: snapshot.captioned,
        total: snapshot.total,
        percent: snapshot.percent(),
        batch: state.batch_state.snapshot(),
    }))
}
