//! Single-image caption operations.

use std::path::{Path, PathBuf};

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use capdeck_engine::store;

use crate::error::AppResult;
use crate::handlers::caption_options;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CaptionRequest {
    pub image_path: String,
    /// Optional overrides; when absent, the stored settings apply.
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CaptionResponse {
    pub caption: String,
}

/// POST /api/caption
///
/// Generates a caption for one image and immediately persists it (a
/// generated caption is not durable until saved). Returns the exact
/// text that was stored.
pub async fn generate(
    State(state): State<AppState>,
    Json(request): Json<CaptionRequest>,
) -> AppResult<Json<CaptionResponse>> {
    let opts = caption_options(&state, request.api_key, request.model)?;
    let caption = state
        .single
        .generate_and_save(Path::new(&request.image_path), &opts)
        .await?;
    Ok(Json(CaptionResponse { caption }))
}

#[derive(Debug, Deserialize)]
pub struct SaveRequest {
    pub image_path: String,
    pub caption_text: String,
}

#[derive(Debug, Serialize)]
pub struct SaveResponse {
    pub status: &'static str,
    pub path: PathBuf,
}

/// POST /api/save
///
/// Persists an edited caption, applying the trigger-word policy.
pub async fn save(
    State(state): State<AppState>,
    Json(request): Json<SaveRequest>,
) -> AppResult<Json<SaveResponse>> {
    let opts = caption_options(&state, None, None)?;
    let path = Path::new(&request.image_path);
    state
        .single
        .save_with_policy(path, &request.caption_text, &opts)
        .await?;
    Ok(Json(SaveResponse {
        status: "success",
        path: store::caption_path(path),
    }))
}

#[derive(Debug, Deserialize)]
pub struct DeleteRequest {
    pub image_path: String,
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub status: &'static str,
    pub deleted: bool,
}

/// POST /api/delete
///
/// Deletes an image's caption. Idempotent; `deleted` reports whether a
/// caption actually existed.
pub async fn delete(
    State(state): State<AppState>,
    Json(request): Json<DeleteRequest>,
) -> AppResult<Json<DeleteResponse>> {
    let deleted = state
        .single
        .delete_and_clear(Path::new(&request.image_path))
        .await?;
    Ok(Json(DeleteResponse {
        status: "success",
        deleted,
    }))
}
