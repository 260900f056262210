//! Route definitions for the workbench API.
//!
//! ```text
//! GET  /health                    liveness
//!
//! POST /api/select-folder         native picker stub
//! POST /api/scan                  scan folder, replace catalog
//! GET  /api/image                 image bytes by path
//! POST /api/caption               generate + save one caption
//! POST /api/save                  save an edited caption
//! POST /api/delete                delete a caption
//! POST /api/caption-all           start a sequential batch run
//! GET  /api/progress              catalog + batch progress
//! GET  /api/settings              read settings
//! PUT  /api/settings              replace settings (write-through)
//! GET  /api/models                priced model registry
//! ```

use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;

use crate::handlers::{batch, captions, catalog, settings};
use crate::state::AppState;

/// The `/api` routes.
pub fn api_router() -> Router<AppState> {
    Router::new()
        .route("/select-folder", post(catalog::select_folder))
        .route("/scan", post(catalog::scan))
        .route("/image", get(catalog::get_image))
        .route("/caption", post(captions::generate))
        .route("/save", post(captions::save))
        .route("/delete", post(captions::delete))
        .route("/caption-all", post(batch::caption_all))
        .route("/progress", get(batch::progress))
        .route(
            "/settings",
            get(settings::get_settings).put(settings::put_settings),
        )
        .route("/models", get(settings::list_models))
}

/// The fully assembled application router (without middleware layers).
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest("/api", api_router())
        .with_state(state)
}

/// GET /health
async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}
