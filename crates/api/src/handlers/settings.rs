//! Settings persistence and the priced-model registry.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use capdeck_core::models::{DEFAULT_MODEL, PRICED_MODELS};
use capdeck_core::settings::Settings;

use crate::error::AppResult;
use crate::state::AppState;

/// GET /api/settings
pub async fn get_settings(State(state): State<AppState>) -> Json<Settings> {
    Json(state.settings.get())
}

/// PUT /api/settings
///
/// Replaces the settings record and writes it through to disk. The
/// model selection is normalized onto a known priced model.
pub async fn put_settings(
    State(state): State<AppState>,
    Json(settings): Json<Settings>,
) -> AppResult<Json<Settings>> {
    let stored = state.settings.update(settings)?;
    tracing::info!(model = %stored.model, "Settings updated");
    Ok(Json(stored))
}

#[derive(Debug, Serialize)]
pub struct ModelInfo {
    pub id: &'static str,
    pub price: &'static str,
    pub default: bool,
}

/// GET /api/models
///
/// The selectable captioning models with display prices.
pub async fn list_models() -> Json<Vec<ModelInfo>> {
    Json(
        PRICED_MODELS
            .iter()
            .map(|model| ModelInfo {
                id: model.id,
                price: model.price,
                default: model.id == DEFAULT_MODEL,
            })
            .collect(),
    )
}
