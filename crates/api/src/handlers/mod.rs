//! HTTP handlers for the workbench API.
//!
//! Handlers translate the wire contract into engine calls; no caption
//! control flow lives here.

pub mod batch;
pub mod captions;
pub mod catalog;
pub mod settings;

use capdeck_engine::CaptionOptions;

use crate::error::AppResult;
use crate::state::AppState;

/// Resolve captioning parameters from the settings store, letting the
/// request override the API key and model.
///
/// Overrides are persisted write-through, so a key supplied on use is
/// remembered for the next session.
pub(crate) fn caption_options(
    state: &AppState,
    api_key: Option<String>,
    model: Option<String>,
) -> AppResult<CaptionOptions> {
    let mut settings = state.settings.get();
    let mut dirty = false;

    if let Some(key) = api_key {
        let key = key.trim().to_string();
        if !key.is_empty() && key != settings.api_key {
            settings.api_key = key;
            dirty = true;
        }
    }
    if let Some(model) = model {
        if model != settings.model {
            settings.model = model;
            dirty = true;
        }
    }
    if dirty {
        settings = state.settings.update(settings)?;
    }

    Ok(CaptionOptions {
        api_key: settings.api_key,
        model: settings.model,
        include_trigger: settings.include_trigger,
    })
}
