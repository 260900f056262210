//! Folder scanning, image bytes, and the folder-picker stub.

use std::path::Path;

use axum::extract::{Query, State};
use axum::http::header;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use capdeck_core::catalog::ImageEntry;
use capdeck_core::error::CoreError;
use capdeck_core::progress::Progress;
use capdeck_engine::scanner;
use capdeck_events::WorkbenchEvent;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ScanRequest {
    pub folder_path: String,
}

/// POST /api/scan
///
/// Scans a folder and replaces the catalog wholesale with the result.
/// The scanned folder is remembered as the last-used path.
pub async fn scan(
    State(state): State<AppState>,
    Json(request): Json<ScanRequest>,
) -> AppResult<Json<Vec<ImageEntry>>> {
    let folder = request.folder_path.trim().to_string();
    if folder.is_empty() {
        return Err(AppError::BadRequest("Folder path is empty".to_string()));
    }

    let entries = scanner::scan_folder(Path::new(&folder)).await?;

    let (wire, progress) = {
        let mut catalog = state.catalog.write().await;
        catalog.load(entries)?;
        (catalog.entries().to_vec(), Progress::of(&catalog))
    };

    let mut settings = state.settings.get();
    if settings.folder_path != folder {
        settings.folder_path = folder.clone();
        state.settings.update(settings)?;
    }

    tracing::info!(folder = %folder, images = wire.len(), "Catalog loaded");
    state.event_bus.publish(WorkbenchEvent::CatalogLoaded {
        folder,
        total: wire.len(),
    });
    state.event_bus.publish(WorkbenchEvent::ProgressChanged {
        captioned: progress.captioned,
        total: progress.total,
        percent: progress.percent(),
    });

    Ok(Json(wire))
}

#[derive(Debug, Deserialize)]
pub struct ImageQuery {
    pub path: String,
}

/// GET /api/image?path=…
///
/// Serves the raw bytes of an image, addressed by path.
pub async fn get_image(Query(query): Query<ImageQuery>) -> AppResult<impl IntoResponse> {
    let bytes = tokio::fs::read(&query.path).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            AppError::Core(CoreError::NotFound {
                entity: "Image",
                path: query.path.clone(),
            })
        } else {
            AppError::Internal(format!("Failed to read image: {e}"))
        }
    })?;

    Ok(([(header::CONTENT_TYPE, content_type_for(&query.path))], bytes))
}

#[derive(Debug, Serialize)]
pub struct SelectFolderResponse {
    pub folder_path: Option<String>,
}

/// POST /api/select-folder
///
/// Native folder picker entry point. Not wired up on this build; the
/// empty selection tells the client to fall back to manual path entry
/// (it is not an error).
pub async fn select_folder() -> Json<SelectFolderResponse> {
    Json(SelectFolderResponse { folder_path: None })
}

fn content_type_for(path: &str) -> &'static str {
    match Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .as_deref()
    {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}
