//! Live [`CaptionBackend`] wiring the OpenAI client to the sidecar store.

use std::path::Path;

use async_trait::async_trait;

use capdeck_openai::OpenAiApi;

use crate::backend::{BackendError, CaptionBackend};
use crate::store;

/// Production backend: captions via the OpenAI vision endpoint and
/// persists captions as sidecar files next to the images.
pub struct LiveBackend {
    api: OpenAiApi,
}

impl LiveBackend {
    pub fn new(api: OpenAiApi) -> Self {
        Self { api }
    }
}

#[async_trait]
impl CaptionBackend for LiveBackend {
    async fn generate_caption(
        &self,
        api_key: &str,
        model: &str,
        path: &Path,
    ) -> Result<String, BackendError> {
        let bytes = tokio::fs::read(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                BackendError::Generation("Image not found".to_string())
            } else {
                BackendError::Generation(format!("Failed to read image: {e}"))
            }
        })?;

        Ok(self.api.caption_image(api_key, model, &bytes).await?)
    }

    async fn save_caption(&self, path: &Path, text: &str) -> Result<(), BackendError> {
        store::save_caption_file(path, text)
            .await
            .map(|_| ())
            .map_err(|e| BackendError::Persist(e.to_string()))
    }

    async fn delete_caption(&self, path: &Path) -> Result<bool, BackendError> {
        store::delete_caption_file(path)
            .await
            .map_err(|e| BackendError::Persist(e.to_string()))
    }
}
