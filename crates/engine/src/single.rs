//! The single-image caption lifecycle.
//!
//! `Ready -> Generating -> Generated -> Saved` on the happy path, with
//! `Error` on any failure and `Ready` again after an explicit delete.
//! A generated caption is not considered durable until saved, so every
//! successful generation triggers exactly one save attempt.

use std::path::Path;
use std::sync::Arc;

use capdeck_core::caption::apply_trigger_policy;
use capdeck_core::catalog::EntryStatus;
use capdeck_core::error::CoreError;
use capdeck_core::progress::Progress;
use capdeck_events::{EventBus, WorkbenchEvent};

use crate::backend::CaptionBackend;
use crate::error::EngineError;
use crate::SharedCatalog;

/// Per-call captioning parameters, resolved from settings by the caller.
#[derive(Debug, Clone)]
pub struct CaptionOptions {
    pub api_key: String,
    pub model: String,
    pub include_trigger: bool,
}

/// Drives generate/save/delete for one catalog entry at a time.
pub struct SingleItemController {
    catalog: SharedCatalog,
    backend: Arc<dyn CaptionBackend>,
    events: Arc<EventBus>,
}

impl SingleItemController {
    pub fn new(
        catalog: SharedCatalog,
        backend: Arc<dyn CaptionBackend>,
        events: Arc<EventBus>,
    ) -> Self {
        Self {
            catalog,
            backend,
            events,
        }
    }

    /// Generate a caption for `path` and immediately persist it.
    ///
    /// Fails with [`CoreError::MissingApiKey`] before any network call
    /// when the key is blank. On any failure the entry is left in
    /// `Error` status and the error propagates without retry. Returns
    /// the exact text that was persisted.
    pub async fn generate_and_save(
        &self,
        path: &Path,
        opts: &CaptionOptions,
    ) -> Result<String, EngineError> {
        if opts.api_key.trim().is_empty() {
            return Err(CoreError::MissingApiKey.into());
        }
        self.ensure_known(path).await?;

        self.set_status(path, EntryStatus::Generating).await;

        let draft = match self
            .backend
            .generate_caption(&opts.api_key, &opts.model, path)
            .await
        {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Caption generation failed");
                self.set_status(path, EntryStatus::Error).await;
                return Err(e.into());
            }
        };

        self.set_status(path, EntryStatus::Generated).await;
        self.events.publish(WorkbenchEvent::CaptionGenerated {
            path: path.display().to_string(),
            caption: draft.clone(),
        });

        match self.save_with_policy(path, &draft, opts).await {
            Ok(saved) => Ok(saved),
            Err(e) => {
                self.set_status(path, EntryStatus::Error).await;
                Err(e)
            }
        }
    }

    /// Apply the trigger-word policy to `raw` and persist the result.
    ///
    /// On success the catalog entry reflects the exact stored text, so
    /// the displayed value always matches the persisted value. Returns
    /// that text. A failed save leaves the entry's caption state
    /// untouched; the catalog only records confirmed writes.
    pub async fn save_with_policy(
        &self,
        path: &Path,
        raw: &str,
        opts: &CaptionOptions,
    ) -> Result<String, EngineError> {
        let text = apply_trigger_policy(raw, opts.include_trigger)?;
        self.ensure_known(path).await?;

        self.backend.save_caption(path, &text).await?;

        let progress = {
            let mut catalog = self.catalog.write().await;
            if let Some(index) = catalog.index_of_path(path) {
                catalog.set_caption_state(index, true, &text)?;
                catalog.set_status(index, EntryStatus::Saved)?;
            }
            Progress::of(&catalog)
        };

        tracing::info!(path = %path.display(), "Caption saved");
        self.events.publish(WorkbenchEvent::CaptionSaved {
            path: path.display().to_string(),
            caption: text.clone(),
        });
        self.publish_progress(progress);

        Ok(text)
    }

    /// Persist a caption delete, then unconditionally clear the entry's
    /// caption state. Idempotent even when no caption existed. Returns
    /// whether one did.
    pub async fn delete_and_clear(&self, path: &Path) -> Result<bool, EngineError> {
        self.ensure_known(path).await?;

        let existed = self.backend.delete_caption(path).await?;

        let progress = {
            let mut catalog = self.catalog.write().await;
            if let Some(index) = catalog.index_of_path(path) {
                catalog.set_caption_state(index, false, "")?;
                catalog.set_status(index, EntryStatus::Ready)?;
            }
            Progress::of(&catalog)
        };

        tracing::info!(path = %path.display(), existed, "Caption deleted");
        self.events.publish(WorkbenchEvent::CaptionDeleted {
            path: path.display().to_string(),
            existed,
        });
        self.publish_progress(progress);

        Ok(existed)
    }

    // ---- private helpers ----

    /// Fail early when `path` is not in the current catalog.
    async fn ensure_known(&self, path: &Path) -> Result<(), CoreError> {
        let catalog = self.catalog.read().await;
        if catalog.by_path(path).is_none() {
            return Err(CoreError::NotFound {
                entity: "Catalog entry",
                path: path.display().to_string(),
            });
        }
        Ok(())
    }

    async fn set_status(&self, path: &Path, status: EntryStatus) {
        let mut catalog = self.catalog.write().await;
        if let Some(index) = catalog.index_of_path(path) {
            // The index was just looked up under the same lock.
            let _ = catalog.set_status(index, status);
            self.events.publish(WorkbenchEvent::EntryStatusChanged {
                path: path.display().to_string(),
                status,
            });
        }
    }

    fn publish_progress(&self, progress: Progress) {
        self.events.publish(WorkbenchEvent::ProgressChanged {
            captioned: progress.captioned,
            total: progress.total,
            percent: progress.percent(),
        });
    }
}
