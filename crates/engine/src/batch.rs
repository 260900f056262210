//! Sequential batch captioning.
//!
//! One run processes the working set strictly in catalog order with at
//! most one generation request in flight at any time: item *i+1* does
//! not begin until item *i*'s generate-and-save has fully settled.
//! A second invocation while a run is active is rejected, never queued.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use serde::Serialize;

use capdeck_core::error::CoreError;
use capdeck_events::{EventBus, WorkbenchEvent};

use crate::error::EngineError;
use crate::single::{CaptionOptions, SingleItemController};
use crate::SharedCatalog;

// ---------------------------------------------------------------------------
// Run state
// ---------------------------------------------------------------------------

/// Parameters of one batch run.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    pub caption: CaptionOptions,
    /// Drop entries that already have a caption at batch-start time.
    pub skip_existing: bool,
}

/// Observable state of the (at most one) active batch run.
#[derive(Debug, Default)]
pub struct BatchState {
    running: AtomicBool,
    completed: AtomicUsize,
    total: AtomicUsize,
}

impl BatchState {
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Point-in-time view for the progress endpoint.
    pub fn snapshot(&self) -> BatchRun {
        BatchRun {
            running: self.running.load(Ordering::SeqCst),
            completed: self.completed.load(Ordering::SeqCst),
            total: self.total.load(Ordering::SeqCst),
        }
    }

    /// Claim the running flag. Fails when a run is already active.
    fn try_begin(&self, total: usize) -> bool {
        if self
            .running
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return false;
        }
        self.completed.store(0, Ordering::SeqCst);
        self.total.store(total, Ordering::SeqCst);
        true
    }

    fn set_completed(&self, completed: usize) {
        self.completed.store(completed, Ordering::SeqCst);
    }

    fn finish(&self) {
        self.running.store(false, Ordering::SeqCst);
    }
}

/// Ephemeral per-run counters, as exposed to the presentation layer.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct BatchRun {
    pub running: bool,
    pub completed: usize,
    pub total: usize,
}

/// Result of a finished run. Failed items are not counted as completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub total: usize,
    pub completed: usize,
    pub failed: usize,
}

// ---------------------------------------------------------------------------
// Controller
// ---------------------------------------------------------------------------

/// Iterates the catalog under the skip-existing filter and drives the
/// single-item controller once per working-set entry.
pub struct BatchController {
    catalog: SharedCatalog,
    single: Arc<SingleItemController>,
    state: Arc<BatchState>,
    events: Arc<EventBus>,
}

impl BatchController {
    pub fn new(
        catalog: SharedCatalog,
        single: Arc<SingleItemController>,
        state: Arc<BatchState>,
        events: Arc<EventBus>,
    ) -> Self {
        Self {
            catalog,
            single,
            state,
            events,
        }
    }

    /// Run a batch to completion and return its summary.
    pub async fn run(&self, opts: &BatchOptions) -> Result<BatchSummary, EngineError> {
        let working = self.begin(opts).await?;
        Ok(self.execute(working, opts).await)
    }

    /// Validate, claim the run, and spawn the sequential loop in the
    /// background. Returns the working-set size immediately.
    pub async fn start(self: Arc<Self>, opts: BatchOptions) -> Result<usize, EngineError> {
        let working = self.begin(&opts).await?;
        let total = working.len();
        tokio::spawn(async move {
            self.execute(working, &opts).await;
        });
        Ok(total)
    }

    // ---- private helpers ----

    /// Pre-flight checks plus the working-set snapshot.
    ///
    /// The filter is evaluated once, here; entries captioned mid-run by
    /// an earlier item are not re-evaluated because membership was
    /// decided up front.
    async fn begin(&self, opts: &BatchOptions) -> Result<Vec<PathBuf>, EngineError> {
        if opts.caption.api_key.trim().is_empty() {
            return Err(CoreError::MissingApiKey.into());
        }

        let working: Vec<PathBuf> = {
            let catalog = self.catalog.read().await;
            catalog
                .entries()
                .iter()
                .filter(|entry| !(opts.skip_existing && entry.has_caption))
                .map(|entry| entry.path.clone())
                .collect()
        };

        if !self.state.try_begin(working.len()) {
            return Err(CoreError::Conflict("A batch run is already in progress".to_string()).into());
        }

        tracing::info!(
            total = working.len(),
            skip_existing = opts.skip_existing,
            "Batch captioning started",
        );
        self.events.publish(WorkbenchEvent::BatchStarted {
            total: working.len(),
        });

        Ok(working)
    }

    /// The sequential loop. Per-item failures are caught here, leave the
    /// item in `Error` status, and never abort the run.
    async fn execute(&self, working: Vec<PathBuf>, opts: &BatchOptions) -> BatchSummary {
        let total = working.len();
        let mut completed = 0usize;

        for path in &working {
            match self.single.generate_and_save(path, &opts.caption).await {
                Ok(_) => {
                    completed += 1;
                    self.state.set_completed(completed);
                    self.events.publish(WorkbenchEvent::BatchItemCompleted {
                        path: path.display().to_string(),
                        completed,
                        total,
                    });
                }
                Err(e) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %e,
                        "Batch item failed, continuing",
                    );
                    self.events.publish(WorkbenchEvent::BatchItemFailed {
                        path: path.display().to_string(),
                        detail: e.to_string(),
                    });
                }
            }
        }

        self.state.finish();
        self.events
            .publish(WorkbenchEvent::BatchFinished { completed, total });
        tracing::info!(completed, total, "Batch captioning finished");

        BatchSummary {
            total,
            completed,
            failed: total - completed,
        }
    }
}
