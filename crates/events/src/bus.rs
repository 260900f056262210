//! Event bus backed by a `tokio::sync::broadcast` channel.
//!
//! [`EventBus`] is the publish/subscribe hub for [`WorkbenchEvent`]s.
//! It is designed to be shared via `Arc<EventBus>` across the application.

use capdeck_core::catalog::EntryStatus;
use serde::Serialize;
use tokio::sync::broadcast;

// ---------------------------------------------------------------------------
// WorkbenchEvent
// ---------------------------------------------------------------------------

/// A state change the presentation layer may react to.
///
/// Paths are carried in display form so events serialize cleanly for
/// any transport a frontend might sit behind.
#[derive(Debug, Clone, Serialize)]
pub enum WorkbenchEvent {
    /// A folder scan replaced the catalog.
    CatalogLoaded { folder: String, total: usize },

    /// An entry's lifecycle status changed.
    EntryStatusChanged { path: String, status: EntryStatus },

    /// Generation produced a draft caption (not yet persisted).
    CaptionGenerated { path: String, caption: String },

    /// A caption was persisted; `caption` is the exact stored text.
    CaptionSaved { path: String, caption: String },

    /// A caption was deleted. `existed` is false when nothing was stored.
    CaptionDeleted { path: String, existed: bool },

    /// Catalog-wide progress after a mutation.
    ProgressChanged {
        captioned: usize,
        total: usize,
        percent: f64,
    },

    /// A batch run started over `total` working-set items.
    BatchStarted { total: usize },

    /// One batch item finished successfully.
    BatchItemCompleted {
        path: String,
        completed: usize,
        total: usize,
    },

    /// One batch item failed; the run continues.
    BatchItemFailed { path: String, detail: String },

    /// The batch run finished (with or without item failures).
    BatchFinished { completed: usize, total: usize },
}

// ---------------------------------------------------------------------------
// EventBus
// ---------------------------------------------------------------------------

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 1024;

/// In-process fan-out event bus.
///
/// Wraps a [`broadcast::Sender`] so that any number of subscribers can
/// independently receive every published [`WorkbenchEvent`].
pub struct EventBus {
    sender: broadcast::Sender<WorkbenchEvent>,
}

impl EventBus {
    /// Create a bus with a specific channel capacity.
    ///
    /// When the buffer is full, the oldest un-consumed messages are
    /// dropped and slow receivers observe a `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all current subscribers.
    ///
    /// With zero active subscribers the event is silently dropped.
    pub fn publish(&self, event: WorkbenchEvent) {
        // Ignore the SendError — it only means there are zero receivers.
        let _ = self.sender.send(event);
    }

    /// Subscribe to all events published on this bus.
    pub fn subscribe(&self) -> broadcast::Receiver<WorkbenchEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
