use std::sync::Arc;

use tokio::sync::RwLock;

use capdeck_core::catalog::Catalog;
use capdeck_core::settings::SettingsStore;
use capdeck_engine::{
    BatchController, BatchState, CaptionBackend, SharedCatalog, SingleItemController,
};
use capdeck_events::EventBus;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via
/// `State<AppState>`.
///
/// Cheaply cloneable; everything mutable sits behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// The catalog for the currently loaded folder.
    pub catalog: SharedCatalog,
    /// Single-image caption lifecycle.
    pub single: Arc<SingleItemController>,
    /// Sequential batch runner.
    pub batch: Arc<BatchController>,
    /// Observable state of the active batch run, if any.
    pub batch_state: Arc<BatchState>,
    /// Persisted user preferences.
    pub settings: Arc<SettingsStore>,
    /// Centralized bus for workbench state-change events.
    pub event_bus: Arc<EventBus>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// Wire up the catalog, controllers, and stores around the given
    /// captioning backend.
    pub fn new(config: Arc<ServerConfig>, backend: Arc<dyn CaptionBackend>) -> Self {
        let catalog: SharedCatalog = Arc::new(RwLock::new(Catalog::new()));
        let event_bus = Arc::new(EventBus::default());
        let settings = Arc::new(SettingsStore::load(&config.settings_path));

        let single = Arc::new(SingleItemController::new(
            Arc::clone(&catalog),
            backend,
            Arc::clone(&event_bus),
        ));
        let batch_state = Arc::new(BatchState::default());
        let batch = Arc::new(BatchController::new(
            Arc::clone(&catalog),
            Arc::clone(&single),
            Arc::clone(&batch_state),
            Arc::clone(&event_bus),
        ));

        Self {
            catalog,
            single,
            batch,
            batch_state,
            settings,
            event_bus,
            config,
        }
    }
}
