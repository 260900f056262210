//! Orchestration engine for the captioning workbench.
//!
//! Owns the caption lifecycle: the [`backend::CaptionBackend`] seam to
//! the captioning service, the folder scanner, the sidecar caption
//! store, and the single-item and batch controllers that drive catalog
//! mutations. All state is injected; nothing here is process-global.

pub mod backend;
pub mod batch;
pub mod error;
pub mod live;
pub mod scanner;
pub mod single;
pub mod store;

use std::sync::Arc;

use capdeck_core::catalog::Catalog;
use tokio::sync::RwLock;

pub use backend::{BackendError, CaptionBackend};
pub use batch::{BatchController, BatchOptions, BatchRun, BatchState, BatchSummary};
pub use error::EngineError;
pub use single::{CaptionOptions, SingleItemController};

/// The catalog as shared by the controllers and the API layer.
///
/// A `RwLock` is enough: the sequential execution model guarantees a
/// single logical writer at a time (one user action or the batch loop's
/// current step).
pub type SharedCatalog = Arc<RwLock<Catalog>>;
